//! Transient copy-button feedback.
//!
//! After a clipboard write the button shows "Copied!" or "Copy Failed" for a
//! fixed delay, then reverts. The feedback never touches engine state.

use std::time::Duration;
use web_time::Instant;

use crate::constants::{DEFAULT_COPY_FEEDBACK_MS, labels};

/// Outcome of a clipboard write, as far as the UI cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Tracks which label the copy button shows and when it should revert.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    /// How long a result label stays up.
    revert_after: Duration,

    /// Current result and the moment it expires.
    shown: Option<(CopyOutcome, Instant)>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COPY_FEEDBACK_MS))
    }
}

impl CopyFeedback {
    pub fn new(revert_after: Duration) -> Self {
        Self {
            revert_after,
            shown: None,
        }
    }

    pub fn revert_after(&self) -> Duration {
        self.revert_after
    }

    /// Show `outcome` starting at `now`.
    pub fn show(&mut self, outcome: CopyOutcome, now: Instant) {
        log::trace!("Copy feedback: {:?}", outcome);
        self.shown = Some((outcome, now + self.revert_after));
    }

    /// Revert to the idle label if the shown result has expired.
    ///
    /// Returns true if the label changed. A timer scheduled for an older
    /// result finds the newer one unexpired and leaves it alone.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.shown {
            Some((_, expires_at)) if now >= expires_at => {
                self.shown = None;
                true
            }
            _ => false,
        }
    }

    pub fn outcome(&self) -> Option<CopyOutcome> {
        self.shown.map(|(outcome, _)| outcome)
    }

    /// Text for the copy button.
    pub fn label(&self) -> &'static str {
        match self.outcome() {
            None => labels::COPY_IDLE,
            Some(CopyOutcome::Copied) => labels::COPY_OK,
            Some(CopyOutcome::Failed) => labels::COPY_FAILED,
        }
    }
}
