//! Bounded color history.
//!
//! Most recent color first. Recording the color that is already at the head
//! is a no-op, so the strip never shows the same swatch twice in a row.
//! Colors further back may repeat.

use std::collections::VecDeque;

use crate::color::Rgb;
use crate::constants::DEFAULT_HISTORY_LIMIT;

/// Configuration for the history strip
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of colors to keep
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    /// Recorded colors, index 0 is the most recent
    entries: VecDeque<Rgb>,
    config: HistoryConfig,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration. A limit of zero is raised to one.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config: HistoryConfig {
                max_entries: config.max_entries.max(1),
            },
            ..Default::default()
        }
    }

    /// Record a color. Returns false if it was already at the head.
    pub fn record(&mut self, color: Rgb) -> bool {
        if self.head() == Some(color) {
            log::trace!("History: {} already at head", color);
            return false;
        }

        self.entries.push_front(color);
        while self.entries.len() > self.config.max_entries {
            if let Some(evicted) = self.entries.pop_back() {
                log::trace!("History: evicted {}", evicted);
            }
        }
        log::debug!(
            "History: recorded {} ({} entries)",
            color,
            self.entries.len()
        );
        true
    }

    /// The most recently recorded color.
    pub fn head(&self) -> Option<Rgb> {
        self.entries.front().copied()
    }

    /// Color at `index`, counting from the most recent.
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.entries.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }
}
