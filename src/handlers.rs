//! Message handlers for the color flipper.
//!
//! Each handler processes one category of messages,
//! keeping the `FlipperApp` update function small.

use rand::Rng;
use web_time::Instant;

use crate::copy_feedback::CopyFeedback;
use crate::engine::{EngineState, Transition};
use crate::message::{CopyMessage, Effect, EngineMessage};

/// Handle engine messages. Returns whether the state changed.
pub fn handle_engine<R: Rng + ?Sized>(
    msg: EngineMessage,
    state: &mut EngineState,
    rng: &mut R,
    shade_range: u8,
) -> Transition {
    match msg {
        EngineMessage::Generate => state.generate(rng),
        EngineMessage::ToggleLock => {
            state.toggle_lock();
            Transition::Applied
        }
        EngineMessage::AdjustShade => state.adjust_shade(rng, shade_range),
        EngineMessage::ApplyHistory(index) => state.replay(index),
    }
}

/// Handle copy button messages.
///
/// The clipboard round-trip only changes the button label, never the engine state.
pub fn handle_copy(
    msg: CopyMessage,
    state: &EngineState,
    feedback: &mut CopyFeedback,
    now: Instant,
) -> Vec<Effect> {
    match msg {
        CopyMessage::Requested => {
            let hex = state.current().to_hex();
            log::debug!("📋 Copy requested for {}", hex);
            vec![Effect::WriteClipboard(hex)]
        }
        CopyMessage::Finished(outcome) => {
            log::debug!("📋 Copy finished: {:?}", outcome);
            feedback.show(outcome, now);
            vec![
                Effect::Render,
                Effect::ScheduleRevert(feedback.revert_after()),
            ]
        }
        CopyMessage::Expired => {
            if feedback.expire(now) {
                vec![Effect::Render]
            } else {
                Vec::new()
            }
        }
    }
}
