//! Application message types for the color flipper.
//!
//! All input events are represented as messages in the Elm architecture style.
//! Handling a message yields [`Effect`]s that the front-end carries out.

use std::time::Duration;

use crate::copy_feedback::CopyOutcome;

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Color engine interactions
    Engine(EngineMessage),
    /// Copy button and clipboard round-trip
    Copy(CopyMessage),
}

/// Messages that act on the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    /// Flip to a new random color (ignored while locked)
    Generate,
    /// Toggle the lock
    ToggleLock,
    /// Randomize the shade of the current color
    AdjustShade,
    /// Re-apply the history swatch at this index
    ApplyHistory(usize),
}

/// Messages for the copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMessage {
    /// Copy button pressed
    Requested,
    /// Clipboard write finished
    Finished(CopyOutcome),
    /// The feedback delay elapsed
    Expired,
}

/// Side effects requested by the application, performed by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-render from a fresh view model
    Render,
    /// Write this text to the clipboard and report back with `CopyMessage::Finished`
    WriteClipboard(String),
    /// Send `CopyMessage::Expired` after this delay
    ScheduleRevert(Duration),
}
