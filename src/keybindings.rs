//! Keyboard shortcuts for the flipper.
//!
//! Both front-ends translate a pressed character into a [`Message`] through
//! [`KeyBindings::message_for_key`]. Digits `1`-`8` always replay the
//! matching history slot; the history limit is capped at 8 so every
//! swatch is reachable.

use serde::{Deserialize, Serialize};

use crate::message::{CopyMessage, EngineMessage, Message};

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Generate a new random color
    #[serde(default = "default_generate")]
    pub generate: char,
    /// Toggle the lock
    #[serde(default = "default_lock")]
    pub lock: char,
    /// Randomize the shade of the current color
    #[serde(default = "default_shade")]
    pub shade: char,
    /// Copy the current hex to the clipboard
    #[serde(default = "default_copy")]
    pub copy: char,
    /// Leave the terminal front-end
    #[serde(default = "default_quit")]
    pub quit: char,
}

fn default_generate() -> char {
    'g'
}

fn default_lock() -> char {
    'l'
}

fn default_shade() -> char {
    's'
}

fn default_copy() -> char {
    'c'
}

fn default_quit() -> char {
    'q'
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            generate: default_generate(),
            lock: default_lock(),
            shade: default_shade(),
            copy: default_copy(),
            quit: default_quit(),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the message that corresponds to a key press, if any.
    ///
    /// Space is an alias for generate. Matching ignores ASCII case.
    pub fn message_for_key(&self, key: char) -> Option<Message> {
        let key = key.to_ascii_lowercase();
        let is = |bound: char| bound.to_ascii_lowercase() == key;

        if is(self.generate) || key == ' ' {
            Some(Message::Engine(EngineMessage::Generate))
        } else if is(self.lock) {
            Some(Message::Engine(EngineMessage::ToggleLock))
        } else if is(self.shade) {
            Some(Message::Engine(EngineMessage::AdjustShade))
        } else if is(self.copy) {
            Some(Message::Copy(CopyMessage::Requested))
        } else {
            history_slot_for_key(key)
                .map(|slot| Message::Engine(EngineMessage::ApplyHistory(slot)))
        }
    }

    pub fn is_quit(&self, key: char) -> bool {
        key.to_ascii_lowercase() == self.quit.to_ascii_lowercase()
    }
}

/// Digits 1-8 map to history slots 0-7.
fn history_slot_for_key(key: char) -> Option<usize> {
    match key.to_digit(10)? {
        digit @ 1..=8 => Some(digit as usize - 1),
        _ => None,
    }
}
