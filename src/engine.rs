//! Color engine state and its transitions.
//!
//! `EngineState` owns everything the widget remembers: the current color,
//! the lock flag and the history strip. It is only changed through the
//! methods below; each reports whether the request was applied so the caller
//! knows whether to re-render.

use rand::Rng;

use crate::color::{self, Rgb};
use crate::history::{History, HistoryConfig};

/// Result of a state transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The request was carried out
    Applied,
    /// The request was a no-op (locked, or nothing to replay)
    Ignored,
}

#[derive(Debug, Clone)]
pub struct EngineState {
    current: Rgb,
    locked: bool,
    history: History,
}

impl EngineState {
    /// Start the session by applying `initial`, which becomes the first history entry.
    pub fn new(initial: Rgb, history: HistoryConfig) -> Self {
        let mut state = Self {
            current: initial,
            locked: false,
            history: History::with_config(history),
        };
        state.apply(initial);
        state
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Make `color` current and record it in the history.
    pub fn apply(&mut self, color: Rgb) -> Transition {
        self.current = color;
        self.history.record(color);
        log::debug!("🎨 Applied {}", color);
        Transition::Applied
    }

    /// Apply a fresh random color unless the engine is locked.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
        if self.locked {
            log::debug!("🔒 Generate ignored while locked");
            return Transition::Ignored;
        }
        let next = color::random_color(rng);
        self.apply(next)
    }

    /// Nudge the current color by a random shade factor from `[-range, range)`.
    ///
    /// Not gated by the lock.
    pub fn adjust_shade<R: Rng + ?Sized>(&mut self, rng: &mut R, range: u8) -> Transition {
        let shaded = color::adjust_shade(self.current, rng, range);
        log::debug!("🌗 Shade {} -> {}", self.current, shaded);
        self.apply(shaded)
    }

    /// Re-apply the history entry at `index`. Not gated by the lock.
    pub fn replay(&mut self, index: usize) -> Transition {
        match self.history.get(index) {
            Some(color) => {
                log::debug!("⏪ Replaying history slot {}", index);
                self.apply(color)
            }
            None => {
                log::debug!("No history entry at slot {}", index);
                Transition::Ignored
            }
        }
    }

    /// Flip the lock flag and return the new value.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        log::debug!("🔒 Lock {}", if self.locked { "on" } else { "off" });
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine() -> EngineState {
        EngineState::new(Rgb::new(0, 123, 255), HistoryConfig::default())
    }

    #[test]
    fn test_initial_color_is_recorded() {
        let state = engine();
        assert_eq!(state.current(), Rgb::new(0, 123, 255));
        assert!(!state.is_locked());
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history().head(), Some(Rgb::new(0, 123, 255)));
    }

    #[test]
    fn test_lock_blocks_generate() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = engine();

        assert!(state.toggle_lock());
        let before = state.current();
        for _ in 0..20 {
            assert_eq!(state.generate(&mut rng), Transition::Ignored);
        }
        assert_eq!(state.current(), before);
        assert_eq!(state.history().len(), 1);

        assert!(!state.toggle_lock());
        let changed = (0..20).any(|_| {
            state.generate(&mut rng);
            state.current() != before
        });
        assert!(changed);
    }

    #[test]
    fn test_shade_and_replay_bypass_lock() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = engine();
        state.generate(&mut rng);
        state.toggle_lock();

        assert_eq!(state.adjust_shade(&mut rng, 30), Transition::Applied);
        let oldest = state.history().len() - 1;
        assert_eq!(state.replay(oldest), Transition::Applied);
        assert_eq!(state.current(), Rgb::new(0, 123, 255));
        assert!(state.is_locked());
    }

    #[test]
    fn test_replay_out_of_range() {
        let mut state = engine();
        assert_eq!(state.replay(5), Transition::Ignored);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_replay_head_does_not_grow_history() {
        let mut state = engine();
        state.replay(0);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_shade_moves_all_channels_together() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = EngineState::new(Rgb::new(100, 120, 140), HistoryConfig::default());
        state.adjust_shade(&mut rng, 30);
        let Rgb { r, g, b } = state.current();
        assert_eq!(i16::from(g) - i16::from(r), 20);
        assert_eq!(i16::from(b) - i16::from(g), 20);
    }
}
