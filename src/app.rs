//! The color flipper application.
//!
//! `FlipperApp` ties the engine, the copy feedback and the configuration
//! together and dispatches [`Message`]s to the handlers. It never talks to
//! the DOM or the terminal; front-ends perform the returned [`Effect`]s.

use rand::SeedableRng;
use rand::rngs::StdRng;
use web_time::Instant;

use crate::config::AppConfig;
use crate::copy_feedback::CopyFeedback;
use crate::engine::{EngineState, Transition};
use crate::handlers::{handle_copy, handle_engine};
use crate::keybindings::KeyBindings;
use crate::message::{Effect, Message};
use crate::view::{RenderSink, ViewModel};

#[derive(Debug)]
pub struct FlipperApp {
    state: EngineState,
    copy_feedback: CopyFeedback,
    keybindings: KeyBindings,
    shade_range: u8,
    rng: StdRng,
}

impl FlipperApp {
    /// Create the app from `config`, seeding randomness from the OS.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create the app with a caller-provided random source.
    pub fn with_rng(config: &AppConfig, rng: StdRng) -> Self {
        let prefs = &config.preferences;
        let initial = prefs.initial_color();
        log::info!("🎨 Starting with {}", initial);

        Self {
            state: EngineState::new(initial, prefs.history_config()),
            copy_feedback: CopyFeedback::new(prefs.copy_feedback()),
            keybindings: config.keybindings.clone(),
            shade_range: prefs.shade_range,
            rng,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn copy_feedback(&self) -> &CopyFeedback {
        &self.copy_feedback
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Handle a message at the current time.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        self.update_at(message, Instant::now())
    }

    /// Handle a message as if it arrived at `now`.
    pub fn update_at(&mut self, message: Message, now: Instant) -> Vec<Effect> {
        match message {
            Message::Engine(msg) => {
                match handle_engine(msg, &mut self.state, &mut self.rng, self.shade_range) {
                    Transition::Applied => vec![Effect::Render],
                    Transition::Ignored => Vec::new(),
                }
            }
            Message::Copy(msg) => handle_copy(msg, &self.state, &mut self.copy_feedback, now),
        }
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::from_app(self)
    }

    /// Render the current view into `sink`.
    pub fn present(&self, sink: &mut dyn RenderSink) {
        sink.render(&self.view());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::copy_feedback::CopyOutcome;
    use crate::message::{CopyMessage, EngineMessage};
    use std::time::Duration;

    fn app() -> FlipperApp {
        FlipperApp::with_rng(&AppConfig::default(), StdRng::seed_from_u64(21))
    }

    #[test]
    fn test_generate_renders() {
        let mut app = app();
        let effects = app.update(Message::Engine(EngineMessage::Generate));
        assert_eq!(effects, vec![Effect::Render]);
        assert_eq!(app.state().history().len(), 2);
    }

    #[test]
    fn test_locked_generate_has_no_effect() {
        let mut app = app();
        app.update(Message::Engine(EngineMessage::ToggleLock));
        let effects = app.update(Message::Engine(EngineMessage::Generate));
        assert!(effects.is_empty());
        assert_eq!(app.state().current(), Rgb::new(0, 123, 255));
    }

    #[test]
    fn test_copy_round_trip() {
        let mut app = app();
        let start = Instant::now();

        let effects = app.update_at(Message::Copy(CopyMessage::Requested), start);
        assert_eq!(effects, vec![Effect::WriteClipboard("#007BFF".to_string())]);

        let effects = app.update_at(
            Message::Copy(CopyMessage::Finished(CopyOutcome::Copied)),
            start,
        );
        assert_eq!(
            effects,
            vec![
                Effect::Render,
                Effect::ScheduleRevert(Duration::from_millis(1200))
            ]
        );
        assert_eq!(app.view().copy_label, "Copied!");

        let effects = app.update_at(
            Message::Copy(CopyMessage::Expired),
            start + Duration::from_millis(1200),
        );
        assert_eq!(effects, vec![Effect::Render]);
        assert_eq!(app.view().copy_label, "Copy HEX");
    }

    #[test]
    fn test_copy_failure_leaves_engine_alone() {
        let mut app = app();
        let before = app.state().current();
        let history_len = app.state().history().len();

        app.update(Message::Copy(CopyMessage::Requested));
        app.update(Message::Copy(CopyMessage::Finished(CopyOutcome::Failed)));

        assert_eq!(app.view().copy_label, "Copy Failed");
        assert_eq!(app.state().current(), before);
        assert_eq!(app.state().history().len(), history_len);
    }

    #[test]
    fn test_copy_uses_current_color() {
        let mut app = app();
        app.update(Message::Engine(EngineMessage::Generate));
        let hex = app.state().current().to_hex();
        assert_eq!(
            app.update(Message::Copy(CopyMessage::Requested)),
            vec![Effect::WriteClipboard(hex)]
        );
    }

    #[test]
    fn test_history_click_replays() {
        let mut app = app();
        app.update(Message::Engine(EngineMessage::Generate));
        app.update(Message::Engine(EngineMessage::ApplyHistory(1)));
        assert_eq!(app.state().current(), Rgb::new(0, 123, 255));
        let effects = app.update(Message::Engine(EngineMessage::ApplyHistory(7)));
        assert!(effects.is_empty());
    }
}
