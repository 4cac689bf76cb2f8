//! View model and render sink.
//!
//! The view model holds every string and style a front-end needs, derived
//! from the app state in one place so both front-ends show the same text.

use crate::app::FlipperApp;
use crate::color::Rgb;
use crate::constants::labels;
use crate::theme::TextTone;

/// One clickable swatch in the history strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    /// Position in the history, 0 is the most recent
    pub index: usize,
    pub color: Rgb,
    /// `#RRGGBB`, used as background and tooltip
    pub hex: String,
    pub aria_label: String,
}

/// Everything needed to draw the widget once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub color: Rgb,
    pub hex: String,
    /// `HEX: #RRGGBB`
    pub hex_label: String,
    /// `RGB: r, g, b`
    pub rgb_label: String,
    /// `HSL: h°, s%, l%`
    pub hsl_label: String,
    pub text_tone: TextTone,
    pub locked: bool,
    pub lock_label: &'static str,
    /// CSS opacity of the lock button
    pub lock_opacity: &'static str,
    pub copy_label: &'static str,
    pub history: Vec<Swatch>,
}

impl ViewModel {
    pub fn from_app(app: &FlipperApp) -> Self {
        let state = app.state();
        let color = state.current();
        let hex = color.to_hex();
        let locked = state.is_locked();

        let history = state
            .history()
            .iter()
            .enumerate()
            .map(|(index, color)| {
                let hex = color.to_hex();
                Swatch {
                    index,
                    color,
                    aria_label: format!("Apply color {hex}"),
                    hex,
                }
            })
            .collect();

        Self {
            color,
            hex_label: format!("HEX: {hex}"),
            rgb_label: format!("RGB: {}, {}, {}", color.r, color.g, color.b),
            hsl_label: format!("HSL: {}", color.to_hsl()),
            hex,
            text_tone: TextTone::for_background(color),
            locked,
            lock_label: if locked { labels::LOCK_ON } else { labels::LOCK_OFF },
            lock_opacity: if locked { "0.7" } else { "1" },
            copy_label: app.copy_feedback().label(),
            history,
        }
    }
}

/// Something that can draw a [`ViewModel`].
pub trait RenderSink {
    fn render(&mut self, view: &ViewModel);
}
