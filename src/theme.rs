//! Foreground selection for text drawn on top of the current color.

use crate::color::Rgb;
use crate::constants::LUMINANCE_THRESHOLD;

/// Text tone - light text for dark backgrounds, dark text for light ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    /// Pick the tone that stays readable on `background`.
    pub fn for_background(background: Rgb) -> Self {
        if luminance(background) < LUMINANCE_THRESHOLD {
            TextTone::Light
        } else {
            TextTone::Dark
        }
    }

    /// CSS color token for this tone.
    pub fn css_color(&self) -> &'static str {
        match self {
            TextTone::Light => "#E6EEF8",
            TextTone::Dark => "#0b1220",
        }
    }

    /// The same token as an RGB triple, for front-ends without CSS.
    pub fn rgb(&self) -> Rgb {
        match self {
            TextTone::Light => Rgb::new(0xE6, 0xEE, 0xF8),
            TextTone::Dark => Rgb::new(0x0B, 0x12, 0x20),
        }
    }
}

/// Perceived brightness on a 0-255 scale (ITU-R BT.601 weights).
pub fn luminance(color: Rgb) -> f64 {
    0.299 * f64::from(color.r) + 0.587 * f64::from(color.g) + 0.114 * f64::from(color.b)
}
