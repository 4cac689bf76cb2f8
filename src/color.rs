//! Color representation and color-space conversions.
//!
//! Colors are stored as 8-bit sRGB triples. Hex and HSL are derived
//! representations used for display; only hex can be parsed back.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::ColorError;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in HSL, rounded to whole degrees and percents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in degrees, 0-359
    pub h: u16,
    /// Saturation in percent, 0-100
    pub s: u8,
    /// Lightness in percent, 0-100
    pub l: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB` (uppercase).
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let (r, g, b) = hex_to_rgb(hex)?;
        Ok(Self::new(r, g, b))
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let (h, s, l) = rgb_to_hsl(self.r, self.g, self.b);
        Hsl { h, s, l }
    }

    /// Add the same offset to every channel, rounding and clamping to 0..=255.
    #[must_use]
    pub fn shade_with_factor(self, factor: f64) -> Self {
        let shift = |c: u8| (f64::from(c) + factor).round().clamp(0.0, 255.0) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°, {}%, {}%", self.h, self.s, self.l)
    }
}

/// Format three channels as `#RRGGBB`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parse a 6-digit hex color; the leading `#` is optional.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ColorError::invalid_format(hex, "empty color string"));
    }
    // checked before slicing so multi-byte input never splits a char
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::invalid_format(hex, "non-hex digit"));
    }
    if digits.len() != 6 {
        return Err(ColorError::invalid_format(hex, "expected 6 hex digits"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorError::invalid_format(hex, "non-hex digit"))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert RGB to HSL as `(hue°, saturation%, lightness%)`.
///
/// Hue is wrapped into 0-359, so a hue that rounds up to 360 reads as 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let percent = |v: f64| (v * 100.0).round() as u8;

    if max == min {
        // achromatic
        return (0, 0, percent(l));
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    let hue = ((sector / 6.0 * 360.0).round() as u16) % 360;

    (hue, percent(s), percent(l))
}

/// Draw a color with every channel independently uniform over 0..=255.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(rng.random(), rng.random(), rng.random())
}

/// Draw a shade factor uniformly from `[-range, range)`.
pub fn random_shade_factor<R: Rng + ?Sized>(rng: &mut R, range: u8) -> f64 {
    if range == 0 {
        return 0.0;
    }
    let range = f64::from(range);
    rng.random_range(-range..range)
}

/// Shift all channels of `current` by one random factor from `[-range, range)`.
pub fn adjust_shade<R: Rng + ?Sized>(current: Rgb, rng: &mut R, range: u8) -> Rgb {
    current.shade_with_factor(random_shade_factor(rng, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rgb_to_hex_known_value() {
        assert_eq!(rgb_to_hex(0, 123, 255), "#007BFF");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_to_hex(171, 205, 239), "#ABCDEF");
    }

    #[test]
    fn test_hex_to_rgb_known_value() {
        assert_eq!(hex_to_rgb("#007BFF"), Ok((0, 123, 255)));
        assert_eq!(hex_to_rgb("007bff"), Ok((0, 123, 255)));
        assert_eq!(hex_to_rgb("  #abcdef "), Ok((171, 205, 239)));
    }

    #[test]
    fn test_hex_round_trip_all_channels() {
        // every value on each channel, other channels held at distinct values
        for v in 0..=255u8 {
            for (r, g, b) in [(v, 17, 200), (3, v, 99), (250, 1, v), (v, v, v)] {
                assert_eq!(hex_to_rgb(&rgb_to_hex(r, g, b)), Ok((r, g, b)));
            }
        }
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        for bad in [
            "", "#", "#12345", "#1234567", "#GG0000", "12 345", "#+12345", "#ééé",
        ] {
            let err = hex_to_rgb(bad).expect_err(bad);
            assert!(matches!(err, ColorError::InvalidFormat { .. }), "{bad}");
        }
    }

    #[test]
    fn test_rgb_to_hsl_known_values() {
        assert_eq!(rgb_to_hsl(255, 255, 255), (0, 0, 100));
        assert_eq!(rgb_to_hsl(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsl(255, 0, 0), (0, 100, 50));
        assert_eq!(rgb_to_hsl(0, 255, 0), (120, 100, 50));
        assert_eq!(rgb_to_hsl(0, 0, 255), (240, 100, 50));
        assert_eq!(rgb_to_hsl(0, 123, 255), (211, 100, 50));
        assert_eq!(rgb_to_hsl(128, 128, 128), (0, 0, 50));
    }

    #[test]
    fn test_rgb_to_hsl_light_saturation_branch() {
        // lightness above 50% uses delta / (2 - max - min)
        assert_eq!(rgb_to_hsl(255, 128, 128), (0, 100, 75));
    }

    #[test]
    fn test_rgb_to_hsl_hue_wraps_below_360() {
        // 359.76° rounds to 360, which wraps to 0
        assert_eq!(rgb_to_hsl(255, 0, 1).0, 0);
        for v in 0..=255u8 {
            assert!(rgb_to_hsl(255, 0, v).0 < 360);
        }
    }

    #[test]
    fn test_display_and_from_str() {
        let color: Rgb = "#007bff".parse().unwrap();
        assert_eq!(color, Rgb::new(0, 123, 255));
        assert_eq!(color.to_string(), "#007BFF");
        assert_eq!(color.to_hsl().to_string(), "211°, 100%, 50%");
    }

    #[test]
    fn test_shade_with_factor_clamps() {
        let near_white = Rgb::new(250, 250, 250);
        assert_eq!(near_white.shade_with_factor(29.9), Rgb::new(255, 255, 255));
        let near_black = Rgb::new(5, 10, 40);
        assert_eq!(near_black.shade_with_factor(-30.0), Rgb::new(0, 0, 10));
        let grey = Rgb::new(100, 100, 100);
        assert_eq!(grey.shade_with_factor(0.4), grey);
        assert_eq!(grey.shade_with_factor(0.5), Rgb::new(101, 101, 101));
    }

    #[test]
    fn test_adjust_shade_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for base in [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(250, 5, 128),
        ] {
            for _ in 0..500 {
                let shaded = adjust_shade(base, &mut rng, 30);
                let pairs = [(base.r, shaded.r), (base.g, shaded.g), (base.b, shaded.b)];
                for (before, after) in pairs {
                    assert!((i16::from(after) - i16::from(before)).abs() <= 30);
                }
            }
        }
    }

    #[test]
    fn test_shade_factor_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let f = random_shade_factor(&mut rng, 30);
            assert!((-30.0..30.0).contains(&f));
        }
        assert_eq!(random_shade_factor(&mut rng, 0), 0.0);
    }

    #[test]
    fn test_random_color_is_seeded() {
        let a = random_color(&mut StdRng::seed_from_u64(1));
        let b = random_color(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
