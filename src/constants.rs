//! Global constants for the color flipper

/// Color applied when the widget starts.
pub const DEFAULT_COLOR: &str = "#007BFF";

/// Number of swatches kept in the history strip.
pub const DEFAULT_HISTORY_LIMIT: usize = 8;

/// Upper bound on the configured history limit; one slot per digit key `1`-`8`.
pub const MAX_HISTORY_LIMIT: usize = 8;

/// Shade factors are drawn from `[-DEFAULT_SHADE_RANGE, DEFAULT_SHADE_RANGE)`.
pub const DEFAULT_SHADE_RANGE: u8 = 30;

/// How long the copy button shows its result before reverting, in milliseconds.
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 1200;

/// Luminance below which light text is used on top of the color.
pub const LUMINANCE_THRESHOLD: f64 = 140.0;

/// Button and label texts.
pub mod labels {
    pub const COPY_IDLE: &str = "Copy HEX";
    pub const COPY_OK: &str = "Copied!";
    pub const COPY_FAILED: &str = "Copy Failed";
    pub const LOCK_OFF: &str = "🔒 Lock";
    pub const LOCK_ON: &str = "🔓 Locked";
}
