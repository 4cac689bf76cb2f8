//! Color Flipper
//!
//! Random color generator with hex/RGB/HSL readouts, a lock, shade nudging,
//! a short history strip and copy-to-clipboard. Runs in the browser (WASM)
//! or in a terminal.

pub mod app;
pub mod color;
pub mod config;
pub mod constants;
pub mod copy_feedback;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod history;
pub mod keybindings;
pub mod message;
pub mod theme;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

pub use app::FlipperApp;
pub use color::{Hsl, Rgb, hex_to_rgb, random_color, rgb_to_hex, rgb_to_hsl};
pub use config::{AppConfig, ConfigError, LogLevel};
pub use engine::{EngineState, Transition};
pub use error::{ClipboardError, ColorError, FrontendError};
pub use message::{Effect, Message};
pub use view::{RenderSink, ViewModel};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
