//! The wall application: a window showing one background image.
//!
//! [`Wall`] implements the engine's lifecycle listener; [`WallConfig`] holds
//! its settings.

mod app;
mod config;

pub use app::{ApplicationHandles, ScrollLogger, Wall, CLEAR_COLOR, MAIN_CAMERA, MAIN_LAYER};
pub use config::{ConfigError, WallConfig, WindowConfig};
