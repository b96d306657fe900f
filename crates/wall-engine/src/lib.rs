//! Wall engine crate.
//!
//! Owns the platform, GPU and resource pieces the wall application is composed
//! from, plus the lifecycle driver that sequences application callbacks.

pub mod core;
pub mod device;
pub mod window;

pub mod coords;
pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod resources;
pub mod scene;
pub mod viewport;
