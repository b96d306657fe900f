use thiserror::Error;

use super::{WindowEvent, WindowEventListener};
use crate::coords::{Position, Size};
use crate::render::{RenderBackend, RendererInfo};

/// Parameters for creating a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub fullscreen: bool,
    pub position: Position,
    /// Logical size; ignored when `fullscreen` is set.
    pub size: Size,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: String::from("wall"),
            fullscreen: false,
            position: Position::default(),
            size: Size::new(1024, 768),
        }
    }
}

/// Boolean window states queried with [`Window::check`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WindowFlag {
    /// Set once a close was requested; never cleared.
    ShouldClose,
    Focused,
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("platform window creation failed: {0}")]
    Platform(String),
    #[error("GPU context creation failed: {0}")]
    Gpu(String),
}

/// A window with a renderer attached.
///
/// Events reach the window through [`dispatch`](Window::dispatch), which
/// updates its flags and forwards to every connected listener.
pub trait Window {
    fn check(&self, flag: WindowFlag) -> bool;

    /// GL-style swap interval: `1` is vsync, `0` is unthrottled.
    fn set_swap_interval(&mut self, interval: u32);

    /// Diagnostic description of the renderer.
    fn renderer(&self) -> RendererInfo;

    fn renderer_mut(&mut self) -> &mut dyn RenderBackend;

    /// Current drawable size in physical pixels.
    fn framebuffer_size(&self) -> Size;

    /// Physical pixels per logical pixel.
    fn scale_factor(&self) -> f64;

    /// Presents the frame recorded since the last `bind_target`.
    fn swap_buffers(&mut self);

    fn connect(&mut self, listener: Box<dyn WindowEventListener>);

    fn dispatch(&mut self, event: &WindowEvent);

    /// Releases the platform window and its GPU resources.
    fn destroy(&mut self);
}
