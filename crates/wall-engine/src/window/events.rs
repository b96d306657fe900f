use crate::coords::{Position, Size};

use super::WindowFlag;

/// Platform-neutral window events.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// New framebuffer size in physical pixels.
    Resized(Size),
    /// New window position in physical pixels.
    Moved(Position),
    Scrolled { dx: f64, dy: f64 },
    CloseRequested,
    Focused(bool),
    ScaleFactorChanged(f64),
}

/// Observer connected to a window.
///
/// Every method defaults to doing nothing.
pub trait WindowEventListener {
    fn on_resize(&mut self, size: Size) {
        let _ = size;
    }

    fn on_move(&mut self, position: Position) {
        let _ = position;
    }

    fn on_scroll(&mut self, dx: f64, dy: f64) {
        let _ = (dx, dy);
    }

    fn on_close_requested(&mut self) {}

    fn on_focus(&mut self, focused: bool) {
        let _ = focused;
    }
}

/// Window flags plus connected listeners.
///
/// Shared by window implementations so that flag handling and fan-out behave
/// the same everywhere.
#[derive(Default)]
pub struct EventDispatch {
    listeners: Vec<Box<dyn WindowEventListener>>,
    should_close: bool,
    focused: bool,
}

impl EventDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, listener: Box<dyn WindowEventListener>) {
        self.listeners.push(listener);
    }

    pub fn check(&self, flag: WindowFlag) -> bool {
        match flag {
            WindowFlag::ShouldClose => self.should_close,
            WindowFlag::Focused => self.focused,
        }
    }

    /// Updates flags for `event` and forwards it to every listener in
    /// connection order.
    pub fn dispatch(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.should_close = true,
            WindowEvent::Focused(f) => self.focused = *f,
            _ => {}
        }

        for l in &mut self.listeners {
            match event {
                WindowEvent::Resized(size) => l.on_resize(*size),
                WindowEvent::Moved(pos) => l.on_move(*pos),
                WindowEvent::Scrolled { dx, dy } => l.on_scroll(*dx, *dy),
                WindowEvent::CloseRequested => l.on_close_requested(),
                WindowEvent::Focused(f) => l.on_focus(*f),
                WindowEvent::ScaleFactorChanged(_) => {}
            }
        }
    }

    /// Drops every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl std::fmt::Debug for EventDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatch")
            .field("listeners", &self.listeners.len())
            .field("should_close", &self.should_close)
            .field("focused", &self.focused)
            .finish()
    }
}
