use std::path::Path;

use crate::window::{Window, WindowError, WindowOptions};

/// Services the platform runtime offers to lifecycle callbacks.
pub trait Host {
    fn create_window(&mut self, options: &WindowOptions) -> Result<Box<dyn Window>, WindowError>;

    /// Directory searched for shader overrides.
    fn shaders_path(&self) -> &Path;

    /// Records whether the application wants to stop. The runtime acts on it
    /// after the current tick.
    fn exit(&mut self, flag: bool);

    fn exit_requested(&self) -> bool;

    /// Pumps pending platform events.
    ///
    /// Event-loop runtimes deliver events between ticks on their own; for
    /// them this is a no-op.
    fn poll_events(&mut self);
}
