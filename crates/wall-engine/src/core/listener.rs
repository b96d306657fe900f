use super::{FinalizeError, Host, InitError, RuntimeError};
use crate::window::WindowEvent;

/// Application callbacks sequenced by [`LifecycleDriver`](super::LifecycleDriver).
///
/// Order: `on_initialize` → `on_initialized` → `on_run`* → `on_finalize` →
/// `on_finalized`. Each failing step gets its matching `*_error` callback
/// instead of the success one.
pub trait LifecycleListener {
    fn on_initialize(&mut self, host: &mut dyn Host) -> Result<(), InitError>;

    fn on_initialized(&mut self, host: &mut dyn Host) {
        let _ = host;
    }

    /// One steady-state tick.
    fn on_run(&mut self, host: &mut dyn Host) -> Result<(), RuntimeError>;

    /// Window events arriving between ticks.
    fn on_window_event(&mut self, event: &WindowEvent) {
        let _ = event;
    }

    fn on_finalize(&mut self, host: &mut dyn Host) -> Result<(), FinalizeError>;

    fn on_finalized(&mut self) {}

    fn on_initialize_error(&mut self, error: &InitError) {
        let _ = error;
    }

    fn on_error(&mut self, code: i32, description: &str) {
        let _ = (code, description);
    }

    fn on_finalize_error(&mut self, error: &FinalizeError) {
        let _ = error;
    }
}
