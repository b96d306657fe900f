//! Windows: the platform-neutral contract plus the winit/wgpu implementation
//! and the event-loop runtime that hosts an application.

mod contract;
mod events;
mod gpu_window;
mod runtime;

pub use contract::{Window, WindowError, WindowFlag, WindowOptions};
pub use events::{EventDispatch, WindowEvent, WindowEventListener};
pub use gpu_window::GpuWindow;
pub use runtime::{Runtime, RuntimeConfig};
