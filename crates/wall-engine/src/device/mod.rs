//! Device and window surface for the wgpu renderer.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::{present_mode_for_interval, SurfaceErrorAction};
