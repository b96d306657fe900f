//! Rendering.
//!
//! [`RenderBackend`] is the seam the viewport drives once per frame
//! (bind target, clear, draw scene). The wgpu implementation lives on the
//! window; [`LayerRenderer`] owns the GPU resources for textured layers.
//!
//! Convention:
//! - layer geometry is in layer pixels (top-left origin, +Y down)
//! - each layer's model matrix maps its pixel volume to OpenGL clip space,
//!   remapped to wgpu depth as the last step

mod backend;
mod ctx;
mod layer;

pub use backend::{ClearMask, RenderBackend, RenderError, RendererInfo};
pub use ctx::{RenderCtx, RenderTarget};
pub use layer::{layer_transform, LayerRenderer, DEFAULT_LAYER_SHADER};
