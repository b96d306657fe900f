use bitflags::bitflags;
use thiserror::Error;

use crate::coords::Area;
use crate::paint::Color;
use crate::scene::SceneComposition;

bitflags! {
    /// Buffers touched by [`RenderBackend::clear`].
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ClearMask: u8 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Diagnostic strings describing the active renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shader_version: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Transient surface condition; the caller should skip this frame.
    #[error("frame skipped")]
    FrameSkipped,
    #[error("fatal render error: {0}")]
    Fatal(String),
}

/// Per-frame drawing interface driven by the viewport.
///
/// Call order within a frame: `bind_target`, then any number of `clear` and
/// `draw_scene` calls. Presentation belongs to the window.
pub trait RenderBackend {
    fn info(&self) -> RendererInfo;

    /// Makes `area` the active draw region for the next commands.
    fn bind_target(&mut self, area: Area) -> Result<(), RenderError>;

    fn clear(&mut self, color: Color, mask: ClearMask);

    /// Draws every visible layer of `scene` in paint order.
    fn draw_scene(&mut self, scene: &SceneComposition);
}
