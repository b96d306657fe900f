//! Coordinate and size types shared by the window, viewport and scene layers.
//!
//! Window-facing values are integral (pixels, screen positions). Scene-space
//! values are `f32` and live in `scene` / `math`.

mod area;
mod position;
mod size;

pub use area::Area;
pub use position::Position;
pub use size::Size;
