//! Color representation shared by the scene and the render backends.

mod color;

pub use color::Color;
