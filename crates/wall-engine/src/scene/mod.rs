//! Scene composition: named camera and layer nodes for one viewport.
//!
//! Responsibilities:
//! - own every node and its model matrix
//! - keep paint order deterministic (insertion order, no depth test)
//! - resolve layer backgrounds against the resource store

mod camera;
mod composition;
mod layer;
mod node;

pub use camera::Camera;
pub use composition::{SceneComposition, SceneError};
pub use layer::{Background, BackgroundOptions, Layer, LayerQuad};
pub use node::{NodeKind, SceneNode};
