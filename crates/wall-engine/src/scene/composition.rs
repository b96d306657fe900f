use cgmath::{Point3, Vector3};
use thiserror::Error;

use super::{BackgroundOptions, Camera, Layer, NodeKind, SceneNode};
use crate::coords::Size;
use crate::paint::Color;
use crate::resources::{ResourceStore, Texture};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene already contains a node named `{0}`")]
    DuplicateNode(String),
    #[error("layer `{name}` has an empty size ({width}x{height})")]
    EmptyLayer { name: String, width: u32, height: u32 },
}

/// Named camera and layer nodes drawn by one viewport.
///
/// Nodes keep insertion order; that order is the paint order for layers.
#[derive(Debug, Clone)]
pub struct SceneComposition {
    nodes: Vec<SceneNode>,
    background: Color,
}

impl Default for SceneComposition {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneComposition {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            background: Color::black(),
        }
    }

    /// Inserts `node` after every existing node.
    pub fn add_node(&mut self, mut node: SceneNode) -> Result<&mut SceneNode, SceneError> {
        if self.node(node.name()).is_some() {
            return Err(SceneError::DuplicateNode(node.name().to_string()));
        }
        node.set_order(self.nodes.len() as u32);
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        Ok(&mut self.nodes[last])
    }

    /// Adds a right-handed look-at camera. The first camera added is the
    /// active one.
    pub fn add_camera(
        &mut self,
        name: &str,
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
    ) -> Result<(), SceneError> {
        let mut camera = Camera::look_at(position, target, up);
        camera.set_active(self.active_camera().is_none());
        self.add_node(SceneNode::camera(name, camera))?;
        log::debug!("scene: camera `{name}` added");
        Ok(())
    }

    /// Adds a visible layer covering `logical_size`, centered on the origin.
    ///
    /// `background` is looked up in `resources`; a missing asset leaves the
    /// layer without a texture but remembers the name for
    /// [`rebind_backgrounds`](Self::rebind_backgrounds).
    pub fn add_layer(
        &mut self,
        name: &str,
        background: Option<&str>,
        logical_size: Size,
        resources: &ResourceStore,
    ) -> Result<(), SceneError> {
        if logical_size.is_empty() {
            return Err(SceneError::EmptyLayer {
                name: name.to_string(),
                width: logical_size.width,
                height: logical_size.height,
            });
        }

        let mut layer = Layer::centered(logical_size);
        if let Some(asset) = background {
            let texture = resources.find::<Texture>(asset);
            if texture.is_none() {
                log::debug!("scene: layer `{name}` waits for background `{asset}`");
            }
            layer.set_background(asset, texture, BackgroundOptions::AsIs);
        }

        self.add_node(SceneNode::layer(name, layer))?;
        log::debug!(
            "scene: layer `{name}` added ({}x{})",
            logical_size.width,
            logical_size.height
        );
        Ok(())
    }

    /// Re-resolves every layer background by its remembered name.
    ///
    /// Returns how many layers changed texture.
    pub fn rebind_backgrounds(&mut self, resources: &ResourceStore) -> usize {
        let mut changed = 0;
        for layer in self.nodes.iter_mut().filter_map(SceneNode::as_layer_mut) {
            let Some(bg) = layer.background() else { continue };
            let fresh = resources.find::<Texture>(&bg.name);
            let same = match (&fresh, &bg.texture) {
                (Some(a), Some(b)) => std::sync::Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if !same {
                let (name, options) = (bg.name.clone(), bg.options);
                layer.set_background(name, fresh, options);
                changed += 1;
            }
        }
        changed
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Clear color applied before the scene is drawn.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Layer nodes in paint order.
    pub fn layers(&self) -> impl Iterator<Item = (&SceneNode, &Layer)> {
        self.nodes.iter().filter_map(|n| match n.kind() {
            NodeKind::Layer(l) => Some((n, l)),
            NodeKind::Camera(_) => None,
        })
    }

    pub fn active_camera(&self) -> Option<&Camera> {
        self.nodes
            .iter()
            .filter_map(SceneNode::as_camera)
            .find(|c| c.is_active())
    }
}
