use cgmath::{Matrix4, SquareMatrix};

use super::{Camera, Layer};

#[derive(Debug, Clone)]
pub enum NodeKind {
    Camera(Camera),
    Layer(Layer),
}

/// Named scene node owning its model matrix.
///
/// `order` is the insertion index within the composition and defines paint
/// order for layers (lower first).
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    order: u32,
    model: Matrix4<f32>,
    kind: NodeKind,
}

impl SceneNode {
    pub fn camera(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            order: 0,
            model: Matrix4::identity(),
            kind: NodeKind::Camera(camera),
        }
    }

    /// Layer node whose model matrix is the layer's orthographic volume.
    pub fn layer(name: impl Into<String>, layer: Layer) -> Self {
        let model = layer.bounds().matrix();
        Self {
            name: name.into(),
            order: 0,
            model,
            kind: NodeKind::Layer(layer),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub(super) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    pub fn model_matrix(&self) -> &Matrix4<f32> {
        &self.model
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(c) => Some(c),
            NodeKind::Layer(_) => None,
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match &self.kind {
            NodeKind::Layer(l) => Some(l),
            NodeKind::Camera(_) => None,
        }
    }

    pub fn as_layer_mut(&mut self) -> Option<&mut Layer> {
        match &mut self.kind {
            NodeKind::Layer(l) => Some(l),
            NodeKind::Camera(_) => None,
        }
    }
}
