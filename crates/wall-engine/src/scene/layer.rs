use std::sync::Arc;

use cgmath::Vector2;

use crate::coords::Size;
use crate::math::OrthoBounds;
use crate::resources::Texture;

/// How a background image is fitted into its layer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BackgroundOptions {
    /// Native image size, anchored at the layer's top-left corner.
    #[default]
    AsIs,
    /// Scaled to cover the whole layer.
    Stretch,
}

/// Background binding of a layer.
///
/// The asset name is kept even when no texture is resolved yet, so a later
/// fetch completion can bind it.
#[derive(Debug, Clone)]
pub struct Background {
    pub name: String,
    pub texture: Option<Arc<Texture>>,
    pub options: BackgroundOptions,
}

/// Rectangle a backend should fill with the layer background, in layer pixel space.
#[derive(Debug, Clone)]
pub struct LayerQuad<'a> {
    pub origin: Vector2<f32>,
    pub size: Vector2<f32>,
    pub texture: &'a Arc<Texture>,
}

/// 2D rectangular surface placed with an orthographic transform.
#[derive(Debug, Clone)]
pub struct Layer {
    position: Vector2<f32>,
    size: Size,
    visible: bool,
    enabled: bool,
    bounds: OrthoBounds,
    background: Option<Background>,
}

impl Layer {
    /// A visible, enabled layer covering `size`, centered on the origin.
    pub fn centered(size: Size) -> Self {
        let (w, h) = size.to_f32();
        Self {
            position: Vector2::new(-w / 2.0, -h / 2.0),
            size,
            visible: true,
            enabled: true,
            bounds: OrthoBounds::centered(w, h),
            background: None,
        }
    }

    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> &OrthoBounds {
        &self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn background_texture(&self) -> Option<&Arc<Texture>> {
        self.background.as_ref()?.texture.as_ref()
    }

    pub fn set_background(
        &mut self,
        name: impl Into<String>,
        texture: Option<Arc<Texture>>,
        options: BackgroundOptions,
    ) {
        self.background = Some(Background {
            name: name.into(),
            texture,
            options,
        });
    }

    /// Drawable background rectangle, or `None` when hidden, unresolved or
    /// empty.
    pub fn quad(&self) -> Option<LayerQuad<'_>> {
        if !self.visible {
            return None;
        }
        let background = self.background.as_ref()?;
        let texture = background.texture.as_ref()?;
        if texture.size().is_empty() {
            return None;
        }

        let size = match background.options {
            BackgroundOptions::AsIs => {
                let (w, h) = texture.size().to_f32();
                Vector2::new(w, h)
            }
            BackgroundOptions::Stretch => {
                let (w, h) = self.size.to_f32();
                Vector2::new(w, h)
            }
        };

        Some(LayerQuad {
            origin: self.position,
            size,
            texture,
        })
    }
}
