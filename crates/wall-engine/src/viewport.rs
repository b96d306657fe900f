//! Viewport: one scene composition plus its projection and draw area.

use cgmath::Matrix4;

use crate::coords::Area;
use crate::render::{ClearMask, RenderBackend, RenderError};
use crate::scene::SceneComposition;

/// Owns a [`SceneComposition`] and forwards per-frame work to a backend.
///
/// The projection is fixed at construction; resizing the window only changes
/// the draw area.
#[derive(Debug)]
pub struct ViewportController {
    scene: SceneComposition,
    projection: Matrix4<f32>,
    area: Area,
}

impl ViewportController {
    pub fn new(scene: SceneComposition, projection: Matrix4<f32>) -> Self {
        Self {
            scene,
            projection,
            area: Area::default(),
        }
    }

    pub fn set_area(&mut self, area: Area) {
        self.area = area;
    }

    pub fn area(&self) -> Area {
        self.area
    }

    /// Binds the draw area as the active render target.
    pub fn use_target(&self, backend: &mut dyn RenderBackend) -> Result<(), RenderError> {
        backend.bind_target(self.area)
    }

    /// Clears the buffers in `mask` with the scene's background color.
    pub fn clear_buffer(&self, backend: &mut dyn RenderBackend, mask: ClearMask) {
        backend.clear(self.scene.background(), mask);
    }

    pub fn render(&self, backend: &mut dyn RenderBackend) {
        backend.draw_scene(&self.scene);
    }

    pub fn scene(&self) -> &SceneComposition {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneComposition {
        &mut self.scene
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }
}

#[cfg(test)]
mod tests {
    use cgmath::SquareMatrix;

    use super::*;
    use crate::paint::Color;
    use crate::render::RendererInfo;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        skip: bool,
    }

    impl RenderBackend for Recorder {
        fn info(&self) -> RendererInfo {
            RendererInfo::default()
        }

        fn bind_target(&mut self, area: Area) -> Result<(), RenderError> {
            self.calls.push(format!("bind {}x{}", area.width, area.height));
            if self.skip {
                Err(RenderError::FrameSkipped)
            } else {
                Ok(())
            }
        }

        fn clear(&mut self, color: Color, mask: ClearMask) {
            self.calls.push(format!("clear {:?} {:?}", color.to_array(), mask));
        }

        fn draw_scene(&mut self, scene: &SceneComposition) {
            self.calls.push(format!("draw {}", scene.len()));
        }
    }

    #[test]
    fn delegates_in_call_order() {
        let mut scene = SceneComposition::new();
        scene.set_background(Color::new(0.2, 0.2, 0.2, 0.0));
        let mut vp = ViewportController::new(scene, Matrix4::identity());
        vp.set_area(Area::new(0, 0, 640, 480));

        let mut backend = Recorder::default();
        vp.use_target(&mut backend).unwrap();
        vp.clear_buffer(&mut backend, ClearMask::COLOR | ClearMask::DEPTH);
        vp.render(&mut backend);

        assert_eq!(backend.calls.len(), 3);
        assert_eq!(backend.calls[0], "bind 640x480");
        assert!(backend.calls[1].starts_with("clear [0.2, 0.2, 0.2, 0.0]"));
        assert_eq!(backend.calls[2], "draw 0");
    }

    #[test]
    fn skipped_target_is_reported() {
        let vp = ViewportController::new(SceneComposition::new(), Matrix4::identity());
        let mut backend = Recorder { skip: true, ..Default::default() };
        assert_eq!(vp.use_target(&mut backend), Err(RenderError::FrameSkipped));
    }

    #[test]
    fn area_defaults_to_empty() {
        let vp = ViewportController::new(SceneComposition::new(), Matrix4::identity());
        assert!(vp.area().is_empty());
        assert_eq!(*vp.projection(), Matrix4::identity());
    }
}
