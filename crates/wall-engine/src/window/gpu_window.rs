use std::path::Path;

use ouroboros::self_referencing;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, WindowId};

use super::{EventDispatch, Window, WindowError, WindowEvent, WindowEventListener, WindowFlag, WindowOptions};
use crate::coords::{Area, Size};
use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{
    ClearMask, LayerRenderer, RenderBackend, RenderCtx, RenderError, RenderTarget, RendererInfo,
};
use crate::scene::SceneComposition;

#[self_referencing]
struct WindowSurface {
    window: winit::window::Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// winit window with a wgpu surface; its own [`RenderBackend`].
///
/// A frame is acquired by `bind_target` and presented by `swap_buffers`.
pub struct GpuWindow {
    surface: Option<WindowSurface>,
    events: EventDispatch,
    layers: LayerRenderer,
    frame: Option<GpuFrame>,
    area: Area,
    info: RendererInfo,
}

impl GpuWindow {
    /// Opens a window and binds a GPU surface to it.
    ///
    /// A `layer.wgsl` found in `shaders_path` replaces the built-in layer shader.
    pub fn create(
        event_loop: &ActiveEventLoop,
        options: &WindowOptions,
        gpu_init: GpuInit,
        shaders_path: &Path,
    ) -> Result<Self, WindowError> {
        let mut attrs = winit::window::Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(LogicalSize::new(options.size.width, options.size.height))
            .with_position(LogicalPosition::new(options.position.x, options.position.y));
        if options.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| WindowError::Platform(e.to_string()))?;

        let surface = WindowSurfaceTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(|e| WindowError::Gpu(format!("{e:#}")))?;

        let info = renderer_info(&surface.borrow_gpu().adapter_info());

        Ok(Self {
            surface: Some(surface),
            events: EventDispatch::new(),
            layers: load_layer_renderer(shaders_path),
            frame: None,
            area: Area::default(),
            info,
        })
    }

    pub fn id(&self) -> Option<WindowId> {
        self.surface.as_ref().map(|s| s.borrow_window().id())
    }

    fn resize_surface(&mut self, size: Option<Size>) {
        let Some(surface) = self.surface.as_mut() else { return };
        let physical = match size {
            Some(s) => winit::dpi::PhysicalSize::new(s.width, s.height),
            None => surface.borrow_window().inner_size(),
        };
        surface.with_gpu_mut(|gpu| gpu.resize(physical));
    }
}

fn load_layer_renderer(shaders_path: &Path) -> LayerRenderer {
    let path = shaders_path.join("layer.wgsl");
    match std::fs::read_to_string(&path) {
        Ok(source) => {
            log::info!("using layer shader {}", path.display());
            LayerRenderer::with_shader(source)
        }
        Err(_) => {
            log::debug!("no shader override at {}; using built-in", path.display());
            LayerRenderer::new()
        }
    }
}

fn renderer_info(adapter: &wgpu::AdapterInfo) -> RendererInfo {
    RendererInfo {
        vendor: format!("{:#06x}", adapter.vendor),
        renderer: format!("{} ({:?})", adapter.name, adapter.backend),
        version: format!("{} {}", adapter.driver, adapter.driver_info)
            .trim()
            .to_string(),
        shader_version: String::from("WGSL"),
    }
}

impl RenderBackend for GpuWindow {
    fn info(&self) -> RendererInfo {
        self.info.clone()
    }

    fn bind_target(&mut self, area: Area) -> Result<(), RenderError> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(RenderError::Fatal("window destroyed".into()));
        };

        let fb: Size = surface.borrow_gpu().size().into();
        let Some(area) = area.clamped_to(fb) else {
            return Err(RenderError::FrameSkipped);
        };
        self.area = area;

        if self.frame.is_some() {
            return Ok(());
        }

        match surface.borrow_gpu().begin_frame() {
            Ok(frame) => {
                self.frame = Some(frame);
                Ok(())
            }
            Err(err) => {
                log::warn!("surface error: {err}");
                match surface.with_gpu_mut(|gpu| gpu.handle_surface_error(err)) {
                    SurfaceErrorAction::Fatal => Err(RenderError::Fatal("surface out of memory".into())),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Err(RenderError::FrameSkipped)
                    }
                }
            }
        }
    }

    fn clear(&mut self, color: Color, mask: ClearMask) {
        // Layers are painted in order without a depth buffer, so DEPTH has
        // nothing to clear.
        if !mask.contains(ClearMask::COLOR) {
            return;
        }
        let Some(frame) = self.frame.as_mut() else { return };

        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("wall clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn draw_scene(&mut self, scene: &SceneComposition) {
        let (Some(surface), Some(frame)) = (self.surface.as_ref(), self.frame.as_mut()) else {
            return;
        };
        let layers = &mut self.layers;
        let area = self.area;

        surface.with_gpu(|gpu| {
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), area);
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            layers.render(&ctx, &mut target, scene);
        });
    }
}

impl Window for GpuWindow {
    fn check(&self, flag: WindowFlag) -> bool {
        match flag {
            WindowFlag::ShouldClose if self.surface.is_none() => true,
            _ => self.events.check(flag),
        }
    }

    fn set_swap_interval(&mut self, interval: u32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.with_gpu_mut(|gpu| gpu.set_swap_interval(interval));
        }
    }

    fn renderer(&self) -> RendererInfo {
        self.info.clone()
    }

    fn renderer_mut(&mut self) -> &mut dyn RenderBackend {
        self
    }

    fn framebuffer_size(&self) -> Size {
        self.surface
            .as_ref()
            .map(|s| s.borrow_gpu().size().into())
            .unwrap_or_default()
    }

    fn scale_factor(&self) -> f64 {
        self.surface
            .as_ref()
            .map_or(1.0, |s| s.borrow_window().scale_factor())
    }

    fn swap_buffers(&mut self) {
        let (Some(surface), Some(frame)) = (self.surface.as_ref(), self.frame.take()) else {
            return;
        };
        surface.borrow_window().pre_present_notify();
        surface.borrow_gpu().submit(frame);
    }

    fn connect(&mut self, listener: Box<dyn WindowEventListener>) {
        self.events.connect(listener);
    }

    fn dispatch(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => self.resize_surface(Some(*size)),
            WindowEvent::ScaleFactorChanged(_) => self.resize_surface(None),
            _ => {}
        }
        self.events.dispatch(event);
    }

    fn destroy(&mut self) {
        // Unpresented frames hold the surface texture; release them first.
        self.frame = None;
        self.events.clear();
        if self.surface.take().is_some() {
            log::debug!("window destroyed");
        }
    }
}
