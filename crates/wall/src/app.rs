use std::collections::VecDeque;

use wall_engine::coords::{Area, Size};
use wall_engine::core::{FinalizeError, Host, InitError, LifecycleListener, RuntimeError};
use wall_engine::math::{self, Deg, Point3, Vector3};
use wall_engine::paint::Color;
use wall_engine::render::{ClearMask, RenderError};
use wall_engine::resources::{
    MainThreadMessage, MainThreadQueue, ResourceError, ResourceFetchSink, ResourceStore,
    ResourcesFetcher, Texture,
};
use wall_engine::scene::{SceneComposition, SceneError};
use wall_engine::viewport::ViewportController;
use wall_engine::window::{Window, WindowEvent, WindowEventListener, WindowFlag};

use crate::config::{WallConfig, WindowConfig};

pub const MAIN_CAMERA: &str = "MainCamera";
pub const MAIN_LAYER: &str = "Layer1";

/// Clear color applied every frame.
pub const CLEAR_COLOR: Color = Color::new(0.2, 0.2, 0.2, 0.0);

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 500.0;

/// Oldest entries are dropped past this many recorded errors.
const ERROR_LOG_CAPACITY: usize = 64;

/// What a successful start hands over to the application.
pub struct ApplicationHandles {
    pub window: Box<dyn Window>,
    pub viewport: ViewportController,
}

/// Logs scroll input; extension point for zoom/pan.
#[derive(Debug, Default)]
pub struct ScrollLogger;

impl WindowEventListener for ScrollLogger {
    fn on_scroll(&mut self, dx: f64, dy: f64) {
        log::info!("scroll ({dx}, {dy})");
    }
}

/// Full-window background viewer.
pub struct Wall {
    settings: WallConfig,
    config: WindowConfig,
    window: Option<Box<dyn Window>>,
    viewport: Option<ViewportController>,
    resources: ResourceStore,
    messages: MainThreadQueue,
    fetcher: Option<ResourcesFetcher>,
    errors: VecDeque<RuntimeError>,
    exit_signalled: bool,
}

impl Wall {
    pub fn new(settings: WallConfig) -> Self {
        let config = WindowConfig::from(&settings);
        Self {
            settings,
            config,
            window: None,
            viewport: None,
            resources: ResourceStore::new(),
            messages: MainThreadQueue::new(),
            fetcher: None,
            errors: VecDeque::new(),
            exit_signalled: false,
        }
    }

    pub fn settings(&self) -> &WallConfig {
        &self.settings
    }

    pub fn window_config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<&ViewportController> {
        self.viewport.as_ref()
    }

    pub fn window(&self) -> Option<&dyn Window> {
        self.window.as_deref()
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    /// Queue drained during every frame step. Its sender may be handed to
    /// other background producers.
    pub fn messages(&self) -> &MainThreadQueue {
        &self.messages
    }

    /// Recorded runtime errors, oldest first.
    pub fn errors(&self) -> impl Iterator<Item = &RuntimeError> {
        self.errors.iter()
    }

    /// Creates the window and viewport, loads the background and builds the
    /// scene (one camera, one layer).
    pub fn start(&mut self, host: &mut dyn Host) -> Result<ApplicationHandles, InitError> {
        let logical = self.config.logical_size;
        if logical.is_empty() {
            return Err(SceneError::EmptyLayer {
                name: MAIN_LAYER.to_string(),
                width: logical.width,
                height: logical.height,
            }
            .into());
        }

        let mut window = host
            .create_window(&self.settings.window_options())
            .map_err(|e| InitError::AllocationFailure {
                component: "window",
                reason: e.to_string(),
            })?;

        window.connect(Box::new(ScrollLogger));
        window.set_swap_interval(1);

        let info = window.renderer();
        log::info!("vendor: {}", info.vendor);
        log::info!("renderer: {}", info.renderer);
        log::info!("version: {}", info.version);
        log::info!("shading language: {}", info.shader_version);

        let (w, h) = logical.to_f32();
        let projection = math::perspective_fov(Deg(FOV_Y_DEGREES), w, h, Z_NEAR, Z_FAR);

        self.load_background()?;

        let mut scene = SceneComposition::new();
        scene.add_camera(
            MAIN_CAMERA,
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )?;
        scene.add_layer(
            MAIN_LAYER,
            Some(self.settings.background_name.as_str()),
            logical,
            &self.resources,
        )?;

        Ok(ApplicationHandles {
            window,
            viewport: ViewportController::new(scene, projection),
        })
    }

    fn load_background(&mut self) -> Result<(), InitError> {
        let name = self.settings.background_name.clone();
        let relative = &self.settings.background;

        if self.settings.async_background {
            let fetcher = self.fetcher.as_ref().ok_or(ResourceError::FetcherClosed)?;
            fetcher.fetch(name, relative)?;
            return Ok(());
        }

        let path = self.settings.media_path.join(relative);
        match self.resources.load::<Texture>(&name, &path) {
            Ok(texture) => {
                let Size { width, height } = texture.size();
                log::info!("background `{name}` loaded ({width}x{height})");
                Ok(())
            }
            Err(e) if self.settings.abort_on_missing_background => Err(e.into()),
            Err(e) => {
                log::warn!("running without background: {e}");
                Ok(())
            }
        }
    }

    /// One steady-state frame.
    fn step(&mut self, host: &mut dyn Host) -> Result<(), RuntimeError> {
        let (Some(window), Some(viewport)) = (self.window.as_mut(), self.viewport.as_mut()) else {
            return Err(RuntimeError::new(RuntimeError::RENDER, "application is not started"));
        };

        if window.check(WindowFlag::ShouldClose) {
            if !self.exit_signalled {
                log::info!("close requested");
                host.exit(true);
                self.exit_signalled = true;
            }
            return Ok(());
        }

        let fb = window.framebuffer_size();
        self.config.framebuffer_size = fb;
        viewport.set_area(Area::from_size(fb));

        match viewport.use_target(window.renderer_mut()) {
            Ok(()) => {
                viewport.scene_mut().set_background(CLEAR_COLOR);
                viewport.clear_buffer(window.renderer_mut(), ClearMask::COLOR | ClearMask::DEPTH);
                viewport.render(window.renderer_mut());
                window.swap_buffers();
            }
            Err(RenderError::FrameSkipped) => log::trace!("frame skipped"),
            Err(RenderError::Fatal(reason)) => {
                return Err(RuntimeError::new(RuntimeError::RENDER, reason));
            }
        }

        self.drain_messages();
        host.poll_events();
        Ok(())
    }

    /// Applies fetch completions and posted errors.
    fn drain_messages(&mut self) {
        let mut sink = ResourceFetchSink::new(&mut self.resources);
        let rest = self.messages.drain_into(&mut sink);
        let report = sink.finish();

        if !report.attached.is_empty() {
            if let Some(viewport) = self.viewport.as_mut() {
                let rebound = viewport.scene_mut().rebind_backgrounds(&self.resources);
                log::debug!("{rebound} layer(s) rebound after {:?}", report.attached);
            }
        }

        for failure in report.failures {
            let code = match &failure {
                ResourceError::DownloadFailed { .. } => RuntimeError::DOWNLOAD,
                _ => RuntimeError::DECODE,
            };
            self.on_error(code, &failure.to_string());
        }

        for message in rest {
            if let MainThreadMessage::Error { code, description } = message {
                self.on_error(code, &description);
            }
        }
    }

    /// Destroys the window, drops the viewport and joins the fetch workers.
    /// Safe to call more than once.
    pub fn dispose(&mut self) -> Result<(), FinalizeError> {
        if let Some(mut window) = self.window.take() {
            window.destroy();
        }
        if self.viewport.take().is_some() {
            log::debug!("viewport released");
        }
        if let Some(fetcher) = self.fetcher.take() {
            fetcher.finalize().map_err(|e| FinalizeError::Release {
                component: "resource fetcher",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl LifecycleListener for Wall {
    fn on_initialize(&mut self, host: &mut dyn Host) -> Result<(), InitError> {
        let fetcher = ResourcesFetcher::new(
            &self.settings.media_path,
            self.settings.fetch_workers,
            self.messages.sender(),
        )
        .map_err(|e| InitError::AllocationFailure {
            component: "resource fetcher",
            reason: e.to_string(),
        })?;
        self.fetcher = Some(fetcher);

        let handles = self.start(host)?;
        self.window = Some(handles.window);
        self.viewport = Some(handles.viewport);
        Ok(())
    }

    fn on_initialized(&mut self, _host: &mut dyn Host) {
        let nodes = self.viewport.as_ref().map_or(0, |v| v.scene().len());
        log::info!("initialized ({nodes} scene nodes)");
    }

    fn on_run(&mut self, host: &mut dyn Host) -> Result<(), RuntimeError> {
        self.step(host)
    }

    fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Moved(position) => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.config.position = position.to_logical(scale);
            }
            WindowEvent::Resized(size) => {
                // Projection stays as built at start.
                log::debug!("resized to {}x{}", size.width, size.height);
            }
            _ => {}
        }
        if let Some(window) = self.window.as_mut() {
            window.dispatch(event);
        }
    }

    fn on_finalize(&mut self, _host: &mut dyn Host) -> Result<(), FinalizeError> {
        self.dispose()
    }

    fn on_finalized(&mut self) {
        log::info!("finalized");
    }

    fn on_initialize_error(&mut self, error: &InitError) {
        log::error!("start failed: {error}");
        if let Err(e) = self.dispose() {
            log::warn!("{e}");
        }
    }

    fn on_error(&mut self, code: i32, description: &str) {
        log::warn!("error {code}: {description}");
        if self.errors.len() == ERROR_LOG_CAPACITY {
            self.errors.pop_front();
        }
        self.errors.push_back(RuntimeError::new(code, description));
    }

    fn on_finalize_error(&mut self, error: &FinalizeError) {
        log::error!("{error}");
    }
}

impl Drop for Wall {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            log::warn!("{e}");
        }
    }
}
