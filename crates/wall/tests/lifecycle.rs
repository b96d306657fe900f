use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use wall::{Wall, WallConfig, CLEAR_COLOR, MAIN_CAMERA, MAIN_LAYER};
use wall_engine::coords::{Area, Position, Size};
use wall_engine::core::{ApplicationState, Host, LifecycleDriver, LifecycleListener, RuntimeError};
use wall_engine::paint::Color;
use wall_engine::render::{ClearMask, RenderBackend, RenderError, RendererInfo};
use wall_engine::math::Vector2;
use wall_engine::resources::{Texture, TextureId};
use wall_engine::scene::SceneComposition;
use wall_engine::window::{
    EventDispatch, Window, WindowError, WindowEvent, WindowEventListener, WindowFlag, WindowOptions,
};

// ── mocks ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Bind(Area),
    Clear(Color, ClearMask),
    Draw { nodes: usize, background: Option<TextureId> },
    Swap,
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    framebuffer: Size,
    scale_factor: f64,
    frame_result: Option<RenderError>,
    created: Vec<WindowOptions>,
    swap_interval: Option<u32>,
    destroyed: u32,
    exits: u32,
    last_background: Option<Arc<Texture>>,
}

type SharedRef = Rc<RefCell<Shared>>;

struct MockWindow {
    shared: SharedRef,
    events: EventDispatch,
}

impl RenderBackend for MockWindow {
    fn info(&self) -> RendererInfo {
        RendererInfo {
            vendor: "test".into(),
            renderer: "mock".into(),
            version: "1".into(),
            shader_version: "none".into(),
        }
    }

    fn bind_target(&mut self, area: Area) -> Result<(), RenderError> {
        let mut s = self.shared.borrow_mut();
        s.calls.push(Call::Bind(area));
        match s.frame_result.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Color, mask: ClearMask) {
        self.shared.borrow_mut().calls.push(Call::Clear(color, mask));
    }

    fn draw_scene(&mut self, scene: &SceneComposition) {
        let background = scene
            .layers()
            .find_map(|(_, layer)| layer.background_texture().cloned());
        let mut s = self.shared.borrow_mut();
        s.calls.push(Call::Draw {
            nodes: scene.len(),
            background: background.as_ref().map(|t| t.id()),
        });
        s.last_background = background;
    }
}

impl Window for MockWindow {
    fn check(&self, flag: WindowFlag) -> bool {
        self.events.check(flag)
    }

    fn set_swap_interval(&mut self, interval: u32) {
        self.shared.borrow_mut().swap_interval = Some(interval);
    }

    fn renderer(&self) -> RendererInfo {
        self.info()
    }

    fn renderer_mut(&mut self) -> &mut dyn RenderBackend {
        self
    }

    fn framebuffer_size(&self) -> Size {
        self.shared.borrow().framebuffer
    }

    fn scale_factor(&self) -> f64 {
        self.shared.borrow().scale_factor
    }

    fn swap_buffers(&mut self) {
        self.shared.borrow_mut().calls.push(Call::Swap);
    }

    fn connect(&mut self, listener: Box<dyn WindowEventListener>) {
        self.events.connect(listener);
    }

    fn dispatch(&mut self, event: &WindowEvent) {
        self.events.dispatch(event);
    }

    fn destroy(&mut self) {
        self.shared.borrow_mut().destroyed += 1;
    }
}

struct MockHost {
    shared: SharedRef,
    shaders: PathBuf,
    exit: bool,
    fail_window: bool,
}

impl MockHost {
    fn new(framebuffer: Size) -> Self {
        let shared = Shared {
            framebuffer,
            scale_factor: 1.0,
            ..Default::default()
        };
        Self {
            shared: Rc::new(RefCell::new(shared)),
            shaders: PathBuf::from("shaders"),
            exit: false,
            fail_window: false,
        }
    }

    fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.shared.borrow_mut().calls)
    }
}

impl Host for MockHost {
    fn create_window(&mut self, options: &WindowOptions) -> Result<Box<dyn Window>, WindowError> {
        if self.fail_window {
            return Err(WindowError::Platform("no display".into()));
        }
        self.shared.borrow_mut().created.push(options.clone());
        Ok(Box::new(MockWindow {
            shared: self.shared.clone(),
            events: EventDispatch::new(),
        }))
    }

    fn shaders_path(&self) -> &Path {
        &self.shaders
    }

    fn exit(&mut self, flag: bool) {
        if flag {
            self.shared.borrow_mut().exits += 1;
        }
        self.exit = flag;
    }

    fn exit_requested(&self) -> bool {
        self.exit
    }

    fn poll_events(&mut self) {}
}

// ── fixtures ──────────────────────────────────────────────────────────────

/// Media directory with `images/wall.png`.
fn media_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("images")).unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]))
        .save(dir.path().join("images/wall.png"))
        .unwrap();
    dir
}

fn settings(media: &Path) -> WallConfig {
    WallConfig {
        media_path: media.to_path_buf(),
        background: PathBuf::from("images/wall.png"),
        ..WallConfig::default()
    }
}

fn started(settings: WallConfig, host: &mut MockHost) -> LifecycleDriver<Wall> {
    let mut driver = LifecycleDriver::new(Wall::new(settings));
    assert_eq!(driver.start(host), Ok(ApplicationState::Running));
    driver
}

/// Ticks until `done` holds, giving fetch workers time to deliver.
fn tick_until(
    driver: &mut LifecycleDriver<Wall>,
    host: &mut MockHost,
    done: impl Fn(&Wall) -> bool,
) {
    for _ in 0..400 {
        driver.tick(host).unwrap();
        if done(driver.listener()) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("condition not reached");
}

fn layer_background(wall: &Wall) -> Option<Arc<Texture>> {
    let viewport = wall.viewport()?;
    let (_, layer) = viewport.scene().layers().next()?;
    layer.background_texture().cloned()
}

// ── start ─────────────────────────────────────────────────────────────────

#[test]
fn start_builds_camera_and_background_layer() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(2048, 1536));
    let driver = started(settings(media.path()), &mut host);
    let wall = driver.listener();

    let scene = wall.viewport().unwrap().scene();
    let names: Vec<&str> = scene.nodes().map(|n| n.name()).collect();
    assert_eq!(names, vec![MAIN_CAMERA, MAIN_LAYER]);

    let stored = wall.resources().find::<Texture>("wall").unwrap();
    assert!(Arc::ptr_eq(&layer_background(wall).unwrap(), &stored));

    let layer = scene.node(MAIN_LAYER).and_then(|n| n.as_layer()).unwrap();
    assert_eq!(layer.size(), Size::new(1024, 768));
    assert_eq!(layer.position(), Vector2::new(-512.0, -384.0));

    let shared = host.shared.borrow();
    assert_eq!(shared.swap_interval, Some(1));
    assert_eq!(shared.created.len(), 1);
    assert_eq!(shared.created[0].title, "Map Application");
    assert_eq!(shared.created[0].size, Size::new(1024, 768));
}

#[test]
fn first_frame_draws_over_reported_framebuffer() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(2048, 1536));
    let mut driver = started(settings(media.path()), &mut host);

    assert_eq!(driver.tick(&mut host), Ok(ApplicationState::Running));

    let wall_id = driver
        .listener()
        .resources()
        .find::<Texture>("wall")
        .map(|t| t.id());
    assert_eq!(
        host.take_calls(),
        vec![
            Call::Bind(Area::new(0, 0, 2048, 1536)),
            Call::Clear(CLEAR_COLOR, ClearMask::COLOR | ClearMask::DEPTH),
            Call::Draw { nodes: 2, background: wall_id },
            Call::Swap,
        ]
    );
    assert_eq!(
        driver.listener().window_config().framebuffer_size,
        Size::new(2048, 1536)
    );
}

#[test]
fn framebuffer_size_is_first_set_by_a_frame() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(2048, 1536));
    let mut driver = started(settings(media.path()), &mut host);
    assert!(driver.listener().window_config().framebuffer_size.is_empty());

    driver.tick(&mut host).unwrap();
    assert_eq!(
        driver.listener().window_config().framebuffer_size,
        Size::new(2048, 1536)
    );
}

#[test]
fn framebuffer_is_reread_every_frame() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(800, 600));
    let mut driver = started(settings(media.path()), &mut host);

    driver.tick(&mut host).unwrap();
    host.shared.borrow_mut().framebuffer = Size::new(1600, 1200);
    host.take_calls();
    driver.tick(&mut host).unwrap();

    assert_eq!(host.take_calls()[0], Call::Bind(Area::new(0, 0, 1600, 1200)));
    // Projection is fixed at start.
    let projection = *driver.listener().viewport().unwrap().projection();
    let expected = wall_engine::math::perspective_fov(
        wall_engine::math::Deg(45.0),
        1024.0,
        768.0,
        0.1,
        500.0,
    );
    assert_eq!(projection, expected);
}

#[test]
fn repeated_ticks_are_identical() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(media.path()), &mut host);

    let mut frames = Vec::new();
    for _ in 0..3 {
        driver.tick(&mut host).unwrap();
        frames.push(host.take_calls());
    }
    assert_eq!(frames[0], frames[1]);
    assert_eq!(frames[1], frames[2]);
    assert_eq!(driver.listener().viewport().unwrap().area(), Area::new(0, 0, 640, 480));
}

#[test]
fn missing_background_degrades_by_default() {
    let empty = tempfile::tempdir().unwrap();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(empty.path()), &mut host);

    assert!(layer_background(driver.listener()).is_none());
    driver.tick(&mut host).unwrap();
    assert!(host
        .take_calls()
        .contains(&Call::Draw { nodes: 2, background: None }));
}

#[test]
fn missing_background_can_abort_start() {
    let empty = tempfile::tempdir().unwrap();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = LifecycleDriver::new(Wall::new(WallConfig {
        abort_on_missing_background: true,
        ..settings(empty.path())
    }));

    assert_eq!(driver.start(&mut host), Ok(ApplicationState::Error));
    assert!(driver.listener().viewport().is_none());
    assert!(driver.listener().window().is_none());
}

#[test]
fn empty_logical_size_fails_start() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = LifecycleDriver::new(Wall::new(WallConfig {
        size: [0, 768],
        ..settings(media.path())
    }));

    assert_eq!(driver.start(&mut host), Ok(ApplicationState::Error));
    assert!(host.shared.borrow().created.is_empty());
    assert!(driver.listener().viewport().is_none());
}

#[test]
fn window_failure_fails_start() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    host.fail_window = true;
    let mut driver = LifecycleDriver::new(Wall::new(settings(media.path())));

    assert_eq!(driver.start(&mut host), Ok(ApplicationState::Error));
    assert_eq!(driver.tick(&mut host), Ok(ApplicationState::Error));
    assert!(host.take_calls().is_empty());
}

// ── frame errors ──────────────────────────────────────────────────────────

#[test]
fn skipped_frame_draws_nothing_and_keeps_running() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(media.path()), &mut host);

    host.shared.borrow_mut().frame_result = Some(RenderError::FrameSkipped);
    assert_eq!(driver.tick(&mut host), Ok(ApplicationState::Running));
    assert_eq!(host.take_calls(), vec![Call::Bind(Area::new(0, 0, 640, 480))]);
}

#[test]
fn fatal_frame_error_stops_the_application() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(media.path()), &mut host);

    host.shared.borrow_mut().frame_result = Some(RenderError::Fatal("device lost".into()));
    assert_eq!(driver.tick(&mut host), Ok(ApplicationState::Error));

    let errors: Vec<&RuntimeError> = driver.listener().errors().collect();
    assert_eq!(errors, vec![&RuntimeError::new(RuntimeError::RENDER, "device lost")]);
}

// ── close / dispose ───────────────────────────────────────────────────────

#[test]
fn close_request_signals_exit_once_without_drawing() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(media.path()), &mut host);
    driver.tick(&mut host).unwrap();
    host.take_calls();

    driver.window_event(&WindowEvent::CloseRequested);
    assert_eq!(driver.tick(&mut host), Ok(ApplicationState::Finalizing));
    assert!(host.take_calls().is_empty());

    // A stray extra step still signals only once.
    driver.listener_mut().on_run(&mut host).unwrap();
    assert_eq!(host.shared.borrow().exits, 1);

    assert_eq!(driver.finalize(&mut host), Ok(ApplicationState::Finalized));
    assert_eq!(host.shared.borrow().destroyed, 1);
    assert!(driver.listener().viewport().is_none());
}

#[test]
fn dispose_twice_is_a_no_op() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(media.path()), &mut host);

    assert!(driver.listener_mut().dispose().is_ok());
    assert!(driver.listener_mut().dispose().is_ok());
    assert_eq!(host.shared.borrow().destroyed, 1);

    drop(driver);
    assert_eq!(host.shared.borrow().destroyed, 1);
}

#[test]
fn dropping_a_started_app_releases_the_window() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let driver = started(settings(media.path()), &mut host);

    drop(driver);
    assert_eq!(host.shared.borrow().destroyed, 1);
}

// ── window events ─────────────────────────────────────────────────────────

#[test]
fn move_updates_position_and_resize_keeps_projection() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(settings(media.path()), &mut host);
    let before = *driver.listener().viewport().unwrap().projection();

    driver.window_event(&WindowEvent::Moved(Position::new(30, -4)));
    driver.window_event(&WindowEvent::Resized(Size::new(300, 200)));
    driver.window_event(&WindowEvent::Scrolled { dx: 0.0, dy: 1.0 });

    assert_eq!(driver.listener().window_config().position, Position::new(30, -4));
    assert_eq!(*driver.listener().viewport().unwrap().projection(), before);
    assert_eq!(driver.state(), ApplicationState::Running);
}

#[test]
fn move_is_stored_in_logical_pixels() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    host.shared.borrow_mut().scale_factor = 2.0;
    let mut driver = started(settings(media.path()), &mut host);

    driver.window_event(&WindowEvent::Moved(Position::new(60, -8)));
    assert_eq!(driver.listener().window_config().position, Position::new(30, -4));
}

// ── async fetch ───────────────────────────────────────────────────────────

#[test]
fn fetched_background_is_bound_after_drain() {
    let media = media_dir();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(
        WallConfig {
            async_background: true,
            ..settings(media.path())
        },
        &mut host,
    );

    tick_until(&mut driver, &mut host, |wall| layer_background(wall).is_some());

    let wall = driver.listener();
    let stored = wall.resources().find::<Texture>("wall").unwrap();
    assert!(Arc::ptr_eq(&layer_background(wall).unwrap(), &stored));
    assert_eq!(wall.errors().count(), 0);
}

#[test]
fn failed_download_is_reported() {
    let empty = tempfile::tempdir().unwrap();
    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(
        WallConfig {
            async_background: true,
            ..settings(empty.path())
        },
        &mut host,
    );

    tick_until(&mut driver, &mut host, |wall| wall.errors().next().is_some());

    let wall = driver.listener();
    let error = wall.errors().next().unwrap();
    assert_eq!(error.code, RuntimeError::DOWNLOAD);
    assert!(error.description.contains("wall"), "{}", error.description);
    assert!(layer_background(wall).is_none());
    assert_eq!(driver.state(), ApplicationState::Running);
}

#[test]
fn undecodable_download_is_reported() {
    let media = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(media.path().join("images")).unwrap();
    std::fs::write(media.path().join("images/wall.png"), b"not an image").unwrap();

    let mut host = MockHost::new(Size::new(640, 480));
    let mut driver = started(
        WallConfig {
            async_background: true,
            ..settings(media.path())
        },
        &mut host,
    );

    tick_until(&mut driver, &mut host, |wall| wall.errors().next().is_some());
    assert_eq!(
        driver.listener().errors().next().unwrap().code,
        RuntimeError::DECODE
    );
}
