use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::{MouseScrollDelta, WindowEvent as WinitEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use super::{GpuWindow, Window, WindowError, WindowEvent, WindowOptions};
use crate::coords::{Position, Size};
use crate::core::{ApplicationState, Host, LifecycleDriver, LifecycleListener};
use crate::device::GpuInit;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory searched for shader overrides.
    pub shaders_path: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            shaders_path: PathBuf::from("./resources/shaders/"),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `listener` on a winit event loop until it finalizes or fails.
    ///
    /// The listener is initialized on the first `resumed`, ticked whenever
    /// the loop is about to wait, and finalized once it requests exit (or the
    /// platform ends the loop). Returns the final lifecycle state.
    pub fn run<L>(config: RuntimeConfig, gpu_init: GpuInit, listener: L) -> Result<ApplicationState>
    where
        L: LifecycleListener + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState {
            config,
            gpu_init,
            driver: LifecycleDriver::new(listener),
            exit: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(state.driver.state())
    }
}

/// [`Host`] view of the active event loop, valid for one callback.
struct WinitHost<'a> {
    event_loop: &'a ActiveEventLoop,
    gpu_init: &'a GpuInit,
    shaders_path: &'a Path,
    exit: &'a mut bool,
}

impl Host for WinitHost<'_> {
    fn create_window(&mut self, options: &WindowOptions) -> Result<Box<dyn Window>, WindowError> {
        let window = GpuWindow::create(
            self.event_loop,
            options,
            self.gpu_init.clone(),
            self.shaders_path,
        )?;
        Ok(Box::new(window))
    }

    fn shaders_path(&self) -> &Path {
        self.shaders_path
    }

    fn exit(&mut self, flag: bool) {
        *self.exit = flag;
    }

    fn exit_requested(&self) -> bool {
        *self.exit
    }

    fn poll_events(&mut self) {}
}

struct RuntimeState<L> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    driver: LifecycleDriver<L>,
    exit: bool,
}

impl<L: LifecycleListener> RuntimeState<L> {
    /// Runs `f` with a host borrowing this state's fields.
    fn with_host<R>(
        &mut self,
        event_loop: &ActiveEventLoop,
        f: impl FnOnce(&mut LifecycleDriver<L>, &mut dyn Host) -> R,
    ) -> R {
        let mut host = WinitHost {
            event_loop,
            gpu_init: &self.gpu_init,
            shaders_path: &self.config.shaders_path,
            exit: &mut self.exit,
        };
        f(&mut self.driver, &mut host)
    }

    fn finalize(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.with_host(event_loop, |d, host| d.finalize(host)) {
            log::error!("{e}");
        }
    }
}

impl<L: LifecycleListener> ApplicationHandler for RuntimeState<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.state() != ApplicationState::Uninitialized {
            return;
        }

        match self.with_host(event_loop, |d, host| d.start(host)) {
            Ok(ApplicationState::Running) => log::info!("application running"),
            Ok(state) => {
                log::error!("application failed to start ({state})");
                event_loop.exit();
            }
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WinitEvent) {
        if let Some(ev) = translate_window_event(&event) {
            self.driver.window_event(&ev);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);

        let state = match self.with_host(event_loop, |d, host| d.tick(host)) {
            Ok(state) => state,
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
                return;
            }
        };

        if state == ApplicationState::Finalizing {
            self.finalize(event_loop);
        }
        if self.driver.state().is_terminal() {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        if matches!(
            self.driver.state(),
            ApplicationState::Running | ApplicationState::Finalizing
        ) {
            self.finalize(event_loop);
        }
        log::info!("event loop exiting ({})", self.driver.state());
    }
}

fn translate_window_event(event: &WinitEvent) -> Option<WindowEvent> {
    match event {
        WinitEvent::Resized(size) => Some(WindowEvent::Resized(Size::from(*size))),
        WinitEvent::Moved(pos) => Some(WindowEvent::Moved(Position::new(pos.x, pos.y))),
        WinitEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x as f64, *y as f64),
                MouseScrollDelta::PixelDelta(p) => (p.x, p.y),
            };
            Some(WindowEvent::Scrolled { dx, dy })
        }
        WinitEvent::CloseRequested => Some(WindowEvent::CloseRequested),
        WinitEvent::Focused(f) => Some(WindowEvent::Focused(*f)),
        WinitEvent::ScaleFactorChanged { scale_factor, .. } => {
            Some(WindowEvent::ScaleFactorChanged(*scale_factor))
        }
        _ => None,
    }
}
