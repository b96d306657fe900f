use super::{ApplicationState, Host, LifecycleEvent, LifecycleListener, StateError};
use crate::window::WindowEvent;

/// Owns the lifecycle state and sequences listener callbacks.
///
/// Every state change goes through [`ApplicationState::next`]; the driver
/// never moves to a state the lifecycle graph does not allow.
#[derive(Debug)]
pub struct LifecycleDriver<L> {
    state: ApplicationState,
    listener: L,
    ticks: u64,
}

impl<L: LifecycleListener> LifecycleDriver<L> {
    pub fn new(listener: L) -> Self {
        Self {
            state: ApplicationState::Uninitialized,
            listener,
            ticks: 0,
        }
    }

    pub fn state(&self) -> ApplicationState {
        self.state
    }

    /// Number of `on_run` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn advance(&mut self, event: LifecycleEvent) -> Result<ApplicationState, StateError> {
        let next = self.state.next(event)?;
        log::debug!("lifecycle: {} --{}--> {}", self.state, event, next);
        self.state = next;
        Ok(next)
    }

    /// Initializes the listener: `Uninitialized` → `Running` or `Error`.
    pub fn start(&mut self, host: &mut dyn Host) -> Result<ApplicationState, StateError> {
        self.advance(LifecycleEvent::Start)?;

        match self.listener.on_initialize(host) {
            Ok(()) => {
                self.advance(LifecycleEvent::Initialized)?;
                self.listener.on_initialized(host);
            }
            Err(err) => {
                log::error!("initialization failed: {err}");
                self.listener.on_initialize_error(&err);
                self.advance(LifecycleEvent::InitializeFailed)?;
            }
        }

        Ok(self.state)
    }

    /// Runs one steady-state step.
    ///
    /// Outside `Running` this does nothing. A runtime error moves to `Error`;
    /// an exit request from the listener moves to `Finalizing`.
    pub fn tick(&mut self, host: &mut dyn Host) -> Result<ApplicationState, StateError> {
        if self.state != ApplicationState::Running {
            log::trace!("tick ignored in state {}", self.state);
            return Ok(self.state);
        }

        self.ticks += 1;
        match self.listener.on_run(host) {
            Ok(()) => {
                if host.exit_requested() {
                    self.advance(LifecycleEvent::CloseRequested)?;
                }
            }
            Err(err) => {
                log::error!("{err}");
                self.listener.on_error(err.code, &err.description);
                self.advance(LifecycleEvent::Failed)?;
            }
        }

        Ok(self.state)
    }

    /// Finalizes the listener: `Finalizing` → `Finalized` or `Error`.
    ///
    /// A still-running application is moved to `Finalizing` first, which
    /// covers the platform shutting the loop down on its own.
    pub fn finalize(&mut self, host: &mut dyn Host) -> Result<ApplicationState, StateError> {
        if self.state == ApplicationState::Running {
            self.advance(LifecycleEvent::CloseRequested)?;
        }
        if self.state != ApplicationState::Finalizing {
            return Err(StateError::InvalidTransition {
                from: self.state,
                event: LifecycleEvent::Finalized,
            });
        }

        match self.listener.on_finalize(host) {
            Ok(()) => {
                self.advance(LifecycleEvent::Finalized)?;
                self.listener.on_finalized();
            }
            Err(err) => {
                log::error!("finalization failed: {err}");
                self.listener.on_finalize_error(&err);
                self.advance(LifecycleEvent::FinalizeFailed)?;
            }
        }

        Ok(self.state)
    }

    /// Forwards a window event while the application is running.
    pub fn window_event(&mut self, event: &WindowEvent) {
        if self.state == ApplicationState::Running {
            self.listener.on_window_event(event);
        }
    }
}
