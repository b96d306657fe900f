use std::fmt;

use super::StateError;

/// Lifecycle phase of an application.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ApplicationState {
    #[default]
    Uninitialized,
    Initializing,
    Running,
    Finalizing,
    Finalized,
    Error,
}

/// Inputs of the lifecycle state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Start,
    Initialized,
    InitializeFailed,
    CloseRequested,
    Failed,
    Finalized,
    FinalizeFailed,
}

impl ApplicationState {
    /// State reached from `self` on `event`.
    ///
    /// Pairs outside the lifecycle graph are rejected; the caller keeps its
    /// current state.
    pub fn next(self, event: LifecycleEvent) -> Result<ApplicationState, StateError> {
        use ApplicationState as S;
        use LifecycleEvent as E;

        match (self, event) {
            (S::Uninitialized, E::Start) => Ok(S::Initializing),
            (S::Initializing, E::Initialized) => Ok(S::Running),
            (S::Initializing, E::InitializeFailed) => Ok(S::Error),
            (S::Running, E::CloseRequested) => Ok(S::Finalizing),
            (S::Running, E::Failed) => Ok(S::Error),
            (S::Finalizing, E::Finalized) => Ok(S::Finalized),
            (S::Finalizing, E::FinalizeFailed) => Ok(S::Error),
            (from, event) => Err(StateError::InvalidTransition { from, event }),
        }
    }

    /// `Finalized` and `Error` accept no further events.
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationState::Finalized | ApplicationState::Error)
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
