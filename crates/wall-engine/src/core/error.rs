use thiserror::Error;

use super::{ApplicationState, LifecycleEvent};
use crate::resources::ResourceError;
use crate::scene::SceneError;

/// Failure while bringing the application up.
#[derive(Debug, Error)]
pub enum InitError {
    /// A window, GPU context, viewport or worker pool could not be created.
    #[error("failed to allocate {component}: {reason}")]
    AllocationFailure {
        component: &'static str,
        reason: String,
    },
    #[error("failed to load asset: {0}")]
    AssetLoad(#[from] ResourceError),
    #[error("failed to build scene: {0}")]
    Scene(#[from] SceneError),
}

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("failed to release {component}: {reason}")]
    Release {
        component: &'static str,
        reason: String,
    },
}

/// Error reported while running; delivered through `on_error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("runtime error {code}: {description}")]
pub struct RuntimeError {
    pub code: i32,
    pub description: String,
}

impl RuntimeError {
    /// The renderer cannot continue.
    pub const RENDER: i32 = 1;
    /// A background download failed.
    pub const DOWNLOAD: i32 = 2;
    /// Downloaded bytes could not be decoded.
    pub const DECODE: i32 = 3;

    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("invalid lifecycle transition: {event} in state {from}")]
    InvalidTransition {
        from: ApplicationState,
        event: LifecycleEvent,
    },
}
