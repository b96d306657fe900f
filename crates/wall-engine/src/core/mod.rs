//! Application lifecycle.
//!
//! The host (platform runtime) owns a [`LifecycleDriver`], which validates
//! every transition of [`ApplicationState`] and sequences the callbacks of a
//! [`LifecycleListener`] (the application). The host itself is handed to
//! each callback as `&mut dyn Host`; there is no global instance.

mod driver;
mod error;
mod host;
mod listener;
mod state;

pub use driver::LifecycleDriver;
pub use error::{FinalizeError, InitError, RuntimeError, StateError};
pub use host::Host;
pub use listener::LifecycleListener;
pub use state::{ApplicationState, LifecycleEvent};
