use std::any::Any;

use super::ResourceError;

/// A typed, decodable asset that can live in a [`ResourceStore`](super::ResourceStore).
///
/// Assets are immutable once stored; reloading replaces the entry.
pub trait Asset: Any + Send + Sync {
    /// Decodes an asset from raw bytes. `name` is the logical asset name and is
    /// only used for diagnostics.
    fn decode(name: &str, bytes: &[u8]) -> Result<Self, ResourceError>
    where
        Self: Sized;
}
