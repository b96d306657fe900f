//! Resource loading and caching.
//!
//! - `ResourceStore`: name → typed asset cache, written only on the main thread
//! - `ResourcesFetcher`: background file fetches, completions marshalled through
//!   a `MainThreadQueue` and applied by a `FetchListener` during the frame step

mod asset;
mod error;
mod fetcher;
mod queue;
mod sink;
mod store;
mod texture;

pub use asset::Asset;
pub use error::ResourceError;
pub use fetcher::ResourcesFetcher;
pub use queue::{FetchOutcome, MainThreadMessage, MainThreadQueue, MessageSender};
pub use sink::{FetchListener, FetchReport, ResourceFetchSink};
pub use store::ResourceStore;
pub use texture::{Texture, TextureId};
