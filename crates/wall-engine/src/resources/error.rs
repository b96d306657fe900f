use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading, decoding or fetching assets.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode asset `{name}`")]
    Decode {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("download of `{name}` failed: {reason}")]
    DownloadFailed { name: String, reason: String },

    #[error("failed to start fetch worker")]
    WorkerSpawn(#[source] io::Error),

    #[error("resource fetcher has been finalized")]
    FetcherClosed,

    #[error("{0} fetch worker(s) panicked")]
    WorkerPanicked(usize),
}

impl ResourceError {
    /// Logical asset name the error refers to, when there is one.
    pub fn asset_name(&self) -> Option<&str> {
        match self {
            ResourceError::Decode { name, .. } | ResourceError::DownloadFailed { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }
}
