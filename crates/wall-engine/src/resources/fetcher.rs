use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crossbeam_channel::Sender;

use super::{FetchOutcome, MainThreadMessage, MessageSender, ResourceError};

struct FetchRequest {
    name: String,
    path: PathBuf,
}

/// Background asset fetcher backed by a small worker pool.
///
/// Workers only read bytes; decoding and store mutation happen on the main
/// thread when the posted [`FetchOutcome`]s are drained.
pub struct ResourcesFetcher {
    root: PathBuf,
    jobs: Option<Sender<FetchRequest>>,
    workers: Vec<JoinHandle<()>>,
}

impl ResourcesFetcher {
    /// Starts `workers` threads (at least one) resolving paths against `root`.
    pub fn new(
        root: impl Into<PathBuf>,
        workers: usize,
        completions: MessageSender,
    ) -> Result<Self, ResourceError> {
        let (tx, rx) = crossbeam_channel::unbounded::<FetchRequest>();
        let mut fetcher = Self {
            root: root.into(),
            jobs: Some(tx),
            workers: Vec::new(),
        };

        for index in 0..workers.max(1) {
            let rx = rx.clone();
            let completions = completions.clone();
            let handle = std::thread::Builder::new()
                .name(format!("wall-fetch-{index}"))
                .spawn(move || {
                    for request in rx.iter() {
                        let outcome = fetch_file(request);
                        if !completions.post(MainThreadMessage::Fetch(outcome)) {
                            break;
                        }
                    }
                })
                .map_err(ResourceError::WorkerSpawn)?;
            fetcher.workers.push(handle);
        }

        log::debug!("resource fetcher started with {} worker(s)", fetcher.workers.len());
        Ok(fetcher)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Queues a fetch of `relative` (resolved against the root) under `name`.
    pub fn fetch(&self, name: impl Into<String>, relative: impl AsRef<Path>) -> Result<(), ResourceError> {
        let jobs = self.jobs.as_ref().ok_or(ResourceError::FetcherClosed)?;
        let request = FetchRequest {
            name: name.into(),
            path: self.root.join(relative),
        };
        log::debug!("fetch queued: `{}` <- {}", request.name, request.path.display());
        jobs.send(request).map_err(|_| ResourceError::FetcherClosed)
    }

    /// Stops accepting requests, lets workers finish queued ones and joins them.
    pub fn finalize(mut self) -> Result<(), ResourceError> {
        match self.shutdown() {
            0 => Ok(()),
            n => Err(ResourceError::WorkerPanicked(n)),
        }
    }

    /// Returns how many workers panicked.
    fn shutdown(&mut self) -> usize {
        if self.jobs.take().is_none() {
            return 0;
        }
        let panicked = self
            .workers
            .drain(..)
            .map(JoinHandle::join)
            .filter(Result::is_err)
            .count();
        if panicked > 0 {
            log::warn!("{panicked} resource fetch worker(s) panicked");
        }
        log::debug!("resource fetcher finalized");
        panicked
    }
}

impl Drop for ResourcesFetcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn fetch_file(request: FetchRequest) -> FetchOutcome {
    match std::fs::read(&request.path) {
        Ok(data) => FetchOutcome::Succeeded {
            name: request.name,
            data,
        },
        Err(e) => FetchOutcome::Failed {
            name: request.name,
            reason: format!("{}: {e}", request.path.display()),
        },
    }
}
