use crossbeam_channel::{Receiver, Sender};

use super::FetchListener;

/// Result of one background fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Succeeded { name: String, data: Vec<u8> },
    Failed { name: String, reason: String },
}

impl FetchOutcome {
    pub fn name(&self) -> &str {
        match self {
            FetchOutcome::Succeeded { name, .. } | FetchOutcome::Failed { name, .. } => name,
        }
    }

    /// Hands the outcome to the matching listener callback.
    pub fn deliver(&self, listener: &mut dyn FetchListener) {
        match self {
            FetchOutcome::Succeeded { name, data } => listener.on_download_succeeded(name, data),
            FetchOutcome::Failed { name, reason } => listener.on_download_failed(name, reason),
        }
    }
}

/// Work that must run on the thread owning the scene and the resource store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainThreadMessage {
    Fetch(FetchOutcome),
    Error { code: i32, description: String },
}

/// Cloneable handle used by background collaborators to post messages.
#[derive(Debug, Clone)]
pub struct MessageSender(Sender<MainThreadMessage>);

impl MessageSender {
    /// Posts `message`; returns `false` once the owning queue is gone.
    pub fn post(&self, message: MainThreadMessage) -> bool {
        self.0.send(message).is_ok()
    }
}

/// Unbounded queue of [`MainThreadMessage`]s, drained once per frame.
///
/// The queue is the only path by which background work reaches main-thread
/// state, which keeps the resource store single-writer without a lock.
#[derive(Debug)]
pub struct MainThreadQueue {
    tx: Sender<MainThreadMessage>,
    rx: Receiver<MainThreadMessage>,
}

impl MainThreadQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> MessageSender {
        MessageSender(self.tx.clone())
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Yields pending messages without blocking.
    pub fn drain(&self) -> impl Iterator<Item = MainThreadMessage> + '_ {
        self.rx.try_iter()
    }

    /// Delivers pending fetch outcomes to `listener` and hands back every
    /// other message, in arrival order.
    pub fn drain_into(&self, listener: &mut dyn FetchListener) -> Vec<MainThreadMessage> {
        let mut rest = Vec::new();
        for message in self.drain() {
            match message {
                MainThreadMessage::Fetch(outcome) => outcome.deliver(listener),
                other => rest.push(other),
            }
        }
        rest
    }
}

impl Default for MainThreadQueue {
    fn default() -> Self {
        Self::new()
    }
}
