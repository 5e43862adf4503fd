//! Navigation lifecycle events and their source.
//!
//! DESIGN
//! ======
//! `Navigator` is a typed event source over a broadcast channel. Subscribers
//! see events in emission order. `begin` hands out a `Navigation` guard that
//! emits exactly one terminal event: `end`/`error`/`cancel` explicitly, or
//! `Cancel` when the guard is dropped unfinished.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tracing::trace;

pub(crate) const CHANNEL_CAPACITY: usize = 64;

/// Router-style lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Start { id: u64, url: String },
    End { id: u64, url: String },
    Cancel { id: u64, reason: String },
    Error { id: u64, error: String },
}

impl NavigationEvent {
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Start { id, .. } | Self::End { id, .. } | Self::Cancel { id, .. } | Self::Error { id, .. } => *id,
        }
    }

    /// End, Cancel and Error all finish a navigation.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Start { .. })
    }
}

#[derive(Clone)]
pub struct Navigator {
    tx: broadcast::Sender<NavigationEvent>,
    next_id: Arc<AtomicU64>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx, next_id: Arc::new(AtomicU64::new(1)) }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn emit(&self, event: NavigationEvent) -> usize {
        trace!(?event, "navigation event");
        self.tx.send(event).unwrap_or(0)
    }

    /// Start a navigation to `url`.
    pub fn begin(&self, url: impl Into<String>) -> Navigation {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.emit(NavigationEvent::Start { id, url: url.into() });
        Navigation { navigator: self.clone(), id, finished: false }
    }
}

/// An in-progress navigation.
pub struct Navigation {
    navigator: Navigator,
    id: u64,
    finished: bool,
}

impl Navigation {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn end(mut self, url: impl Into<String>) {
        self.finish(NavigationEvent::End { id: self.id, url: url.into() });
    }

    pub fn error(mut self, error: impl Into<String>) {
        self.finish(NavigationEvent::Error { id: self.id, error: error.into() });
    }

    pub fn cancel(mut self, reason: impl Into<String>) {
        self.finish(NavigationEvent::Cancel { id: self.id, reason: reason.into() });
    }

    fn finish(&mut self, event: NavigationEvent) {
        self.finished = true;
        self.navigator.emit(event);
    }
}

impl Drop for Navigation {
    fn drop(&mut self) {
        if !self.finished {
            let id = self.id;
            self.finish(NavigationEvent::Cancel { id, reason: "abandoned".into() });
        }
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;
