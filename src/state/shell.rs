//! Application shell: the global "navigation in progress" flag.
//!
//! DESIGN
//! ======
//! `LoadingState` is the pure transition; `Shell` runs it over a navigator
//! subscription in one task and publishes the flag on a `watch` channel.
//! The flag starts true and only changes on an actual transition, so a
//! Start while already loading (overlapping navigations) is a no-op.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::navigation::{NavigationEvent, Navigator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingState {
    pub loading: bool,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { loading: true }
    }
}

impl LoadingState {
    /// Apply one event. Returns `true` if the flag changed.
    pub fn apply(&mut self, event: &NavigationEvent) -> bool {
        match event {
            NavigationEvent::Start { .. } if !self.loading => {
                self.loading = true;
                true
            }
            NavigationEvent::End { .. } | NavigationEvent::Cancel { .. } | NavigationEvent::Error { .. }
                if self.loading =>
            {
                self.loading = false;
                true
            }
            _ => false,
        }
    }
}

pub struct Shell {
    loading: watch::Receiver<bool>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Shell {
    /// Subscribe to `navigator` for the lifetime of the returned shell.
    #[must_use]
    pub fn attach(navigator: &Navigator) -> Self {
        let (tx, loading) = watch::channel(LoadingState::default().loading);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(navigator.subscribe(), tx, cancel.clone()));
        Self { loading, cancel, task: Some(task) }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.clone()
    }

    /// Unsubscribe and wait for the event task to stop.
    pub async fn detach(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(mut events: broadcast::Receiver<NavigationEvent>, tx: watch::Sender<bool>, cancel: CancellationToken) {
    let mut state = LoadingState::default();
    loop {
        let event = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            event = events.recv() => event,
        };

        match event {
            Ok(event) => {
                if state.apply(&event) {
                    debug!(loading = state.loading, id = event.id(), "loading flag changed");
                    tx.send_replace(state.loading);
                }
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "shell lagged behind navigation events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    debug!("shell detached from navigation events");
}
