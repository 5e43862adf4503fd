//! Authorize view model.
//!
//! DESIGN
//! ======
//! The view starts `Uninitialized` and moves to `Loaded` or `Failed` when
//! the fetch started by `mount` completes. It never returns to
//! `Uninitialized`.
//!
//! At most one fetch is in flight. Starting a new one (`refresh`) or
//! tearing the view down cancels the previous token and bumps a generation
//! counter while holding the `watch` lock; a fetch only writes if its
//! generation is still current under that same lock, so a superseded or
//! cancelled response can never land.

#[cfg(test)]
#[path = "authorize_test.rs"]
mod authorize_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::authorize_url;
use crate::net::{ApiError, AuthorizationInfo, AuthorizationInfoSource};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Uninitialized,
    Loaded(Arc<AuthorizationInfo>),
    /// The fetch failed before anything was loaded.
    Failed(String),
}

/// Outcome of the first completed fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum Settled {
    Loaded(Arc<AuthorizationInfo>),
    Failed(String),
}

pub struct AuthorizeView {
    source: Arc<dyn AuthorizationInfoSource>,
    authorize_url: String,
    state: Arc<watch::Sender<ViewState>>,
    generation: Arc<AtomicU64>,
    inflight: Option<CancellationToken>,
    mounted: bool,
}

impl AuthorizeView {
    #[must_use]
    pub fn new(source: Arc<dyn AuthorizationInfoSource>, host: &str) -> Self {
        let (state, _) = watch::channel(ViewState::Uninitialized);
        Self {
            source,
            authorize_url: authorize_url(host),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            inflight: None,
            mounted: false,
        }
    }

    #[must_use]
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// The loaded payload, if any fetch has succeeded.
    #[must_use]
    pub fn authorization_info(&self) -> Option<Arc<AuthorizationInfo>> {
        match &*self.state.borrow() {
            ViewState::Loaded(info) => Some(Arc::clone(info)),
            _ => None,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// The view became visible. Starts the fetch on the first call only.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.spawn_fetch();
        true
    }

    /// Fetch again, cancelling any request still in flight.
    pub fn refresh(&mut self) {
        self.mounted = true;
        self.spawn_fetch();
    }

    /// Wait until the view leaves `Uninitialized`.
    ///
    /// Never resolves for a view that is not mounted.
    pub async fn settled(&self) -> Settled {
        let mut rx = self.state.subscribe();
        loop {
            match &*rx.borrow_and_update() {
                ViewState::Loaded(info) => return Settled::Loaded(Arc::clone(info)),
                ViewState::Failed(error) => return Settled::Failed(error.clone()),
                ViewState::Uninitialized => {}
            }
            // `self` owns a sender, so the channel stays open while we wait.
            let _ = rx.changed().await;
        }
    }

    /// Tear the view down. Any in-flight fetch is cancelled and will not write.
    pub fn unmount(self) {
        debug!(authorize_url = %self.authorize_url, "authorize view unmounted");
    }

    fn spawn_fetch(&mut self) {
        self.cancel_inflight();
        let generation = self.generation.load(Ordering::SeqCst);
        let token = CancellationToken::new();
        self.inflight = Some(token.clone());

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(generation, "authorization-info fetch cancelled");
                    return;
                }
                result = source.fetch() => result,
            };
            state.send_if_modified(|view| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                apply_result(view, result)
            });
        });
    }

    fn cancel_inflight(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
        let generation = &self.generation;
        self.state.send_if_modified(|_| {
            generation.fetch_add(1, Ordering::SeqCst);
            false
        });
    }
}

impl Drop for AuthorizeView {
    fn drop(&mut self) {
        self.cancel_inflight();
    }
}

fn apply_result(view: &mut ViewState, result: Result<AuthorizationInfo, ApiError>) -> bool {
    match result {
        Ok(info) => {
            *view = ViewState::Loaded(Arc::new(info));
            true
        }
        // Keep the last good payload on screen.
        Err(e) if matches!(view, ViewState::Loaded(_)) => {
            warn!(error = %e, code = e.error_code(), "authorization-info refresh failed");
            false
        }
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "authorization-info fetch failed");
            *view = ViewState::Failed(e.to_string());
            true
        }
    }
}
