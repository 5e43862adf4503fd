//! Client-side state.
//!
//! DESIGN
//! ======
//! State is split by concern so each piece can be driven on its own:
//! `navigation` is the event source, `shell` derives the loading flag from
//! it, and `authorize` owns the consent view model.

pub mod authorize;
pub mod navigation;
pub mod shell;

use std::sync::Arc;

use crate::config::FrontendConfig;
use crate::net::AuthorizationInfoClient;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FrontendConfig>,
    pub client: AuthorizationInfoClient,
    pub navigator: navigation::Navigator,
    pub shell: Arc<shell::Shell>,
}

impl AppState {
    /// Must be called from within a Tokio runtime (the shell spawns a task).
    #[must_use]
    pub fn new(config: FrontendConfig, client: AuthorizationInfoClient) -> Self {
        let navigator = navigation::Navigator::new();
        let shell = Arc::new(shell::Shell::attach(&navigator));
        Self { config: Arc::new(config), client, navigator, shell }
    }
}
