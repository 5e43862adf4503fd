//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authorization server redirects the browser to `/oauth2/consent`
//! during an authorization request. That page is rendered here from the
//! backend's authorization-info endpoint; the consent form itself posts
//! straight back to the backend.

pub mod consent;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/oauth2/consent", get(consent::consent_page))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "loading": state.shell.is_loading() }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
