//! Helpers shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::config::FrontendConfig;

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub(crate) async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("test listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server failed");
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub(crate) async fn dead_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("test listener addr");
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn test_config(host: &str) -> FrontendConfig {
    let mut cfg = FrontendConfig::with_host(host);
    cfg.timeouts.request_secs = 5;
    cfg.timeouts.connect_secs = 2;
    cfg
}

/// Stand-in authorization server.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    pub hits: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Serves `GET /oauth2/authorization-info`. Requests without a
    /// `SESSION` cookie get 401, matching a backend that requires a login.
    /// Successful responses re-issue the session cookie, as a backend that
    /// refreshes sessions does.
    pub(crate) fn router(&self) -> Router {
        Router::new()
            .route("/oauth2/authorization-info", get(authorization_info))
            .with_state(self.clone())
    }
}

async fn authorization_info(
    State(backend): State<FakeBackend>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), StatusCode> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    let session = jar.get("SESSION").map(|c| c.value().to_string()).ok_or(StatusCode::UNAUTHORIZED)?;

    let body = json!({
        "clientId": "messaging-client",
        "clientName": "Messaging <Client>",
        "scopes": ["message.read", "message.write"],
        "principalName": session,
    });
    let jar = jar.add(Cookie::build(("SESSION", session)).path("/"));
    Ok((jar, Json(body)))
}
