//! Consent page route.
//!
//! Each request is one navigation: it starts when the request arrives and
//! ends when the view settles. If the browser goes away first, axum drops
//! the handler future, which drops the view (cancelling the fetch) and the
//! navigation (emitting `Cancel`).

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use tracing::{error, info};

use crate::net::AuthorizationInfo;
use crate::state::AppState;
use crate::state::authorize::{AuthorizeView, Settled};

const CONSENT_TEMPLATE: &str = include_str!("templates/consent.html");
const FAILURE_TEMPLATE: &str = include_str!("templates/failure.html");

/// `GET /oauth2/consent`
pub async fn consent_page(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_string();
    let navigation = state.navigator.begin(path.clone());

    let source = state.client.for_session(headers.get(COOKIE).cloned());
    let mut view = AuthorizeView::new(Arc::new(source), &state.config.host);
    view.mount();

    let settled = view.settled().await;
    let rendered = match &settled {
        Settled::Loaded(auth) => render_consent(auth, view.authorize_url()),
        Settled::Failed(error) => render_failure(error),
    };
    view.unmount();

    match (settled, rendered) {
        (_, Err(e)) => {
            error!(error = %e, "consent template render failed");
            navigation.error(e.to_string());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        (Settled::Loaded(auth), Ok(page)) => {
            info!(client_id = ?auth.client_id, "rendering consent page");
            navigation.end(path);
            (StatusCode::OK, Html(page)).into_response()
        }
        (Settled::Failed(error), Ok(page)) => {
            navigation.error(error);
            (StatusCode::BAD_GATEWAY, Html(page)).into_response()
        }
    }
}

/// Both pages auto-escape every interpolated value as HTML.
fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_template("consent.html", CONSENT_TEMPLATE)?;
    env.add_template("failure.html", FAILURE_TEMPLATE)?;
    Ok(env)
}

fn render_consent(auth: &AuthorizationInfo, authorize_url: &str) -> Result<String, minijinja::Error> {
    templates()?.get_template("consent.html")?.render(context! {
        client => auth.display_name(),
        principal => &auth.principal_name,
        authorize_url => authorize_url,
        client_id => &auth.client_id,
        state => &auth.state,
        scopes => &auth.scopes,
    })
}

fn render_failure(error: &str) -> Result<String, minijinja::Error> {
    templates()?.get_template("failure.html")?.render(context! { error => error })
}

#[cfg(test)]
#[path = "consent_test.rs"]
mod consent_test;
