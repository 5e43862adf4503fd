//! # consent-frontend
//!
//! Front end for an OAuth2 authorization server's consent step.
//!
//! `net` fetches authorization info from the backend, `state` holds the
//! authorize view model and the navigation-driven loading flag, and
//! `routes` renders the consent page over Axum.

pub mod config;
pub mod net;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
