use consent_frontend::config::FrontendConfig;
use consent_frontend::net::AuthorizationInfoClient;
use consent_frontend::{routes, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = FrontendConfig::from_env()?;
    let client = AuthorizationInfoClient::new(&config)?;
    let port = config.port;
    tracing::info!(host = %config.host, "authorization server configured");

    let state = state::AppState::new(config, client);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "consent-frontend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
