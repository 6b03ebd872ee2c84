// LiveMix HTTP server - Axum router for the playlist and chat relays
// Optionally serves the built frontend from a static directory.

pub mod routes;

use anyhow::Context;
use axum::{Router, http::Method};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::ai::OpenAiClient;
use crate::config::Config;

/// Shared state for the relay handlers
pub struct AppState {
    /// Upstream client; `None` when no credential is configured
    pub llm: Option<OpenAiClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let llm = match &config.api_key {
            Some(key) => Some(OpenAiClient::new(
                key.clone(),
                config.api_url.clone(),
                config.model.clone(),
            )?),
            None => {
                warn!("OPENAI_API_KEY is not set; relay endpoints will answer 500");
                None
            }
        };
        Ok(Self { llm })
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    // No auth, so CORS stays wide open
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    let api = routes::api_routes().with_state(state);

    let app = match static_dir.filter(|p| p.exists()) {
        Some(dist_path) => {
            info!(path = %dist_path.display(), "serving frontend");
            api.fallback_service(
                ServeDir::new(dist_path).fallback(ServeFile::new(dist_path.join("index.html"))),
            )
        }
        None => {
            info!("no frontend dir, API-only mode");
            api
        }
    };

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Bind to the configured address and serve until Ctrl-C/SIGTERM
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let state = Arc::new(
        AppState::from_config(config).context("failed to build the provider HTTP client")?,
    );
    let app = build_router(state, config.static_dir.as_deref());

    let addr: SocketAddr = config.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, model = %config.model, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_without_credential_has_no_client() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(state.llm.is_none());
    }

    #[test]
    fn test_state_with_credential_builds_client() {
        let config = Config {
            api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert!(state.llm.is_some());
    }
}
