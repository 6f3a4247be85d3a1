pub mod api;
pub mod config;
pub mod gateway;
pub mod insights;
pub mod provider;
pub mod schema;

use std::sync::Arc;

use axum::Router;
use tracing::info;

pub use config::AppConfig;
pub use gateway::{run_insight, GatewayError, Outcome};
pub use provider::{CompletionRequest, GroqClient, InferenceProvider, ProviderConfig, ProviderError};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn InferenceProvider>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(provider: Arc<dyn InferenceProvider>, max_body_bytes: usize) -> Self {
        Self {
            provider,
            max_body_bytes,
        }
    }

    /// State backed by a [`GroqClient`] built from `cfg`. The credential is taken from `cfg`
    /// here and nowhere else.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let client = GroqClient::new(ProviderConfig {
            api_key: cfg.groq_api_key.clone(),
            base_url: cfg.groq_base_url.clone(),
            model: cfg.groq_model.clone(),
            timeout_ms: cfg.timeout_ms,
        });
        Self::new(Arc::new(client), cfg.max_body_bytes)
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("insight-gateway listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
