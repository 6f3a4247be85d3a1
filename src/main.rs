use insight_gateway::{build_app, run_server, AppConfig, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cfg = AppConfig::from_env();
    init_tracing(cfg.log_json);

    if cfg.groq_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; insight endpoints will answer 503");
    }
    info!(
        model = %cfg.groq_model,
        base_url = %cfg.groq_base_url,
        timeout_ms = cfg.timeout_ms,
        "inference provider configured"
    );

    let app = build_app(AppState::from_config(&cfg));

    run_server(app, cfg.port).await.map_err(|e| {
        error!("server failed: {e}");
        format!("server failed: {e}")
    })
}
