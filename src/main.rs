//! Chemostats backend entrypoint.
//!
//! Loads configuration from the environment, assembles the HTTP router with
//! its middleware stack, and serves until interrupted.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use chemostats::adapters::http::{app, AnalysisAppState, AssistantAppState};
use chemostats::adapters::{InMemoryContextStore, OpenAIConfig, OpenAIProvider};
use chemostats::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let analysis_state = AnalysisAppState::new(
        config.analysis.default_fdr_threshold,
        config.analysis.default_plot_option,
    );

    if !config.ai.has_api_key() {
        tracing::warn!("OPENAI_API_KEY not set; assistant endpoints will answer with a notice");
    }
    let ai_config = OpenAIConfig::new(config.ai.api_key.clone().unwrap_or_default())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);
    let assistant_state = AssistantAppState::new(
        Arc::new(OpenAIProvider::new(ai_config)),
        Arc::new(InMemoryContextStore::new()),
    );

    // Request ids are stamped before tracing so every span carries one.
    let router = app(analysis_state, assistant_state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(CompressionLayer::new())
            .layer(cors_layer(&config.server))
            .layer(PropagateRequestIdLayer::x_request_id()),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Chemostats backend listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter; production gets JSON lines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Builds the CORS layer from the configured origin list.
///
/// Credentialed requests rule out wildcard origins, so the allowed set is
/// always explicit.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");
    tracing::info!("Shutdown signal received");
}
