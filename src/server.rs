//! Relay Server
//!
//! Wires the shared state, routes and layers together:
//!
//! ```text
//! bedrock-relay
//!  ├── POST /proxy/v1/messages           → Bedrock InvokeModel
//!  ├── POST /proxy/v1/images/generations → OpenAI images API
//!  ├── GET  /fetch-image                 → arbitrary image URL
//!  └── GET  /health
//! ```
//!
//! Everything in `RelayState` is built once at startup and only read
//! afterwards, so handlers share it through an `Arc` without locking.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::RelayConfig;
use crate::images::{fetch_image, proxy_image_generation};
use crate::provider::ModelInvoker;
use crate::relay::proxy_messages;

// ============================================================================
// SERVER STATE
// ============================================================================

pub struct RelayState {
    pub config: RelayConfig,
    pub invoker: Arc<dyn ModelInvoker>,
    pub http: reqwest::Client,
}

impl RelayState {
    pub fn new(config: RelayConfig, invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            config,
            invoker,
            http: reqwest::Client::new(),
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

pub async fn health_check() -> &'static str {
    "OK"
}

/// Any origin, method and header may call the relay
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/proxy/v1/messages", post(proxy_messages))
        .route("/proxy/v1/images/generations", post(proxy_image_generation))
        .route("/fetch-image", get(fetch_image))
        // Inline base64 images can push chat bodies well past axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

// ============================================================================
// SERVER STARTUP
// ============================================================================

/// Serve on an already-bound listener until the process exits
pub async fn serve(listener: TcpListener, state: Arc<RelayState>) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

pub async fn run_server(config: RelayConfig, invoker: Arc<dyn ModelInvoker>) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("╔══════════════════════════════════════════════════════════════╗");
    info!("║                  Bedrock Relay                               ║");
    info!("╠══════════════════════════════════════════════════════════════╣");
    info!("║  Model:        {:45} ║", config.model_id);
    info!("║  AWS profile:  {:45} ║", config.aws_profile);
    info!("║  AWS region:   {:45} ║", config.aws_region);
    info!("║  Listening on: {:45} ║", addr);
    info!("╠══════════════════════════════════════════════════════════════╣");
    info!("║  Endpoints:                                                  ║");
    info!("║    POST /proxy/v1/messages           - Bedrock relay         ║");
    info!("║    POST /proxy/v1/images/generations - OpenAI images relay   ║");
    info!("║    GET  /fetch-image?url=            - Image fetch           ║");
    info!("║    GET  /health                      - Health check          ║");
    info!("╚══════════════════════════════════════════════════════════════╝");

    let state = Arc::new(RelayState::new(config, invoker));
    serve(listener, state).await
}
