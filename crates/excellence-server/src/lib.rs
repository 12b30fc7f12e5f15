pub mod api;
pub mod config;
pub mod error;
pub mod repo;

use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use excellence_core::Environment;

use crate::config::Config;
use crate::repo::{
    MarketDataRepository, MockMarketDataRepository, MockRawDataRepository, MockUploadSink,
    RawDataRepository, UploadSink,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub raw_data: Arc<dyn RawDataRepository>,
    pub market_data: Arc<dyn MarketDataRepository>,
    pub upload_sink: Arc<dyn UploadSink>,
    pub environment: Environment,
}

impl AppState {
    /// State backed by the synthetic repositories
    pub fn mock(environment: Environment) -> Self {
        Self {
            raw_data: Arc::new(MockRawDataRepository),
            market_data: Arc::new(MockMarketDataRepository),
            upload_sink: Arc::new(MockUploadSink::default()),
            environment,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the router with all routes and layers
pub fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

/// Run the server with the given configuration
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = AppState::mock(config.environment);
    let app = app(state, &config);

    // Start the server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {} ({})", addr, config.environment);

    axum::serve(listener, app).await?;

    Ok(())
}
