use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use phonebase_domain::CatalogService;

use crate::handlers;

/// Cross-origin policy: exactly one allowed client origin.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors: CorsConfig::default(),
        }
    }
}

fn build_cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .with_context(|| format!("invalid CORS origin: {}", config.allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]))
}

/// Assembles the REST router over the catalog service.
pub fn build_router(service: Arc<CatalogService>, cors: &CorsConfig) -> Result<Router> {
    let cors_layer = build_cors_layer(cors)?;

    Ok(Router::new()
        .route(
            "/devices",
            get(handlers::list_devices).post(handlers::create_device),
        )
        .route("/devices/sort/desc", get(handlers::list_devices_by_date_desc))
        .route("/devices/sort/asc", get(handlers::list_devices_by_date_asc))
        .route(
            "/devices/price/desc",
            get(handlers::list_devices_by_price_desc),
        )
        .route(
            "/devices/price/asc",
            get(handlers::list_devices_by_price_asc),
        )
        .route("/devices/search", get(handlers::search_devices))
        .route(
            "/devices/{device_id}",
            axum::routing::put(handlers::update_device).delete(handlers::delete_device),
        )
        .layer(cors_layer)
        .with_state(service))
}

/// Runs the REST server with graceful shutdown.
pub async fn run_http_server(
    config: HttpServerConfig,
    service: Arc<CatalogService>,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid server address")?;

    let router = build_router(service, &config.cors)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Starting HTTP server on {}", addr);

    let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
        cancellation_token.cancelled().await;
        info!("HTTP server shutdown signal received");
    });

    match serve.await {
        Ok(()) => {
            info!("HTTP server stopped gracefully");
            Ok(())
        }
        Err(e) => {
            error!("HTTP server error: {}", e);
            Err(e.into())
        }
    }
}
