mod config;
mod seed;

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use phonebase_domain::CatalogService;
use phonebase_http::{run_http_server, CorsConfig, HttpServerConfig};
use phonebase_postgres::{MigrationRunner, PostgresCatalogRepository, PostgresClient};

#[tokio::main]
async fn main() {
    let config = match config::ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting phonebase server");

    if let Err(e) = run(config).await {
        error!("Server exiting with error: {:#}", e);
        std::process::exit(1);
    }
}

/// Cancels the token on SIGINT or SIGTERM.
fn spawn_signal_handler(token: CancellationToken) {
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                ctrl_c_token.cancel();
            }
            Err(err) => {
                error!("Error setting up signal handler: {}", err);
            }
        }
    });

    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(err) => {
                error!("Error setting up SIGTERM handler: {}", err);
                return;
            }
        };
        sigterm.recv().await;
        info!("Received SIGTERM signal");
        token.cancel();
    });
}

async fn run(config: config::ServiceConfig) -> Result<()> {
    let client = PostgresClient::new(&config.postgres)?;
    client.ping().await?;

    if config.run_migrations {
        MigrationRunner::from_config(&config.postgres)
            .run_migrations()
            .await?;
        info!("database migrations applied");
    }

    let repository = Arc::new(PostgresCatalogRepository::new(client));
    let service = Arc::new(CatalogService::new(repository));

    if let Some(path) = &config.brand_seed_file {
        seed::seed_brands_from_file(&service, path).await?;
    }

    let token = CancellationToken::new();
    spawn_signal_handler(token.clone());

    run_http_server(
        HttpServerConfig {
            host: config.http_host.clone(),
            port: config.http_port,
            cors: CorsConfig {
                allowed_origin: config.cors_allowed_origin.clone(),
            },
        },
        service,
        token,
    )
    .await
}
