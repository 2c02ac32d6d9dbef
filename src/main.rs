use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::{net::TcpListener, signal};
use tracing::info;

use client_registry::api::{RouterConfig, create_router_with_config};
use client_registry::app::AppState;
use client_registry::config::AppConfig;
use client_registry::infra::{SqliteClient, SqliteConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format).context("failed to install tracing subscriber")?;

    let db = Arc::new(
        SqliteClient::new(
            &config.database_url,
            SqliteConfig {
                max_connections: config.max_connections,
                ..Default::default()
            },
        )
        .await
        .context("failed to open database")?,
    );

    let app_state = Arc::new(AppState::new(Arc::clone(&db) as _));
    let router = create_router_with_config(
        app_state,
        RouterConfig {
            request_timeout: config.request_timeout,
            static_dir: config.static_dir.clone(),
        },
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
