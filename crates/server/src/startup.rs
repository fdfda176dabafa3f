use std::future::Future;

use axum::Router;
use common::utils::logging::{self, LogFormat};
use configs::{AppConfig, LogFormatConfig};
use models::db::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::cors::build_cors;
use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils, in the configured format.
pub fn init_logging(cfg: &AppConfig) {
    let format = match cfg.log.format {
        LogFormatConfig::Compact => LogFormat::Compact,
        LogFormatConfig::Json => LogFormat::Json,
    };
    logging::init_logging(format);
}

/// Open the store (creating the schema if needed) and build the router around it.
///
/// The returned connection is the same pool the router uses; close it once
/// the server has stopped.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<(Router, DatabaseConnection)> {
    cfg.http
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    if let Some(dir) = cfg.database.sqlite_data_dir() {
        service::runtime::ensure_env(dir).await?;
    }

    let db = models::db::open(&DatabaseConfig::from(&cfg.database)).await?;
    let state = ServerState::with_db(db.clone());
    let cors = build_cors(&cfg.http.cors)?;
    let app = routes::build_router(state, &cfg.http.base_path, cors);
    Ok((app, db))
}

/// Serve until `shutdown` resolves, then drain in-flight requests and close the store.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (app, db) = build_app(&cfg).await?;

    let host = cfg.server.host.as_str();
    let port = cfg.server.port;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| StartupError::Runtime(format!("cannot bind {host}:{port}: {e}")))?;
    let addr = listener.local_addr()?;
    info!(%addr, base_path = %cfg.http.base_path, cors = ?cfg.http.cors, "starting dog server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    db.close().await?;
    info!(event = "store_closed", "database pool closed");
    Ok(())
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            // 无法监听信号时保持运行，由进程外部终止
            error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
