//! Charity hub HTTP server.

use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use charity_hub::{
    config::Config,
    db,
    http::{AppState, create_router},
    identity::adapters::postgres::PostgresIdentityRepository,
    task::{adapters::postgres::PostgresTaskRepository, services::AccessPolicy},
};

const DEFAULT_LOG_FILTER: &str = "charity_hub=info,tower_http=info";

/// Errors that abort server start-up.
#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to open database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to apply database schema: {0}")]
    Schema(#[from] diesel::result::Error),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = Config::parse();
    init_tracing()?;

    let policy = AccessPolicy::new(config.completion_policy);
    let state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::build_pool(url, config.pool_size)?;
            let mut connection = pool.get()?;
            db::apply_schema(&mut connection)?;
            drop(connection);
            info!(pool_size = config.pool_size, "using PostgreSQL store");
            AppState::new(
                Arc::new(PostgresTaskRepository::new(pool.clone())),
                Arc::new(PostgresIdentityRepository::new(pool)),
                policy,
            )
        }
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            AppState::in_memory(policy)
        }
    };

    let listener = TcpListener::bind(config.bind).await?;
    info!(
        bind = %config.bind,
        completion_policy = %config.completion_policy,
        "HTTP server listening"
    );
    axum::serve(listener, create_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

fn init_tracing() -> Result<(), StartupError> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
