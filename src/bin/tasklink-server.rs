//! HTTP server for the Tasklink task and relationship API.
//!
//! Usage:
//!
//! ```text
//! tasklink-server [--bind ADDR] [--storage memory|postgres] [--database-url URL]
//! ```
//!
//! Run `tasklink-server --help` for every option and its environment variable.

use std::sync::Arc;

use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use tasklink::config::{ConfigError, ServerConfig, StorageBackend};
use tasklink::http::{AppState, router};
use tasklink::relationship::{
    adapters::{memory::InMemoryRelationshipRepository, postgres::PostgresRelationshipRepository},
    ports::RelationshipRepository,
};
use tasklink::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Repositories = (Arc<dyn TaskRepository>, Arc<dyn RelationshipRepository>);

fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_repositories(config: &ServerConfig) -> Result<Repositories, BoxError> {
    match config.storage {
        StorageBackend::Memory => {
            let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
            let relationships: Arc<dyn RelationshipRepository> =
                Arc::new(InMemoryRelationshipRepository::new());
            Ok((tasks, relationships))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .clone()
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            let pool = Pool::builder()
                .max_size(config.pool_size)
                .build(ConnectionManager::<PgConnection>::new(url))?;
            let tasks: Arc<dyn TaskRepository> =
                Arc::new(PostgresTaskRepository::new(pool.clone()));
            let relationships: Arc<dyn RelationshipRepository> =
                Arc::new(PostgresRelationshipRepository::new(pool));
            Ok((tasks, relationships))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::parse();
    config.validate()?;
    init_tracing(config.log_filter()?);

    let (tasks, relationships) = build_repositories(&config)?;
    let state = AppState::new(tasks, relationships, Arc::new(DefaultClock));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(bind = %config.bind, storage = ?config.storage, "tasklink server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
