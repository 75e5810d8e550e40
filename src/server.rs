//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database connection and migrations, real-time
//! hub wiring, the stats broadcaster lifecycle, and the Axum server.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::UrlRepository;
use crate::domain::stats_broadcaster::StatsBroadcaster;
use crate::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use crate::infrastructure::realtime::BroadcastHub;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

/// Connection attempts made before startup gives up on the database.
const DB_CONNECT_RETRIES: usize = 6;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - URL storage (PostgreSQL with migrations, or in-memory)
/// - Real-time broadcast hub
/// - Periodic stats broadcaster
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let hub = Arc::new(BroadcastHub::new(
        config.base_url.clone(),
        config.event_buffer_capacity,
    ));
    let generator = Arc::new(RandomCodeGenerator::new(config.short_code_length));

    let state = AppState::new(
        repository.clone(),
        generator,
        hub.clone(),
        config.code_max_attempts,
    );

    let broadcaster = StatsBroadcaster::start(repository, hub, config.stats_interval());

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    let served = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    broadcaster.stop().await;
    info!("Server stopped");

    served.context("Server error")
}

async fn build_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;

            let pool = connect_database(config, database_url).await?;
            info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Database migrations applied");

            Ok(Arc::new(PgUrlRepository::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; mappings are lost on restart");
            Ok(Arc::new(InMemoryUrlRepository::new()))
        }
    }
}

/// Opens the connection pool, retrying with exponential backoff so the
/// service can start before the database is ready.
async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let retry_strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(5))
        .take(DB_CONNECT_RETRIES)
        .map(jitter);

    Retry::spawn(retry_strategy, || {
        let options = options.clone();
        async move {
            options
                .connect(database_url)
                .await
                .inspect_err(|e| warn!("Database connection attempt failed: {}", e))
        }
    })
    .await
    .context("Failed to connect to database")
}

/// Completes on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
