//! # homeguardd: homeguard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct application services, injecting the store via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use homeguard_adapter_http_axum::state::AppState;
use homeguard_adapter_storage_sqlite_sqlx::SqliteStore;
use homeguard_app::event_bus::InProcessEventBus;
use homeguard_app::notifier::TracingNotifier;
use homeguard_app::ports::SystemClock;
use homeguard_app::services::activity_service::ActivityService;
use homeguard_app::services::board_service::BoardService;
use homeguard_app::services::control_service::ControlService;
use homeguard_app::services::emitter::Emitter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = homeguard_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("opening database")?;
    let store = Arc::new(SqliteStore::new(db.pool().clone()));

    // Event bus and emitter
    let event_bus = Arc::new(InProcessEventBus::new(config.events.bus_capacity));
    let emitter = Arc::new(Emitter::new(
        Arc::clone(&store),
        Arc::clone(&event_bus),
        TracingNotifier,
    ));

    // Services
    let control = Arc::new(ControlService::new(
        Arc::clone(&store),
        SystemClock,
        Arc::clone(&emitter),
    ));
    let activity = Arc::new(ActivityService::new(
        Arc::clone(&store),
        SystemClock,
        Arc::clone(&emitter),
    ));
    let board = Arc::new(BoardService::new(store, SystemClock, emitter));

    // HTTP
    let state = AppState::new(control, activity, board, event_bus);
    let app = homeguard_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "homeguardd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("homeguardd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
