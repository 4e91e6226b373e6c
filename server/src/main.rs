//! Event tracker HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Start PostgreSQL, then
//! cargo run --bin server
//! ```

use anyhow::Context;
use eventtracker_auth::stores::PostgresUserRepository;
use eventtracker_auth::AuthService;
use eventtracker_core::environment::SystemClock;
use eventtracker_postgres::{PostgresEventRepository, connect};
use eventtracker_server::{AppState, Config, build_router, metrics};
use eventtracker_web::cors_layer;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eventtracker_server=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Event Tracker HTTP Server");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;
    config.validate().context("Invalid configuration")?;
    if config.auth.uses_development_secret() {
        warn!("JWT_SECRET not set; using the development secret");
    }
    info!(
        bind = %config.server.bind_address(),
        events_collection = %config.events_collection,
        cors_origin = %config.server.cors_allowed_origin,
        "Configuration loaded"
    );

    let prometheus = metrics::install_recorder().context("Failed to install metrics recorder")?;

    // Relational user store
    info!("Connecting to user database...");
    let users_pool = connect(&config.users_db)
        .await
        .context("User database unavailable")?;
    let users = PostgresUserRepository::new(users_pool);

    // Document event store
    info!("Connecting to event database...");
    let events_pool = connect(&config.events_db)
        .await
        .context("Event database unavailable")?;
    let events = PostgresEventRepository::new(events_pool, config.events_collection.clone())?;

    if config.server.run_migrations {
        users.migrate().await.context("User migrations failed")?;
        let upgraded = events.migrate().await.context("Event migrations failed")?;
        info!(upgraded, "Migrations complete");
    }

    let users = Arc::new(users);
    let events = Arc::new(events);

    let auth = AuthService::from_config(&config.auth, users.clone(), Arc::new(SystemClock));
    let state = AppState::new(events.clone(), Arc::new(auth)).with_metrics(prometheus);

    let cors = cors_layer(&config.server.cors_allowed_origin)
        .context("CORS_ALLOWED_ORIGIN is not a valid header value")?;
    let app = build_router(state, cors);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing database pools...");
    users.close().await;
    events.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
