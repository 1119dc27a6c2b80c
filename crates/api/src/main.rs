use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use framerate_api::config::{ServerConfig, StoreBackend};
use framerate_api::router::build_app_router;
use framerate_api::state::AppState;
use framerate_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        store = config.store.as_str(),
        "Loaded server configuration"
    );

    let state = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = connect_database(database_url, &config).await;
            AppState::new(pool, config.clone())
        }
        StoreBackend::Memory => {
            tracing::warn!("Serving the in-memory reference store; submissions are not persisted");
            AppState::in_memory(config.clone())
        }
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Serving FPS estimates");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "framerate_api=debug,framerate_core=debug,framerate_db=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and optionally migrate the benchmark database.
async fn connect_database(database_url: &str, config: &ServerConfig) -> DbPool {
    let pool = framerate_db::create_pool(database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    framerate_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!(max_connections = config.db_max_connections, "Database reachable");

    if config.run_migrations {
        framerate_db::run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied");
    } else {
        tracing::info!("RUN_MIGRATIONS=false, leaving schema untouched");
    }
    pool
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
