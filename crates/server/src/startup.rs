use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;
use service::{
    product::repo::{InMemoryProductRepository, JsonFileProductRepository, SeaOrmProductRepository},
    ProductRepository,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the record store selected by `storage.backend`.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn ProductRepository>, StartupError> {
    let repo: Arc<dyn ProductRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory product store; data is lost on restart");
            Arc::new(InMemoryProductRepository::new())
        }
        StorageBackend::File => {
            let path = &cfg.storage.file_path;
            if path.trim().is_empty() {
                return Err(StartupError::InvalidConfig("storage.file_path is empty".into()));
            }
            Arc::new(JsonFileProductRepository::open(path.as_str()).await?)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.auto_migrate {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Storage(format!("migration failed: {e}")))?;
                info!("database migrations applied");
            }
            Arc::new(SeaOrmProductRepository::new(db))
        }
    };
    info!(backend = ?cfg.storage.backend, "product store ready");
    Ok(repo)
}

/// Build the router for a given configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repo = build_repository(cfg).await?;
    Ok(routes::build_router(ServerState::new(repo), build_cors()))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
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
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

/// Serve with an already validated configuration until a shutdown signal.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let bind_addr = (cfg.server.host.as_str(), cfg.server.port);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "starting product api server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
