use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, AuthConfig};
use migration::MigratorTrait;
use service::domain::ROLE_ADMIN;
use service::users::service::NewUser;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Create the configured administrator if it does not exist yet.
async fn bootstrap_admin(state: &ServerState, auth: &AuthConfig) -> Result<(), StartupError> {
    let Some((name, password)) = auth.bootstrap_admin() else {
        warn!("no bootstrap administrator configured (ADMIN_NAME / ADMIN_PASSWORD)");
        return Ok(());
    };
    let input = NewUser { name: name.to_string(), password: password.to_string(), role: ROLE_ADMIN.to_string() };
    let user = state
        .users
        .ensure_user(input)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    info!(user_id = %user.id, name = %user.name, role = %user.role, "bootstrap administrator ready");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}

/// Public entry: connect, migrate, build the app and serve until a shutdown signal.
///
/// The binary loads `.env` and installs the tracing subscriber before calling this.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))?;
    common::env::ensure_env(&cfg.database.url).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("migrations applied");

    let state = ServerState::from_db(db);
    bootstrap_admin(&state, &cfg.auth).await?;

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "films library listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
