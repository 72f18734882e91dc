use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build state and router from configuration, opening the default list eagerly
/// so a broken data directory fails startup instead of the first request.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_env(&cfg.server.frontend_dir, &cfg.storage.data_dir).await?;

    let state = AppState::from_config(cfg)?;
    state.registry.resolve(&state.list_name).await?;
    if !state.search.has_api_key() {
        warn!("EXA_API_KEY not set; /search will answer 500");
    }

    Ok(routes::build_router(state, build_cors(), &cfg.server.frontend_dir))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, list = %cfg.storage.list_name, backend = ?cfg.storage.backend, "starting gift list server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
