use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use common::env::ensure_env;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Connect to the store and bring the schema up to date.
pub async fn prepare_state(db_cfg: &DatabaseConfig, api_key: &str) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(db_cfg).await?;
    models::db::migrate(&db).await?;
    Ok(ServerState::new(db, api_key))
}

/// Router with CORS and tracing layers, ready to serve.
pub fn build_app(cfg: &AppConfig, state: ServerState) -> Router {
    routes::build_router(state, &cfg.server.static_dir, build_cors())
}

/// Serve `cfg` until `shutdown` resolves, then close the database pool.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    ensure_env(&cfg.server.static_dir, cfg.database.sqlite_data_dir().as_deref()).await?;

    let state = prepare_state(&cfg.database, &cfg.auth.api_key).await?;
    let db = state.db.clone();
    let app = build_app(&cfg, state);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, debug = cfg.server.debug, "starting cafe api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    db.close().await?;
    info!("database connection closed");
    Ok(())
}
