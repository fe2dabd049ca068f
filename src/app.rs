/*
 * Responsibility
 * - tracing 初期化 → Config 読み込み → 依存生成 → Router 組み立て
 * - 横断 middleware の適用 (http / security headers / CORS)
 * - axum::serve() で起動
 */
use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::{api, config::Config, middleware, state::AppState};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(db);
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, env = ?config.app_env, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Full application: versioned routes plus transport layers.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let app = build_router(state);
    let app = middleware::http::apply(app, config.request_timeout);
    let app = middleware::security_headers::apply(app);
    middleware::cors::apply(app, config)
}

/// Versioned routes only, without transport layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes(&state))
        .with_state(state)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
