/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool, TokenVerifier) → Router 組み立て
 * - Middleware の適用 (HTTP 共通 / Bearer 認証)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, LogLevel},
    middleware::http::{self, HttpPolicy},
    repos::PgUserStore,
    services::auth::build_token_verifier,
    state::AppState,
};

fn init_tracing(level: LogLevel) {
    // Prefer RUST_LOG if set; otherwise fall back to LOG_LEVEL.
    // Ex:
    // RUST_LOG=info,basic_server=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    init_tracing(config.log_level);
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, HttpPolicy::from(&config));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    // Build process-level services here and inject them into the shared application state.
    let auth = build_token_verifier(config)?;

    // Connect eagerly so a bad DATABASE_URL stops startup instead of failing requests.
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await
        .context("failed to connect to the user store")?;

    let users = Arc::new(PgUserStore::new(pool));

    Ok(AppState::new(auth, users))
}

fn build_router(state: AppState, policy: HttpPolicy) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    http::apply(router, policy)
}
