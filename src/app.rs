/*
 * Responsibility
 * - Config 読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (security headers / CORS / request id, trace, limits)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{self, cors::CorsPolicy};
use crate::repos::pg_content_repo::PgContentRepo;
use crate::state::AppState;

/// Schema for contents / entities, applied on every startup (already-applied
/// versions are skipped).
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

fn init_tracing() {
    // Prefer RUST_LOG if set, e.g.
    // RUST_LOG=info,message_manager_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    MIGRATOR
        .run(&db)
        .await
        .context("failed to apply database migrations")?;
    tracing::info!("database migrations applied");

    Ok(AppState::new(Arc::new(PgContentRepo::new(db))))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, &CorsPolicy::from_config(config));
    middleware::http::apply(router, config)
}
