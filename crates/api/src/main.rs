//! Fitspace avatar service entry point.

use std::sync::Arc;

use fitspace_api::{create_router, AppState};
use fitspace_infra::{Config, DbManager, SqliteAvatarStore};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(addr = %config.bind_addr, db_path = %config.db_path, "starting fitspace api");

    let db = Arc::new(DbManager::new(&config.db_path, config.db_pool_size)?);
    db.run_migrations()?;
    db.health_check()?;

    let state = AppState::new(Arc::new(SqliteAvatarStore::new(db)));
    let app = create_router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(address = %config.bind_addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,fitspace=debug")),
        )
        .with(format)
        .init();
}
