use app_state::DatabaseConstants;
use color_eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Connect a pool using the configured limits and run any pending
/// migrations (schema plus the role/permission seed).
pub async fn connect_and_migrate(
    database_url: &str,
    database: &DatabaseConstants,
) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections)
        .max_lifetime(Duration::from_secs(database.max_lifetime))
        .idle_timeout(Duration::from_secs(database.idle_timeout))
        .acquire_timeout(Duration::from_secs(database.acquire_timeout))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database connected, migrations up to date.");

    Ok(pool)
}
