use std::str::FromStr;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::auth::password;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::profile;

const DEFAULT_USERNAME: &str = "admin";

/// Connect a pool with the configured size, acquire timeout and per-statement
/// timeout, so a stalled backend fails the request instead of hanging it.
pub async fn init_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?.options([(
        "statement_timeout",
        config.db_statement_timeout.as_millis().to_string(),
    )]);
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create the default `admin` profile when no profile exists yet.
pub async fn seed_default_profile(pool: &PgPool, password: &str) -> Result<(), AppError> {
    if profile::count(pool).await? > 0 {
        return Ok(());
    }
    let hash = password::hash_password(password)?;
    let id = profile::create(pool, DEFAULT_USERNAME, &hash).await?;
    log::info!("Seeded default profile '{DEFAULT_USERNAME}' ({id})");
    Ok(())
}
