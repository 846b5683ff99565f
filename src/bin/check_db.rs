//! Connectivity smoke test: counts `profiles` through the same store the
//! server uses and exits non-zero if the backend can't be reached.

use std::process::ExitCode;
use std::time::Duration;

use growth_requirements::config::AppConfig;
use growth_requirements::db;
use growth_requirements::requirements::{PgStore, RequirementsStore};

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Testing database connection...");

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Connection test failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match db::init_pool(&config).await {
        Ok(p) => p,
        Err(e) => {
            log::error!("Connection test failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = PgStore::new(pool);
    let deadline = config.db_statement_timeout + Duration::from_secs(1);
    match tokio::time::timeout(deadline, store.count_profiles()).await {
        Ok(Ok(count)) => {
            log::info!("Database connection successful ({count} profiles)");
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            log::error!("Database connection failed: {e}");
            ExitCode::FAILURE
        }
        Err(_) => {
            log::error!("Database connection failed: no answer within {deadline:?}");
            ExitCode::FAILURE
        }
    }
}
