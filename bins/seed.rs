use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info};

/// Upsert the demo catalog. Safe to run repeatedly; existing slugs are left as they are.
#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    match seed().await {
        Ok(count) => {
            info!(service = "seed", event = "done", count, "catalog seeded");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "seed", event = "failed", error = %e, "seeding failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn seed() -> anyhow::Result<usize> {
    // only the [database] section matters here; auth settings are not required
    let mut cfg = configs::AppConfig::load()?.database;
    cfg.normalize_from_env();
    if cfg.url.trim().is_empty() {
        cfg.url = models::db::DATABASE_URL.clone();
    }
    cfg.validate()?;

    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let products = service::seed::seed_products(&db).await?;
    Ok(products.len())
}
