//! Seed script - loads randomly generated groups and students
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! ```
//!
//! Uses `DATABASE_URL` when set, otherwise the "Default" connection string
//! from `appsettings.json`.

use anyhow::Context;
use rand::{SeedableRng, rngs::StdRng};
use students::config::{AppSettings, DEFAULT_CONNECTION, DEFAULT_SETTINGS_FILE, DatabaseSettings};
use students::database::Database;
use test_data::builders::ScenarioBuilder;
use test_data::config::SeedConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match std::env::var("DATABASE_URL") {
        Ok(url) => DatabaseSettings::new(url),
        Err(_) => AppSettings::load(DEFAULT_SETTINGS_FILE)?
            .database(DEFAULT_CONNECTION)
            .context("No database configured; set DATABASE_URL or appsettings.json")?,
    };

    let db = Database::connect(&settings).await?;
    db.ensure_created().await?;

    tracing::info!("Connected to database");

    // Reproducible data
    let mut rng = StdRng::seed_from_u64(12345);

    let result = ScenarioBuilder::from_config(&SeedConfig::default())
        .with_empty_groups(1)
        .with_metrics(true)
        .build(&db, &mut rng)
        .await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Groups: {}", result.groups.len());
    tracing::info!("  Students: {}", result.student_count());
    if let Some(metrics) = &result.metrics {
        tracing::info!("  Generation: {} ms", metrics.generation_time_ms);
        tracing::info!("  Seeding: {} ms", metrics.seeding_time_ms);
    }

    db.close().await;
    Ok(())
}
