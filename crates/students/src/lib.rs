//! Students and groups: seeds an empty database with sample data, then
//! reports the group with the most students.
//!
//! ```rust,ignore
//! let settings = AppSettings::load(DEFAULT_SETTINGS_FILE)?;
//! students::run(&settings, &mut std::io::stdout()).await?;
//! ```

pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod queries;
pub mod report;
pub mod seed;
pub mod unit_of_work;

use std::io::Write;

use tracing::info;

use crate::{
    config::{AppSettings, DEFAULT_CONNECTION, DatabaseSettings},
    database::Database,
    errors::AppError,
    models::Group,
    queries::group_with_most_students,
    report::write_group_report,
    seed::{SeedOutcome, seed_if_empty},
};

/// Opens the database, creates the schema when missing and seeds it if no
/// students exist. The connection is closed before returning.
pub async fn prepare_database(settings: &DatabaseSettings) -> Result<SeedOutcome, AppError> {
    let db = Database::connect(settings).await?;

    let outcome: Result<SeedOutcome, AppError> = async {
        db.ensure_created().await?;
        seed_if_empty(&db).await
    }
    .await;

    db.close().await;
    outcome
}

/// Finds the largest group on a fresh connection and writes it to `out`.
pub async fn report_largest_group(
    settings: &DatabaseSettings,
    out: &mut impl Write,
) -> Result<Group, AppError> {
    let db = Database::connect(settings).await?;
    let group = group_with_most_students(&db).await;
    db.close().await;

    let group = group?;
    write_group_report(out, &group)?;
    Ok(group)
}

/// Runs the whole program: schema bootstrap, seed, query, print.
pub async fn run(settings: &AppSettings, out: &mut impl Write) -> Result<Group, AppError> {
    let db_settings = settings.database(DEFAULT_CONNECTION)?;

    match prepare_database(&db_settings).await? {
        SeedOutcome::Seeded { groups, students } => {
            info!("Database seeded with {groups} groups and {students} students")
        }
        SeedOutcome::AlreadySeeded => info!("Database already contains students"),
    }

    report_largest_group(&db_settings, out).await
}
