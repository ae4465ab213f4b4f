//! Database seeding utilities.

use students::database::Database;
use students::errors::AppError;
use students::models::Group;
use students::unit_of_work::UnitOfWork;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    App(#[from] AppError),
}

/// Database seeder for inserting generated test data.
pub struct Seeder {
    db: Database,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder for the given database.
    pub fn new(db: Database) -> Self {
        Self { db, batch_size: 50 }
    }

    /// Sets how many groups are committed per transaction.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Seeds groups together with their attached students.
    ///
    /// Returns the groups with identifiers assigned.
    pub async fn seed_groups(&self, groups: Vec<Group>) -> Result<Vec<Group>, SeedError> {
        let total = groups.len();
        info!("Seeding {} groups...", total);

        let mut saved = Vec::with_capacity(total);
        let mut pending = groups.into_iter().peekable();

        while pending.peek().is_some() {
            let mut uow = UnitOfWork::new();
            for group in pending.by_ref().take(self.batch_size) {
                uow.add_group(group);
            }

            let committed = uow.commit(&self.db).await?;
            saved.extend(committed.groups);
            info!("  Seeded {}/{} groups", saved.len(), total);
        }

        info!("Seeded {} groups", saved.len());
        Ok(saved)
    }

    /// Clears all seeded data.
    ///
    /// **WARNING**: This deletes all rows from both tables.
    pub async fn clear_all(&self) -> Result<(), SeedError> {
        info!("Clearing all seeded data...");

        // Students reference groups
        sqlx::query("DELETE FROM students")
            .execute(self.db.pool())
            .await?;
        sqlx::query("DELETE FROM student_groups")
            .execute(self.db.pool())
            .await?;

        info!("All data cleared");
        Ok(())
    }

    /// Returns the underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use students::models::Student;
    use time::OffsetDateTime;

    fn group(name: &str, size: usize) -> Group {
        let mut group = Group::new(name);
        for i in 0..size {
            group.add_student(Student::new(
                format!("Student{i}"),
                "Test",
                "Testovich",
                OffsetDateTime::now_utc(),
            ));
        }
        group
    }

    #[sqlx::test(migrator = "students::database::MIGRATOR")]
    async fn test_seed_groups_in_batches(pool: SqlitePool) {
        let seeder = Seeder::new(Database::new(pool)).with_batch_size(2);
        let groups = (0..5).map(|i| group(&format!("G{i}"), i)).collect();

        let saved = seeder.seed_groups(groups).await.unwrap();

        assert_eq!(saved.len(), 5);
        assert!(saved.iter().all(|g| g.id().is_some()));
        assert_eq!(seeder.db().count_groups().await.unwrap(), 5);
        assert_eq!(seeder.db().count_students().await.unwrap(), 10);
    }

    #[sqlx::test(migrator = "students::database::MIGRATOR")]
    async fn test_clear_all(pool: SqlitePool) {
        let seeder = Seeder::new(Database::new(pool));
        seeder.seed_groups(vec![group("G", 3)]).await.unwrap();

        seeder.clear_all().await.unwrap();

        assert_eq!(seeder.db().count_groups().await.unwrap(), 0);
        assert_eq!(seeder.db().count_students().await.unwrap(), 0);
    }
}
