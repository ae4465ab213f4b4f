use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::DatabaseSettings;
use crate::errors::AppError;
use crate::models::{Group, Student};

/// Schema for the `student_groups` and `students` tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// One row of the groups-with-students join. Student columns are NULL for
/// groups without members.
#[derive(Debug, sqlx::FromRow)]
struct GroupStudentRow {
    group_id: i64,
    group_name: String,
    student_id: Option<i64>,
    last_name: Option<String>,
    first_name: Option<String>,
    patronymic: Option<String>,
    birthday: Option<OffsetDateTime>,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for the configured database, creating the database file
    /// when it does not exist yet.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        info!("Connecting to database at {}", settings.url);

        let options = SqliteConnectOptions::from_str(&settings.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Creates the tables if they are missing. No-op on an up-to-date schema.
    pub async fn ensure_created(&self) -> Result<(), AppError> {
        MIGRATOR.run(&self.pool).await?;
        debug!("Schema is up to date");
        Ok(())
    }

    pub async fn has_students(&self) -> Result<bool, AppError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students)")
            .fetch_one(&self.pool)
            .await?;

        Ok(exists != 0)
    }

    pub async fn count_students(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_groups(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM student_groups")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn get_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as(
            r#"
            SELECT id, last_name, first_name, patronymic, birthday, group_id
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    pub async fn get_group_students(&self, group_id: i64) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as(
            r#"
            SELECT id, last_name, first_name, patronymic, birthday, group_id
            FROM students
            WHERE group_id = ?
            ORDER BY id
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Loads every group together with its students in a single query.
    ///
    /// Groups come back in identifier order; students within a group are
    /// ordered by their identifier.
    pub async fn get_groups_with_students(&self) -> Result<Vec<Group>, AppError> {
        let rows: Vec<GroupStudentRow> = sqlx::query_as(
            r#"
            SELECT g.id AS group_id, g.name AS group_name,
                   s.id AS student_id, s.last_name, s.first_name, s.patronymic, s.birthday
            FROM student_groups g
            LEFT JOIN students s ON s.group_id = g.id
            ORDER BY g.id, s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(fold_group_rows(rows))
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool, waiting for open connections to be released.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Groups consecutive join rows by group. Rows must be ordered by group id.
fn fold_group_rows(rows: Vec<GroupStudentRow>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for row in rows {
        if groups.last().and_then(Group::id) != Some(row.group_id) {
            groups.push(Group::from_storage(row.group_id, row.group_name));
        }

        let (Some(student_id), Some(last_name), Some(first_name), Some(patronymic), Some(birthday)) = (
            row.student_id,
            row.last_name,
            row.first_name,
            row.patronymic,
            row.birthday,
        ) else {
            continue;
        };

        if let Some(group) = groups.last_mut() {
            group.students_mut().push(Student::from_storage(
                student_id,
                last_name,
                first_name,
                patronymic,
                birthday,
                Some(row.group_id),
            ));
        }
    }

    groups
}
