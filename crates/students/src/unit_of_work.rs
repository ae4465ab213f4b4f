//! Batched, transactional persistence for groups and their students.
//!
//! Groups added to a [`UnitOfWork`] are saved together with every student
//! attached to them: unsaved groups are inserted first, then their students
//! are inserted (or re-pointed) with the group's generated identifier as
//! foreign key. Everything runs inside one transaction.

use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use crate::database::Database;
use crate::errors::AppError;
use crate::models::{Group, Student};

/// Pending groups and standalone students awaiting a single commit.
#[derive(Debug, Default)]
pub struct UnitOfWork {
    groups: Vec<Group>,
    students: Vec<Student>,
}

/// Entities written by [`UnitOfWork::commit`], with identifiers populated.
#[derive(Debug, Default)]
pub struct Committed {
    pub groups: Vec<Group>,
    pub students: Vec<Student>,
    pub inserted_groups: usize,
    pub inserted_students: usize,
    pub updated_students: usize,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks a group; its attached students are saved along with it.
    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Tracks a student that belongs to no group.
    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.students.is_empty()
    }

    /// Number of tracked entities, counting students reachable through groups.
    pub fn pending(&self) -> usize {
        self.groups
            .iter()
            .map(|g| 1 + g.student_count())
            .sum::<usize>()
            + self.students.len()
    }

    /// Writes all tracked entities in one transaction.
    ///
    /// Nothing is written if any statement fails.
    pub async fn commit(self, db: &Database) -> Result<Committed, AppError> {
        let mut committed = Committed::default();

        if self.is_empty() {
            return Ok(committed);
        }

        debug!("Committing unit of work with {} entities", self.pending());

        let mut tx = db.pool().begin().await?;

        for mut group in self.groups {
            if !group.is_persisted() {
                let id = insert_group(&mut tx, &group).await?;
                group.assign_id(id);
                committed.inserted_groups += 1;
            }

            let group_id = group.id();
            for student in group.students_mut() {
                if !student.is_persisted() {
                    student.assign_group(group_id);
                    let id = insert_student(&mut tx, student).await?;
                    student.assign_id(id);
                    committed.inserted_students += 1;
                } else if student.group_id() != group_id {
                    student.assign_group(group_id);
                    update_student_group(&mut tx, student).await?;
                    committed.updated_students += 1;
                }
            }

            committed.groups.push(group);
        }

        for mut student in self.students {
            if !student.is_persisted() {
                let id = insert_student(&mut tx, &student).await?;
                student.assign_id(id);
                committed.inserted_students += 1;
            }
            committed.students.push(student);
        }

        tx.commit().await?;

        info!(
            "Saved {} groups and {} students ({} students moved)",
            committed.inserted_groups, committed.inserted_students, committed.updated_students
        );

        Ok(committed)
    }
}

async fn insert_group(tx: &mut Transaction<'_, Sqlite>, group: &Group) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO student_groups (name) VALUES (?)")
        .bind(&group.name)
        .execute(&mut **tx)
        .await?;

    Ok(result.last_insert_rowid())
}

async fn insert_student(
    tx: &mut Transaction<'_, Sqlite>,
    student: &Student,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO students (last_name, first_name, patronymic, birthday, group_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&student.last_name)
    .bind(&student.first_name)
    .bind(&student.patronymic)
    .bind(student.birthday)
    .bind(student.group_id())
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn update_student_group(
    tx: &mut Transaction<'_, Sqlite>,
    student: &Student,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE students SET group_id = ? WHERE id = ?")
        .bind(student.group_id())
        .bind(student.id())
        .execute(&mut **tx)
        .await?;

    // The student was deleted after it was loaded
    if result.rows_affected() == 0 {
        return Err(AppError::Database(sqlx::Error::RowNotFound));
    }

    Ok(())
}
