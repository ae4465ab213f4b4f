//! Initial data for an empty database.

use time::OffsetDateTime;
use tracing::info;

use crate::database::Database;
use crate::errors::AppError;
use crate::models::{Group, Student, years_before};
use crate::unit_of_work::UnitOfWork;

/// Sample student: last name, first name, patronymic, age in years.
type SampleStudent = (&'static str, &'static str, &'static str, i32);

const SAMPLE_STUDENTS: [SampleStudent; 3] = [
    ("Иванов", "Иван", "Иванович", 21),
    ("Петров", "Пётр", "Петрович", 24),
    ("Сидоров", "Сидор", "Сидорович", 22),
];

pub const SAMPLE_GROUPS: [&str; 2] = ["Группа 1", "Группа 2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The database was empty and the sample data was written.
    Seeded { groups: usize, students: usize },
    /// Students already existed; nothing was written.
    AlreadySeeded,
}

/// Builds the sample groups in memory. The first group holds the first two
/// students, the second group holds the third.
pub fn sample_groups(now: OffsetDateTime) -> Vec<Group> {
    let [ivanov, petrov, sidorov] = SAMPLE_STUDENTS.map(|(last_name, first_name, patronymic, age)| {
        Student::new(last_name, first_name, patronymic, years_before(now, age))
    });

    let mut first = Group::new(SAMPLE_GROUPS[0]);
    let mut second = Group::new(SAMPLE_GROUPS[1]);

    first.add_student(ivanov);
    first.add_student(petrov);
    second.add_student(sidorov);

    vec![first, second]
}

/// Writes the sample groups and students unless any student already exists.
///
/// Students are saved only through their groups.
pub async fn seed_if_empty(db: &Database) -> Result<SeedOutcome, AppError> {
    if db.has_students().await? {
        info!("Students already present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut uow = UnitOfWork::new();
    for group in sample_groups(OffsetDateTime::now_utc()) {
        uow.add_group(group);
    }

    let committed = uow.commit(db).await?;

    info!(
        "Seeded {} groups with {} students",
        committed.inserted_groups, committed.inserted_students
    );

    Ok(SeedOutcome::Seeded {
        groups: committed.inserted_groups,
        students: committed.inserted_students,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_sample_groups_layout() {
        let now = datetime!(2026-10-16 10:00:00 UTC);
        let groups = sample_groups(now);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Группа 1");
        assert_eq!(groups[1].name, "Группа 2");

        let first: Vec<_> = groups[0].students().iter().map(Student::full_name).collect();
        assert_eq!(first, ["Иванов Иван Иванович", "Петров Пётр Петрович"]);

        let second: Vec<_> = groups[1].students().iter().map(Student::full_name).collect();
        assert_eq!(second, ["Сидоров Сидор Сидорович"]);
    }

    #[test]
    fn test_sample_birthdays() {
        let now = datetime!(2026-10-16 10:00:00 UTC);
        let groups = sample_groups(now);

        assert_eq!(groups[0].students()[0].birthday.year(), 2005);
        assert_eq!(groups[0].students()[1].birthday.year(), 2002);
        assert_eq!(groups[1].students()[0].birthday.year(), 2004);
    }

    #[test]
    fn test_sample_entities_are_unsaved() {
        let groups = sample_groups(OffsetDateTime::now_utc());

        for group in &groups {
            assert!(!group.is_persisted());
            assert!(group.students().iter().all(|s| !s.is_persisted()));
        }
    }
}
