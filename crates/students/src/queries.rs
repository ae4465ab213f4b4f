//! Aggregate queries over groups and their students.

use tracing::debug;

use crate::database::Database;
use crate::errors::AppError;
use crate::models::Group;

/// Orders groups by student count, largest first. Ties go to the lowest
/// group identifier.
pub fn rank_by_size(groups: &mut [Group]) {
    groups.sort_by(|a, b| {
        b.student_count()
            .cmp(&a.student_count())
            .then_with(|| a.id().cmp(&b.id()))
    });
}

/// All groups with their students, largest group first.
pub async fn groups_by_size(db: &Database) -> Result<Vec<Group>, AppError> {
    let mut groups = db.get_groups_with_students().await?;
    rank_by_size(&mut groups);
    Ok(groups)
}

/// The group with the most students, students eagerly loaded.
///
/// Returns [`AppError::NoGroups`] when there are no groups at all.
pub async fn group_with_most_students(db: &Database) -> Result<Group, AppError> {
    let group = groups_by_size(db)
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NoGroups)?;

    debug!(
        "Largest group is {:?} with {} students",
        group.name,
        group.student_count()
    );

    Ok(group)
}
