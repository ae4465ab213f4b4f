//! Fluent builder for constructing test scenarios.

use std::ops::RangeInclusive;
use std::time::Instant;

use rand::Rng;
use students::database::Database;
use students::models::Group;
use time::OffsetDateTime;

use crate::config::SeedConfig;
use crate::db::{SeedError, Seeder};
use crate::generators::{GroupGenerator, StudentGenConfig, StudentGenerator};

/// Result of building and seeding a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    /// Generated groups. Identifiers are set once the scenario is seeded.
    pub groups: Vec<Group>,
    /// Metrics from scenario generation (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

impl ScenarioResult {
    pub fn student_count(&self) -> usize {
        self.groups.iter().map(Group::student_count).sum()
    }
}

/// Performance metrics from scenario generation.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent seeding database (milliseconds, 0 if build_data used).
    pub seeding_time_ms: u64,
    /// Number of groups generated.
    pub group_count: usize,
    /// Number of students generated.
    pub student_count: usize,
}

/// Builder for creating complete test scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_groups(20)
///     .with_students_per_group(10..=30)
///     .with_empty_groups(2)
///     .build(&db, &mut rng)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    group_count: usize,
    students_per_group: RangeInclusive<usize>,
    empty_groups: usize,
    student_config: StudentGenConfig,
    batch_size: usize,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a new scenario builder with default settings.
    pub fn new() -> Self {
        Self::from_config(&SeedConfig::default())
    }

    /// Creates a builder from a seed configuration.
    pub fn from_config(config: &SeedConfig) -> Self {
        let (min, max) = config.students_per_group;
        Self {
            group_count: config.group_count,
            students_per_group: min..=max.max(min),
            empty_groups: config.empty_groups,
            student_config: StudentGenConfig::default(),
            batch_size: config.batch_size,
            track_metrics: false,
        }
    }

    /// Sets the number of populated groups to generate.
    pub fn with_groups(mut self, count: usize) -> Self {
        self.group_count = count;
        self
    }

    /// Sets the range of students per populated group. A reversed range
    /// collapses to its start.
    pub fn with_students_per_group(mut self, range: RangeInclusive<usize>) -> Self {
        let (min, max) = range.into_inner();
        self.students_per_group = min..=max.max(min);
        self
    }

    /// Adds groups that have no students.
    pub fn with_empty_groups(mut self, count: usize) -> Self {
        self.empty_groups = count;
        self
    }

    /// Sets the student generation configuration.
    pub fn with_student_config(mut self, config: StudentGenConfig) -> Self {
        self.student_config = config;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Builds the scenario (generates data but doesn't seed database).
    pub fn build_data(&self, rng: &mut impl Rng) -> ScenarioResult {
        let start_time = self.track_metrics.then(Instant::now);
        let now = OffsetDateTime::now_utc();

        let group_gen = GroupGenerator::with_student_generator(StudentGenerator::with_config(
            self.student_config.clone(),
        ));

        let mut groups = Vec::with_capacity(self.group_count + self.empty_groups);
        for index in 0..self.group_count {
            let size = rng.gen_range(self.students_per_group.clone());
            groups.push(group_gen.generate(index, size, now, rng));
        }
        for index in self.group_count..self.group_count + self.empty_groups {
            groups.push(group_gen.generate(index, 0, now, rng));
        }

        let metrics = start_time.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            seeding_time_ms: 0,
            group_count: groups.len(),
            student_count: groups.iter().map(Group::student_count).sum(),
        });

        ScenarioResult { groups, metrics }
    }

    /// Builds the scenario and seeds it into the database.
    pub async fn build(
        self,
        db: &Database,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        let ScenarioResult { groups, mut metrics } = self.build_data(rng);
        let seed_start = self.track_metrics.then(Instant::now);

        let seeder = Seeder::new(db.clone()).with_batch_size(self.batch_size);
        let groups = seeder.seed_groups(groups).await?;

        if let (Some(start), Some(metrics)) = (seed_start, metrics.as_mut()) {
            metrics.seeding_time_ms = start.elapsed().as_millis() as u64;
        }

        Ok(ScenarioResult { groups, metrics })
    }

    // ========== Preset scenarios ==========

    /// Groups of identical size, for exercising the largest-group tie-break.
    pub fn tied_groups(count: usize, size: usize) -> Self {
        Self::new()
            .with_groups(count)
            .with_students_per_group(size..=size)
    }

    /// A larger data set with a few empty groups, with metrics enabled.
    pub fn load_test() -> Self {
        Self::new()
            .with_groups(200)
            .with_students_per_group(10..=40)
            .with_empty_groups(10)
            .with_metrics(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use students::queries::group_with_most_students;

    #[test]
    fn test_build_data() {
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::new()
            .with_groups(4)
            .with_students_per_group(2..=3)
            .with_empty_groups(1)
            .build_data(&mut rng);

        assert_eq!(result.groups.len(), 5);
        for group in &result.groups[..4] {
            assert!((2..=3).contains(&group.student_count()));
        }
        assert_eq!(result.groups[4].student_count(), 0);
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_from_config() {
        let builder = ScenarioBuilder::from_config(&SeedConfig {
            group_count: 3,
            students_per_group: (4, 2),
            empty_groups: 1,
            batch_size: 10,
        });

        assert_eq!(builder.group_count, 3);
        assert_eq!(builder.students_per_group, 4..=4);
        assert_eq!(builder.empty_groups, 1);
    }

    #[test]
    fn test_reversed_students_range_is_clamped() {
        let mut rng = rand::thread_rng();

        let builder = ScenarioBuilder::new()
            .with_groups(2)
            .with_students_per_group(5..=2);
        assert_eq!(builder.students_per_group, 5..=5);

        let result = builder.build_data(&mut rng);
        assert!(result.groups.iter().all(|g| g.student_count() == 5));
    }

    #[test]
    fn test_metrics_tracking() {
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::tied_groups(3, 2)
            .with_metrics(true)
            .build_data(&mut rng);

        let metrics = result.metrics.expect("metrics enabled");
        assert_eq!(metrics.group_count, 3);
        assert_eq!(metrics.student_count, 6);
        assert_eq!(metrics.seeding_time_ms, 0);
    }

    #[test]
    fn test_preset_load_test() {
        let builder = ScenarioBuilder::load_test();
        assert_eq!(builder.group_count, 200);
        assert_eq!(builder.empty_groups, 10);
        assert!(builder.track_metrics);
    }

    #[sqlx::test(migrator = "students::database::MIGRATOR")]
    async fn test_build_seeds_database(pool: SqlitePool) {
        let db = Database::new(pool);
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::new()
            .with_groups(6)
            .with_students_per_group(1..=5)
            .with_empty_groups(2)
            .build(&db, &mut rng)
            .await
            .unwrap();

        assert_eq!(db.count_groups().await.unwrap(), 8);
        assert_eq!(
            db.count_students().await.unwrap(),
            result.student_count() as i64
        );

        let largest = group_with_most_students(&db).await.unwrap();
        let max_size = result.groups.iter().map(Group::student_count).max();
        assert_eq!(Some(largest.student_count()), max_size);
    }

    #[sqlx::test(migrator = "students::database::MIGRATOR")]
    async fn test_tied_groups_pick_lowest_id(pool: SqlitePool) {
        let db = Database::new(pool);
        let mut rng = rand::thread_rng();

        let result = ScenarioBuilder::tied_groups(4, 3)
            .build(&db, &mut rng)
            .await
            .unwrap();
        let lowest_id = result.groups.iter().filter_map(Group::id).min();

        for _ in 0..3 {
            let largest = group_with_most_students(&db).await.unwrap();
            assert_eq!(largest.id(), lowest_id);
            assert_eq!(largest.student_count(), 3);
        }
    }
}
