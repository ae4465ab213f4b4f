//! Student generation with plausible names and ages.

use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use rand::Rng;
use time::{Duration, OffsetDateTime};

use students::models::{Student, years_before};

/// Patronymics drawn for generated students.
const PATRONYMICS: &[&str] = &[
    "Alexandrovich", "Andreevich", "Dmitrievich", "Ivanovich", "Mikhailovich", "Nikolaevich",
    "Pavlovich", "Petrovich", "Sergeevich", "Vladimirovich",
];

/// Configuration for student generation.
#[derive(Debug, Clone)]
pub struct StudentGenConfig {
    /// Youngest age in whole years.
    pub min_age: i32,
    /// Oldest age in whole years.
    pub max_age: i32,
}

impl Default for StudentGenConfig {
    fn default() -> Self {
        Self {
            min_age: 17,
            max_age: 30,
        }
    }
}

/// Generates unsaved students for seeding and tests.
pub struct StudentGenerator {
    config: StudentGenConfig,
}

impl StudentGenerator {
    /// Creates a new student generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: StudentGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: StudentGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single student whose age falls in the configured range.
    pub fn generate(&self, now: OffsetDateTime, rng: &mut impl Rng) -> Student {
        let last_name: String = LastName().fake_with_rng(rng);
        let first_name: String = FirstName().fake_with_rng(rng);
        let patronymic = PATRONYMICS[rng.gen_range(0..PATRONYMICS.len())];

        let age = rng.gen_range(self.config.min_age..=self.config.max_age);
        // Spread birthdays across the year instead of all landing on today.
        let birthday = years_before(now, age) - Duration::days(rng.gen_range(0..365));

        Student::new(last_name, first_name, patronymic, birthday)
    }

    /// Generates multiple students.
    pub fn generate_batch(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<Student> {
        (0..count).map(|_| self.generate(now, rng)).collect()
    }
}

impl Default for StudentGenerator {
    fn default() -> Self {
        Self::new()
    }
}
