//! Configuration types for test data generation.

use serde::{Deserialize, Serialize};

/// Configuration for seeding operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of groups to generate.
    pub group_count: usize,

    /// Number of students per group (inclusive range).
    pub students_per_group: (usize, usize),

    /// Number of additional groups created without students.
    pub empty_groups: usize,

    /// Groups committed per transaction.
    pub batch_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            group_count: 10,
            students_per_group: (5, 25),
            empty_groups: 0,
            batch_size: 50,
        }
    }
}
