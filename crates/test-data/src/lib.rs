//! Test data generation for the students console.
//!
//! This crate generates groups of students and seeds them through the
//! `students` unit of work, for integration tests and manual load testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let result = ScenarioBuilder::new()
//!     .with_groups(20)
//!     .with_students_per_group(10..=30)
//!     .build(&db, &mut rng)
//!     .await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::generators::{GroupGenerator, StudentGenConfig, StudentGenerator};
    pub use students::models::{Group, Student};
}
