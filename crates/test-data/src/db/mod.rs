//! Database integration for seeding test data.
//!
//! The [`Seeder`] writes generated groups (and their students) through the
//! unit of work in batches, and can wipe the seeded tables.

mod seeder;

pub use seeder::{SeedError, Seeder};
