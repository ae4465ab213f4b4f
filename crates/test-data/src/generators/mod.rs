//! Entity generators for test data.
//!
//! - [`StudentGenerator`]: students with names and birthdays
//! - [`GroupGenerator`]: named groups with attached students

pub mod group;
pub mod student;

pub use group::GroupGenerator;
pub use student::{StudentGenConfig, StudentGenerator};
