//! Fluent builder APIs for test scenarios.
//!
//! The [`ScenarioBuilder`] generates groups of students and seeds them.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioMetrics, ScenarioResult};
