//! Player Insight Engine - descriptive statistics and charts for basketball rosters
//!
//! This library loads a cleaned player table, normalizes heterogeneous height and
//! weight cells, aggregates them by position and team, and renders the results as
//! annotated PNG charts.

pub mod chart;
pub mod dataset;
pub mod engine;
pub mod group;
pub mod player;
pub mod stats;
pub mod utils;

pub use chart::PlotTheme;
pub use dataset::{DataPoint, Dataset, RawValue};
pub use engine::{InsightEngine, InsightReport};
pub use player::Player;
pub use stats::Statistics;
pub use utils::InsightError;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
