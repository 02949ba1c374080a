//! Chart payloads and PNG rendering
//!
//! A [`Chart`] pairs presentation parameters with the aggregate it displays. The
//! renderer only consumes finished aggregates; nothing here computes statistics
//! beyond histogram binning.

pub mod layout;
pub mod render;
pub mod theme;

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::group::{GroupCount, GroupStats};
use crate::stats::Statistics;

pub use layout::Unit;
pub use render::render_chart;
pub use theme::{PlotTheme, Rgb};

/// Number of bins on distribution charts
pub const HISTOGRAM_BINS: usize = 25;

/// Presentation parameters of one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub file_name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Fill colour; `None` gives each bar its own hue
    pub color: Option<Rgb>,
    /// Figure size in inches
    pub size_in: (f64, f64),
}

/// What a chart draws
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Distribution of one column with its summary
    Histogram {
        values: Vec<f64>,
        stats: Statistics,
        unit: Unit,
    },
    /// Bars of group counts, optionally with a dashed mean line
    Counts {
        entries: Vec<GroupCount>,
        show_labels: bool,
        reference: Option<f64>,
    },
    /// Bars of group means with one standard deviation error bars
    Means { groups: Vec<GroupStats>, unit: Unit },
}

impl ChartData {
    /// Whether there is anything to draw
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Histogram { values, .. } => values.is_empty(),
            ChartData::Counts { entries, .. } => entries.is_empty(),
            ChartData::Means { groups, .. } => groups.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub spec: ChartSpec,
    pub data: ChartData,
}

/// Create the output directory if needed; safe to call repeatedly
pub fn ensure_output_dir(dir: &Path) -> crate::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}
