use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::chart::theme::{CORAL, SALMON, SKY_BLUE, STEEL_BLUE, TEAL};
use crate::chart::{ensure_output_dir, render_chart, Chart, ChartData, ChartSpec, PlotTheme, Unit};
use crate::dataset::Dataset;
use crate::group::{group_stats, value_counts, FrequencyTable, GroupStats};
use crate::player::{column_values, normalize_players, GroupKey, Player, ValueColumn};
use crate::stats::Statistics;

/// Every aggregate the charts are drawn from
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub players: usize,
    pub height: Option<Statistics>,
    pub weight: Option<Statistics>,
    pub positions: FrequencyTable,
    pub teams: FrequencyTable,
    pub mean_players_per_team: Option<f64>,
    pub height_by_position: Vec<GroupStats>,
    pub weight_by_position: Vec<GroupStats>,
}

/// Computes roster aggregates over a normalized player table
#[derive(Debug)]
pub struct InsightEngine {
    players: Vec<Player>,
}

impl InsightEngine {
    /// Normalize a loaded table; fails if a required column is absent
    pub fn from_dataset(dataset: &Dataset) -> crate::Result<Self> {
        let players = normalize_players(dataset)?;
        info!(
            dataset = %dataset.name,
            rows = players.len(),
            "normalized player table"
        );
        Ok(Self::from_players(players))
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Distribution summary of heights in inches
    pub fn height_summary(&self) -> Option<Statistics> {
        let heights = column_values(&self.players, ValueColumn::HeightIn);
        debug!(
            present = heights.len(),
            missing = self.players.len() - heights.len(),
            "height values"
        );
        Statistics::compute("height_in", &heights)
    }

    /// Distribution summary of weights in pounds
    pub fn weight_summary(&self) -> Option<Statistics> {
        let weights = column_values(&self.players, ValueColumn::Weight);
        debug!(
            present = weights.len(),
            missing = self.players.len() - weights.len(),
            "weight values"
        );
        Statistics::compute("weight", &weights)
    }

    pub fn position_counts(&self) -> FrequencyTable {
        value_counts(&self.players, GroupKey::Position)
    }

    pub fn team_counts(&self) -> FrequencyTable {
        value_counts(&self.players, GroupKey::Team)
    }

    pub fn height_by_position(&self) -> Vec<GroupStats> {
        group_stats(&self.players, GroupKey::Position, ValueColumn::HeightIn)
    }

    pub fn weight_by_position(&self) -> Vec<GroupStats> {
        group_stats(&self.players, GroupKey::Position, ValueColumn::Weight)
    }

    /// Compute all six aggregates
    pub fn report(&self) -> InsightReport {
        let teams = self.team_counts();
        InsightReport {
            players: self.players.len(),
            height: self.height_summary(),
            weight: self.weight_summary(),
            positions: self.position_counts(),
            mean_players_per_team: teams.mean_count(),
            teams,
            height_by_position: self.height_by_position(),
            weight_by_position: self.weight_by_position(),
        }
    }

    /// The six charts in output order; distribution charts without data are left out
    pub fn charts(&self) -> Vec<Chart> {
        let mut charts = Vec::with_capacity(6);

        if let Some(stats) = self.height_summary() {
            charts.push(Chart {
                spec: ChartSpec {
                    file_name: "1_height_distribution.png",
                    title: "Distribution of NBA Player Heights",
                    subtitle: "Approximately Normal with Slight Right Skew",
                    x_label: "Height (inches)",
                    y_label: "Number of Players",
                    color: Some(STEEL_BLUE),
                    size_in: (12.0, 6.0),
                },
                data: ChartData::Histogram {
                    values: column_values(&self.players, ValueColumn::HeightIn),
                    stats,
                    unit: Unit::Inches,
                },
            });
        }

        if let Some(stats) = self.weight_summary() {
            charts.push(Chart {
                spec: ChartSpec {
                    file_name: "2_weight_distribution.png",
                    title: "Distribution of NBA Player Weights",
                    subtitle: "Bell-Shaped with Some Heavier Outliers",
                    x_label: "Weight (lbs)",
                    y_label: "Number of Players",
                    color: Some(CORAL),
                    size_in: (12.0, 6.0),
                },
                data: ChartData::Histogram {
                    values: column_values(&self.players, ValueColumn::Weight),
                    stats,
                    unit: Unit::Pounds,
                },
            });
        }

        charts.push(Chart {
            spec: ChartSpec {
                file_name: "3_position_distribution.png",
                title: "Active NBA Players by Position",
                subtitle: "Relatively Balanced Distribution Across Positions",
                x_label: "Position",
                y_label: "Number of Players",
                color: None,
                size_in: (10.0, 6.0),
            },
            data: ChartData::Counts {
                entries: self.position_counts().entries,
                show_labels: true,
                reference: None,
            },
        });

        let teams = self.team_counts();
        charts.push(Chart {
            spec: ChartSpec {
                file_name: "4_players_per_team.png",
                title: "Active Players per Team",
                subtitle: "Most Teams Maintain ~13-17 Player Rosters",
                x_label: "Teams (sorted by player count)",
                y_label: "Number of Players",
                color: Some(TEAL),
                size_in: (14.0, 7.0),
            },
            data: ChartData::Counts {
                reference: teams.mean_count(),
                entries: teams.entries,
                show_labels: false,
            },
        });

        charts.push(Chart {
            spec: ChartSpec {
                file_name: "5_height_by_position.png",
                title: "Average Height by Position with Standard Deviation",
                subtitle: "Clear Hierarchical Pattern: Centers Tallest, Guards Shortest",
                x_label: "Position",
                y_label: "Average Height (inches)",
                color: Some(SKY_BLUE),
                size_in: (10.0, 6.0),
            },
            data: ChartData::Means {
                groups: self.height_by_position(),
                unit: Unit::Inches,
            },
        });

        charts.push(Chart {
            spec: ChartSpec {
                file_name: "6_weight_by_position.png",
                title: "Average Weight by Position with Standard Deviation",
                subtitle: "Weight Correlates with Position Requirements",
                x_label: "Position",
                y_label: "Average Weight (lbs)",
                color: Some(SALMON),
                size_in: (10.0, 6.0),
            },
            data: ChartData::Means {
                groups: self.weight_by_position(),
                unit: Unit::Pounds,
            },
        });

        charts
    }

    /// Render every chart with data into `output_dir`, returning the written paths
    pub fn render_all(&self, output_dir: &Path, theme: &PlotTheme) -> crate::Result<Vec<PathBuf>> {
        ensure_output_dir(output_dir)?;

        let mut written = Vec::new();
        for chart in self.charts() {
            if chart.data.is_empty() {
                warn!(chart = chart.spec.file_name, "no data to plot, skipping");
                continue;
            }
            let path = render_chart(&chart, output_dir, theme)?;
            info!("Saved: {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}
