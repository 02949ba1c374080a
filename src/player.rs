use serde::Serialize;

use crate::dataset::{DataPoint, Dataset};
use crate::utils::{coerce_numeric, height_to_inches, InsightError};

pub const HEIGHT_COLUMN: &str = "height";
pub const WEIGHT_COLUMN: &str = "weight";
pub const POSITION_COLUMN: &str = "position";
pub const TEAM_COLUMN: &str = "team.full_name";

/// Columns every input table must carry
pub const REQUIRED_COLUMNS: [&str; 4] = [HEIGHT_COLUMN, WEIGHT_COLUMN, POSITION_COLUMN, TEAM_COLUMN];

/// A player row after normalization
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Player {
    pub height_in: Option<f64>,
    pub weight: Option<f64>,
    pub position: Option<String>,
    pub team: Option<String>,
}

impl Player {
    pub fn from_point(point: &DataPoint) -> Self {
        Self {
            height_in: height_to_inches(point.get_field(HEIGHT_COLUMN)),
            weight: coerce_numeric(point.get_field(WEIGHT_COLUMN)),
            position: point.get_field(POSITION_COLUMN).as_label(),
            team: point.get_field(TEAM_COLUMN).as_label(),
        }
    }
}

/// Categorical columns usable as grouping keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Position,
    Team,
}

impl GroupKey {
    pub fn of<'a>(&self, player: &'a Player) -> Option<&'a str> {
        match self {
            GroupKey::Position => player.position.as_deref(),
            GroupKey::Team => player.team.as_deref(),
        }
    }
}

/// Numeric columns usable as aggregation values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    HeightIn,
    Weight,
}

impl ValueColumn {
    pub fn of(&self, player: &Player) -> Option<f64> {
        match self {
            ValueColumn::HeightIn => player.height_in,
            ValueColumn::Weight => player.weight,
        }
    }
}

/// Normalize every row of a dataset; fails if a required column is absent
pub fn normalize_players(dataset: &Dataset) -> Result<Vec<Player>, InsightError> {
    dataset.require_columns(&REQUIRED_COLUMNS)?;
    Ok(dataset.data.iter().map(Player::from_point).collect())
}

/// Non-missing values of one column, in row order
pub fn column_values(players: &[Player], column: ValueColumn) -> Vec<f64> {
    players.iter().filter_map(|p| column.of(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_players() {
        let csv_data = "height,weight,position,team.full_name\n\
                        6-6,200,G,Boston Celtics\n\
                        abc-def,heavy,,Denver Nuggets";
        let dataset = Dataset::from_csv("players".to_string(), csv_data).unwrap();
        let players = normalize_players(&dataset).unwrap();

        assert_eq!(
            players[0],
            Player {
                height_in: Some(78.0),
                weight: Some(200.0),
                position: Some("G".to_string()),
                team: Some("Boston Celtics".to_string()),
            }
        );
        assert_eq!(players[1].height_in, None);
        assert_eq!(players[1].weight, None);
        assert_eq!(players[1].position, None);
        assert_eq!(players[1].team.as_deref(), Some("Denver Nuggets"));
    }

    #[test]
    fn test_normalize_requires_columns() {
        let dataset = Dataset::from_csv("players".to_string(), "height,weight\n6-6,200").unwrap();
        let err = normalize_players(&dataset).unwrap_err();
        assert_eq!(err, InsightError::MissingColumn("position".to_string()));
    }

    #[test]
    fn test_column_values_skip_missing() {
        let players = vec![
            Player {
                height_in: Some(78.0),
                weight: None,
                position: None,
                team: None,
            },
            Player {
                height_in: None,
                weight: Some(250.0),
                position: None,
                team: None,
            },
        ];

        assert_eq!(column_values(&players, ValueColumn::HeightIn), vec![78.0]);
        assert_eq!(column_values(&players, ValueColumn::Weight), vec![250.0]);
    }
}
