//! Group-by aggregation over the normalized player table
//!
//! Groups are discovered in first-seen row order. Every sort here is stable, so ties keep
//! that order.

use serde::Serialize;
use std::collections::HashMap;

use crate::player::{GroupKey, Player, ValueColumn};
use crate::stats::{aggregate, AggregateOp};

/// Mean and dispersion of one value column within one group
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupStats {
    pub group: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, zero for single-member groups
    pub std: f64,
}

/// Number of rows carrying one group label
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupCount {
    pub group: String,
    pub count: usize,
}

/// Group counts ordered by descending count
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrequencyTable {
    pub entries: Vec<GroupCount>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total rows counted across all groups
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Mean count per group, used as the reference line on roster charts
    pub fn mean_count(&self) -> Option<f64> {
        let counts: Vec<f64> = self.entries.iter().map(|e| e.count as f64).collect();
        aggregate(&counts, AggregateOp::Mean)
    }
}

/// Bucket values by group label, preserving first-seen group order
fn collect_groups<'a, I>(pairs: I) -> Vec<(String, Vec<f64>)>
where
    I: Iterator<Item = (&'a str, f64)>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for (label, value) in pairs {
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(value);
    }

    groups
}

/// Count rows per group label; rows without a label are not counted
pub fn value_counts(players: &[Player], key: GroupKey) -> FrequencyTable {
    let pairs = players
        .iter()
        .filter_map(|p| key.of(p))
        .map(|label| (label, 1.0));

    let mut entries: Vec<GroupCount> = collect_groups(pairs)
        .into_iter()
        .map(|(group, values)| GroupCount {
            group,
            count: values.len(),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    FrequencyTable { entries }
}

/// Mean and sample standard deviation of `value` per group, ordered by descending mean
///
/// Rows missing either the group label or the value are excluded from this aggregate only.
pub fn group_stats(players: &[Player], key: GroupKey, value: ValueColumn) -> Vec<GroupStats> {
    let pairs = players
        .iter()
        .filter_map(|p| Some((key.of(p)?, value.of(p)?)));

    let mut stats: Vec<GroupStats> = collect_groups(pairs)
        .into_iter()
        .filter_map(|(group, values)| {
            Some(GroupStats {
                group,
                count: values.len(),
                mean: aggregate(&values, AggregateOp::Mean)?,
                std: aggregate(&values, AggregateOp::Std)?,
            })
        })
        .collect();
    stats.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(height_in: Option<f64>, weight: Option<f64>, position: &str, team: &str) -> Player {
        Player {
            height_in,
            weight,
            position: (!position.is_empty()).then(|| position.to_string()),
            team: (!team.is_empty()).then(|| team.to_string()),
        }
    }

    fn roster() -> Vec<Player> {
        vec![
            player(Some(75.0), Some(190.0), "G", "Boston Celtics"),
            player(Some(84.0), Some(250.0), "C", "Boston Celtics"),
            player(Some(79.0), Some(215.0), "F", "Denver Nuggets"),
            player(Some(77.0), None, "G", "Denver Nuggets"),
            player(None, Some(230.0), "F", "Boston Celtics"),
            player(Some(81.0), Some(225.0), "", "Miami Heat"),
        ]
    }

    #[test]
    fn test_value_counts_descending() {
        let counts = value_counts(&roster(), GroupKey::Team);

        let groups: Vec<(&str, usize)> = counts
            .entries
            .iter()
            .map(|e| (e.group.as_str(), e.count))
            .collect();
        assert_eq!(
            groups,
            vec![("Boston Celtics", 3), ("Denver Nuggets", 2), ("Miami Heat", 1)]
        );
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.mean_count(), Some(2.0));
    }

    #[test]
    fn test_value_counts_skip_missing_labels() {
        let counts = value_counts(&roster(), GroupKey::Position);

        assert_eq!(counts.total(), 5);
        assert_eq!(counts.entries[0].group, "G");
        assert_eq!(counts.entries[1].group, "F");
        assert_eq!(counts.entries[2].group, "C");
    }

    #[test]
    fn test_value_counts_empty() {
        let counts = value_counts(&[], GroupKey::Team);
        assert!(counts.is_empty());
        assert_eq!(counts.mean_count(), None);
    }

    #[test]
    fn test_group_stats_sorted_by_mean() {
        let stats = group_stats(&roster(), GroupKey::Position, ValueColumn::HeightIn);

        let means: Vec<(&str, f64)> = stats.iter().map(|s| (s.group.as_str(), s.mean)).collect();
        assert_eq!(means, vec![("C", 84.0), ("F", 79.0), ("G", 76.0)]);
        assert!(stats.windows(2).all(|w| w[0].mean >= w[1].mean));
    }

    #[test]
    fn test_group_stats_single_member_std_is_zero() {
        let stats = group_stats(&roster(), GroupKey::Position, ValueColumn::HeightIn);

        let center = stats.iter().find(|s| s.group == "C").unwrap();
        assert_eq!(center.count, 1);
        assert_eq!(center.std, 0.0);

        let guards = stats.iter().find(|s| s.group == "G").unwrap();
        assert_eq!(guards.count, 2);
        assert!((guards.std - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_group_stats_excludes_missing_values_per_column() {
        let players = roster();
        let heights = group_stats(&players, GroupKey::Position, ValueColumn::HeightIn);
        let weights = group_stats(&players, GroupKey::Position, ValueColumn::Weight);

        let height_count: usize = heights.iter().map(|s| s.count).sum();
        let weight_count: usize = weights.iter().map(|s| s.count).sum();
        assert_eq!(height_count, 4);
        assert_eq!(weight_count, 4);

        let forwards = weights.iter().find(|s| s.group == "F").unwrap();
        assert_eq!(forwards.count, 2);
        assert_eq!(forwards.mean, 222.5);
    }

    #[test]
    fn test_group_stats_ties_keep_first_seen_order() {
        let players = vec![
            player(Some(80.0), None, "SF", ""),
            player(Some(82.0), None, "PF", ""),
            player(Some(80.0), None, "SG", ""),
            player(Some(80.0), None, "PG", ""),
        ];
        let stats = group_stats(&players, GroupKey::Position, ValueColumn::HeightIn);

        let order: Vec<&str> = stats.iter().map(|s| s.group.as_str()).collect();
        assert_eq!(order, vec!["PF", "SF", "SG", "PG"]);
    }

    #[test]
    fn test_group_stats_absent_group_is_excluded() {
        let players = vec![
            player(None, Some(200.0), "C", ""),
            player(Some(76.0), Some(190.0), "G", ""),
        ];
        let stats = group_stats(&players, GroupKey::Position, ValueColumn::HeightIn);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].group, "G");
    }
}
