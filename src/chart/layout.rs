//! Geometry and annotation text for charts, independent of the drawing backend

use serde::Serialize;

use crate::stats::Statistics;

/// Fraction of a category slot occupied by its bar
pub const BAR_WIDTH: f64 = 0.8;

/// Headroom above the tallest drawn element, as a fraction of it
const HEADROOM: f64 = 0.12;

/// One equal-width histogram bin
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Split values into `bins` equal-width bins spanning `[min, max]`
///
/// The last bin is closed on the right. A constant sample is centred in a unit-wide range.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for value in values {
        let slot = (((value - min) / width).floor() as usize).min(bins - 1);
        result[slot].count += 1;
    }

    result
}

/// Unit a numeric column is measured in
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Unit {
    Inches,
    Pounds,
}

impl Unit {
    /// Format a value with this unit's suffix
    pub fn format(&self, value: f64, decimals: usize) -> String {
        match self {
            Unit::Inches => format!("{:.*}\"", decimals, value),
            Unit::Pounds => format!("{:.*} lbs", decimals, value),
        }
    }

    /// Two-line summary box shown on distribution charts
    pub fn annotation(&self, stats: &Statistics) -> [String; 2] {
        match self {
            Unit::Inches => [
                format!(
                    "Mean: {} | Median: {} | Std: {}",
                    self.format(stats.mean, 1),
                    self.format(stats.median, 1),
                    self.format(stats.std, 1)
                ),
                format!(
                    "Range: {} to {} ({} spread)",
                    self.format(stats.min, 0),
                    self.format(stats.max, 0),
                    self.format(stats.range(), 0)
                ),
            ],
            Unit::Pounds => [
                format!(
                    "Mean: {} | Median: {} | Std: {:.1}",
                    self.format(stats.mean, 1),
                    self.format(stats.median, 1),
                    stats.std
                ),
                format!("Range: {:.0} to {}", stats.min, self.format(stats.max, 0)),
            ],
        }
    }

    /// Text printed above a mean bar
    pub fn bar_label(&self, mean: f64) -> String {
        match self {
            Unit::Inches => self.format(mean, 1),
            Unit::Pounds => self.format(mean, 0),
        }
    }

    pub fn label_offsets(&self) -> LabelOffsets {
        match self {
            Unit::Inches => LabelOffsets {
                without_error: 2.0,
                above_error: 0.5,
            },
            Unit::Pounds => LabelOffsets {
                without_error: 10.0,
                above_error: 2.0,
            },
        }
    }
}

/// Vertical placement of value labels on mean bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOffsets {
    /// Gap above the bar when there is no error bar
    pub without_error: f64,
    /// Gap above the top of the error bar
    pub above_error: f64,
}

/// Y position of the label for a bar with the given mean and deviation
pub fn value_label_y(mean: f64, std: f64, offsets: LabelOffsets) -> f64 {
    if std == 0.0 {
        mean + offsets.without_error
    } else {
        mean + std + offsets.above_error
    }
}

/// Upper bound of a value axis that must contain every given height
pub fn axis_max<I>(heights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let top = heights
        .into_iter()
        .filter(|h| h.is_finite())
        .fold(0.0, f64::max);
    if top <= 0.0 {
        1.0
    } else {
        top * (1.0 + HEADROOM)
    }
}

/// Left and right edges of the bar in category slot `index`
pub fn bar_span(index: usize) -> (f64, f64) {
    let centre = index as f64;
    (centre - BAR_WIDTH / 2.0, centre + BAR_WIDTH / 2.0)
}

/// Break a straight line into `dashes` evenly spaced segments with equal gaps
pub fn dash_segments(start: (f64, f64), end: (f64, f64), dashes: usize) -> Vec<[(f64, f64); 2]> {
    if dashes == 0 {
        return Vec::new();
    }
    // each dash is followed by a gap of the same length, except the last
    let steps = (dashes * 2 - 1) as f64;
    let point = |t: f64| (start.0 + (end.0 - start.0) * t, start.1 + (end.1 - start.1) * t);
    (0..dashes)
        .map(|i| {
            let from = (2 * i) as f64 / steps;
            let to = (2 * i + 1) as f64 / steps;
            [point(from), point(to)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bins_cover_every_value() {
        let values = [70.0, 72.0, 75.0, 78.0, 81.0, 84.0, 84.0];
        let bins = histogram_bins(&values, 7);

        assert_eq!(bins.len(), 7);
        assert_eq!(bins[0].lower, 70.0);
        assert_eq!(bins[6].upper, 84.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // max lands in the closed last bin
        assert_eq!(bins[6].count, 2);
        assert_eq!(bins[0].count, 1);
    }

    #[test]
    fn test_histogram_bins_constant_sample() {
        let bins = histogram_bins(&[80.0, 80.0, 80.0], 4);

        assert_eq!(bins[0].lower, 79.5);
        assert_eq!(bins[3].upper, 80.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_histogram_bins_empty() {
        assert!(histogram_bins(&[], 25).is_empty());
        assert!(histogram_bins(&[1.0], 0).is_empty());
    }

    #[test]
    fn test_height_annotation() {
        let stats = Statistics::compute("height_in", &[78.0, 84.0, 81.0]).unwrap();
        let [first, second] = Unit::Inches.annotation(&stats);

        assert_eq!(first, "Mean: 81.0\" | Median: 81.0\" | Std: 3.0\"");
        assert_eq!(second, "Range: 78\" to 84\" (6\" spread)");
    }

    #[test]
    fn test_weight_annotation() {
        let stats = Statistics::compute("weight", &[200.0, 250.0, 220.0]).unwrap();
        let [first, second] = Unit::Pounds.annotation(&stats);

        assert!(first.starts_with("Mean: 223.3 lbs | Median: 220.0 lbs | Std: "));
        assert_eq!(second, "Range: 200 to 250 lbs");
    }

    #[test]
    fn test_bar_labels() {
        assert_eq!(Unit::Inches.bar_label(80.26), "80.3\"");
        assert_eq!(Unit::Pounds.bar_label(231.6), "232 lbs");
    }

    #[test]
    fn test_value_label_y() {
        let height = Unit::Inches.label_offsets();
        assert_eq!(value_label_y(84.0, 0.0, height), 86.0);
        assert_eq!(value_label_y(78.0, 2.0, height), 80.5);

        let weight = Unit::Pounds.label_offsets();
        assert_eq!(value_label_y(250.0, 0.0, weight), 260.0);
        assert_eq!(value_label_y(220.0, 15.0, weight), 237.0);
    }

    #[test]
    fn test_axis_max() {
        assert!((axis_max([10.0, 50.0, 20.0]) - 56.0).abs() < 1e-9);
        assert_eq!(axis_max(Vec::new()), 1.0);
        assert_eq!(axis_max([f64::NAN, 0.0]), 1.0);
    }

    #[test]
    fn test_bar_span() {
        let (left, right) = bar_span(2);
        assert!((left - 1.6).abs() < 1e-12);
        assert!((right - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_dash_segments() {
        let dashes = dash_segments((0.0, 0.0), (0.0, 9.0), 5);

        assert_eq!(dashes.len(), 5);
        let ys: Vec<(f64, f64)> = dashes.iter().map(|d| (d[0].1, d[1].1)).collect();
        for (dash, (from, to)) in ys.iter().enumerate() {
            assert!((from - 2.0 * dash as f64).abs() < 1e-9);
            assert!((to - (2.0 * dash as f64 + 1.0)).abs() < 1e-9);
        }
        assert!(dashes.iter().all(|d| d[0].0 == 0.0 && d[1].0 == 0.0));
        assert!(dash_segments((0.0, 0.0), (1.0, 1.0), 0).is_empty());
    }
}
