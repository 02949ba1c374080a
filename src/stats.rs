use serde::Serialize;

/// Distribution summary of one numeric column
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Statistics {
    pub field: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; zero for a single observation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl Statistics {
    /// Compute statistics over the non-missing values of a column
    pub fn compute(field: &str, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        Some(Statistics {
            field: field.to_string(),
            count,
            mean,
            median: median(values)?,
            std: sample_std(values, mean),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            sum,
        })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Sample standard deviation (n - 1 denominator) around a known mean
///
/// A single observation has no dispersion, so its deviation is zero rather than undefined.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (squares / (values.len() - 1) as f64).sqrt()
}

/// Median, averaging the middle pair for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Aggregation operations applied per group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Mean,
    Std,
}

/// Perform one aggregation over a slice of values
pub fn aggregate(values: &[f64], op: AggregateOp) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    match op {
        AggregateOp::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
        AggregateOp::Std => {
            let mean = aggregate(values, AggregateOp::Mean)?;
            Some(sample_std(values, mean))
        }
    }
}
