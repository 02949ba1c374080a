use thiserror::Error;

/// Error type for loading and charting operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InsightError {
    /// A column the pipeline depends on is absent from the input table
    #[error("MissingColumn: input table has no '{0}' column")]
    MissingColumn(String),
    /// Input file extension is neither CSV nor JSON
    #[error("UnsupportedFormat: {0}")]
    UnsupportedFormat(String),
    /// Drawing or encoding a chart failed
    #[error("ChartError: {0}")]
    Chart(String),
}
