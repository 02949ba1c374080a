/// Utility modules for error handling and cell conversions
pub mod error;
pub mod type_convert;

// Re-export commonly used types
pub use error::InsightError;
pub use type_convert::{coerce_numeric, height_to_inches};
