// File: crates/chart-layout/src/error.rs
// Summary: Library error type. Data anomalies and degenerate geometry are not errors.

use thiserror::Error;

/// Configuration violations surface here; NaN samples and degenerate
/// ranges are handled by substitution rules instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    /// A chart type was attached to a model of the wrong dataset
    /// dimensionality. This is a caller bug, not a data condition.
    #[error("diagram requires dataset dimension {expected}, but the model provides {actual}")]
    DatasetDimension { expected: usize, actual: usize },
}
