//! Error types for split configuration.

use thiserror::Error;

/// Errors that can occur when validating a split request.
///
/// Every variant is a configuration error: it is raised before any
/// allocation work starts, so a failed call never produces partial output.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    /// No splits were given.
    #[error("at least one split is required")]
    EmptySplits,

    /// A split weight is not a positive finite number.
    #[error("invalid weight for split #{index}: {weight} (must be positive and finite)")]
    InvalidWeight { index: usize, weight: f64 },

    /// The normalized proportions do not sum to 1.
    #[error("split proportions must sum to 1, got {sum}")]
    ProportionSum { sum: f64 },

    /// A grouping column does not cover the whole dataset.
    #[error("grouping column #{column} has length {actual}, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        actual: usize,
    },

    /// Neither a data length nor a grouping column was provided.
    #[error("data length is required when no grouping columns are given")]
    MissingLength,
}

impl SplitError {
    /// Returns true if this error was caused by the caller's configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SplitError::EmptySplits
                | SplitError::InvalidWeight { .. }
                | SplitError::ProportionSum { .. }
                | SplitError::ColumnLength { .. }
                | SplitError::MissingLength
        )
    }

    /// Returns true if this error concerns the split weights.
    pub fn is_proportion_error(&self) -> bool {
        matches!(
            self,
            SplitError::EmptySplits
                | SplitError::InvalidWeight { .. }
                | SplitError::ProportionSum { .. }
        )
    }
}
