//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use splitter_core::SplitError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid split '{spec}': {reason}")]
    InvalidSplit { spec: String, reason: String },

    #[error("No splits given. Pass NAME=WEIGHT arguments or a --plan file.")]
    NoSplits,

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid plan file {}: {source}", .path.display())]
    Plan {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Split(#[from] SplitError),
}

impl CliError {
    /// Create an invalid split error.
    pub fn invalid_split(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSplit {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<CliError>().and_then(hint_for) {
        eprintln!("\n{}", format!("Hint: {}", hint).as_str().yellow());
    }
}

fn hint_for(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::InvalidSplit { .. } => {
            Some("Use NAME=WEIGHT, e.g. train=0.8, train=80% or train=1300.")
        }
        CliError::Split(SplitError::ProportionSum { .. }) => Some(
            "Weights must either be fractions summing to 1, or absolute counts (all >= 1) summing to the dataset length.",
        ),
        CliError::Split(SplitError::MissingLength) => {
            Some("Pass --length or at least one --strata file.")
        }
        CliError::Split(SplitError::ColumnLength { .. }) => {
            Some("Every --strata file needs exactly one line per row.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints() {
        assert!(hint_for(&CliError::Split(SplitError::MissingLength)).is_some());
        assert!(hint_for(&CliError::invalid_split("x", "missing '='")).is_some());
        assert!(hint_for(&CliError::NoSplits).is_none());
    }

    #[test]
    fn test_split_error_is_transparent() {
        let err = CliError::from(SplitError::MissingLength);
        assert_eq!(err.to_string(), SplitError::MissingLength.to_string());
    }
}
