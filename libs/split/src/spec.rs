//! Split specifications.
//!
//! A split spec is an ordered list of `(name, weight)` pairs. Weights are
//! either proportions summing to 1, or absolute target counts (all >= 1)
//! that get divided by the dataset length. The order of the list is the
//! priority order used when items are scarce.

use crate::error::SplitError;

/// Maximum distance from 1.0 accepted for the sum of proportions.
pub const PROPORTION_TOLERANCE: f64 = 1e-6;

/// A validated, normalized split specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSpec<S> {
    splits: Vec<(S, f64)>,
}

impl<S> SplitSpec<S> {
    /// Validate `weights` and normalize them against `data_length`.
    ///
    /// Absolute counts are only recognised when at least two splits are
    /// given. A single split is kept as-is, so it must carry weight 1.
    pub fn new(weights: Vec<(S, f64)>, data_length: usize) -> Result<Self, SplitError> {
        if weights.is_empty() {
            return Err(SplitError::EmptySplits);
        }

        for (index, (_, weight)) in weights.iter().enumerate() {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(SplitError::InvalidWeight {
                    index,
                    weight: *weight,
                });
            }
        }

        let splits = if is_absolute(&weights) {
            let total = data_length as f64;
            weights
                .into_iter()
                .map(|(name, weight)| (name, weight / total))
                .collect()
        } else {
            weights
        };

        let sum: f64 = splits.iter().map(|(_, p)| p).sum();
        if !sum.is_finite() || (sum - 1.0).abs() > PROPORTION_TOLERANCE {
            return Err(SplitError::ProportionSum { sum });
        }

        Ok(Self { splits })
    }

    /// Number of splits.
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Always false for a validated spec.
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// The `(name, proportion)` pairs in priority order.
    pub fn as_slice(&self) -> &[(S, f64)] {
        &self.splits
    }

    /// Split names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &S> {
        self.splits.iter().map(|(name, _)| name)
    }

    /// Normalized proportions in priority order.
    pub fn proportions(&self) -> Vec<f64> {
        self.splits.iter().map(|(_, p)| *p).collect()
    }
}

/// Returns true if `weights` should be read as absolute counts.
pub fn is_absolute<S>(weights: &[(S, f64)]) -> bool {
    weights.len() >= 2 && weights.iter().all(|(_, w)| *w >= 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportions_kept() {
        let spec = SplitSpec::new(vec![("train", 0.7), ("test", 0.15), ("dev", 0.15)], 20).unwrap();
        assert_eq!(spec.len(), 3);
        assert_eq!(spec.proportions(), vec![0.7, 0.15, 0.15]);
        assert_eq!(spec.names().copied().collect::<Vec<_>>(), vec!["train", "test", "dev"]);
    }

    #[test]
    fn test_absolute_counts_normalized() {
        let spec = SplitSpec::new(vec![("train", 13.0), ("test", 6.0), ("dev", 1.0)], 20).unwrap();
        let proportions = spec.proportions();
        assert!((proportions[0] - 0.65).abs() < 1e-12);
        assert!((proportions[1] - 0.30).abs() < 1e-12);
        assert!((proportions[2] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_absolute_counts_must_cover_dataset() {
        let err = SplitSpec::new(vec![("train", 10.0), ("test", 5.0)], 20).unwrap_err();
        assert!(matches!(err, SplitError::ProportionSum { sum } if (sum - 0.75).abs() < 1e-12));
    }

    #[test]
    fn test_sum_below_one_rejected() {
        let err = SplitSpec::new(vec![("a", 0.5), ("b", 0.4)], 10).unwrap_err();
        assert!(err.is_proportion_error());
        assert!(err.is_config_error());
    }

    #[test]
    fn test_sum_within_tolerance_accepted() {
        assert!(SplitSpec::new(vec![("a", 0.1), ("b", 0.2), ("c", 0.7)], 10).is_ok());
        assert!(SplitSpec::new(vec![("a", 0.5), ("b", 0.5000001)], 10).is_ok());
        assert!(SplitSpec::new(vec![("a", 0.5), ("b", 0.50001)], 10).is_err());
    }

    #[test]
    fn test_single_split_not_normalized() {
        assert!(SplitSpec::new(vec![("all", 1.0)], 20).is_ok());

        let err = SplitSpec::new(vec![("all", 20.0)], 20).unwrap_err();
        assert_eq!(err, SplitError::ProportionSum { sum: 20.0 });
    }

    #[test]
    fn test_invalid_weights() {
        assert_eq!(
            SplitSpec::<&str>::new(vec![], 10).unwrap_err(),
            SplitError::EmptySplits
        );
        assert!(matches!(
            SplitSpec::new(vec![("a", 1.0), ("b", 0.0)], 10).unwrap_err(),
            SplitError::InvalidWeight { index: 1, .. }
        ));
        assert!(matches!(
            SplitSpec::new(vec![("a", f64::NAN)], 10).unwrap_err(),
            SplitError::InvalidWeight { index: 0, .. }
        ));
        assert!(matches!(
            SplitSpec::new(vec![("a", -0.5), ("b", 1.5)], 10).unwrap_err(),
            SplitError::InvalidWeight { index: 0, .. }
        ));
    }

    #[test]
    fn test_absolute_counts_with_empty_dataset() {
        let err = SplitSpec::new(vec![("a", 2.0), ("b", 3.0)], 0).unwrap_err();
        assert!(matches!(err, SplitError::ProportionSum { .. }));
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute(&[("a", 1.0), ("b", 3.0)]));
        assert!(!is_absolute(&[("a", 1.0)]));
        assert!(!is_absolute(&[("a", 0.5), ("b", 3.0)]));
    }
}
