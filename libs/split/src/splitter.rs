//! Split orchestration.
//!
//! [`Splitter`] validates a request, builds strata, allocates every stratum
//! independently and merges the result back into index order.

use std::hash::Hash;

use tracing::{debug, trace};

use crate::allocator::allocate;
use crate::error::SplitError;
use crate::observer::{compute_stats, NoopObserver, SplitObserver};
use crate::spec::SplitSpec;
use crate::stratify::stratify;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// How the seed for each stratum is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedStrategy {
    /// Every stratum is allocated with the configured seed.
    #[default]
    Shared,

    /// Stratum `i` (in order of first appearance) uses `seed + i`.
    PerStratum,
}

impl SeedStrategy {
    /// Seed for the stratum at `ordinal`.
    pub fn seed_for(self, seed: u64, ordinal: usize) -> u64 {
        match self {
            SeedStrategy::Shared => seed,
            SeedStrategy::PerStratum => seed.wrapping_add(ordinal as u64),
        }
    }
}

/// Reproducible, optionally stratified dataset splitter.
///
/// ```
/// use splitter_core::Splitter;
///
/// let splitter = Splitter::new(vec![("train", 0.8), ("test", 0.2)]).with_seed(7);
/// let output = splitter.split::<()>(Some(10), &[]).unwrap();
/// assert_eq!(output.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Splitter<S> {
    weights: Vec<(S, f64)>,
    shuffle: bool,
    seed: u64,
    seed_strategy: SeedStrategy,
}

impl<S: Clone + PartialEq> Splitter<S> {
    /// Create a splitter from `(name, weight)` pairs in priority order.
    ///
    /// Weights are validated on every call to [`Splitter::split`], since
    /// absolute counts can only be normalized once the length is known.
    pub fn new(weights: Vec<(S, f64)>) -> Self {
        Self {
            weights,
            shuffle: true,
            seed: DEFAULT_SEED,
            seed_strategy: SeedStrategy::default(),
        }
    }

    /// Enable or disable shuffling inside each stratum.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set how per-stratum seeds are derived.
    pub fn with_seed_strategy(mut self, seed_strategy: SeedStrategy) -> Self {
        self.seed_strategy = seed_strategy;
        self
    }

    /// The configured `(name, weight)` pairs.
    pub fn weights(&self) -> &[(S, f64)] {
        &self.weights
    }

    /// Whether strata are shuffled.
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split a dataset, returning one split name per index.
    ///
    /// `data_length` may be omitted when at least one grouping column is
    /// given; the first column's length is used instead.
    pub fn split<K: Hash + Eq>(
        &self,
        data_length: Option<usize>,
        grouping_columns: &[Vec<K>],
    ) -> Result<Vec<S>, SplitError> {
        self.split_with_observer(data_length, grouping_columns, &mut NoopObserver)
    }

    /// Like [`Splitter::split`], reporting statistics to `observer`.
    pub fn split_with_observer<K: Hash + Eq>(
        &self,
        data_length: Option<usize>,
        grouping_columns: &[Vec<K>],
        observer: &mut dyn SplitObserver<S>,
    ) -> Result<Vec<S>, SplitError> {
        let data_length = resolve_length(data_length, grouping_columns)?;
        let spec = SplitSpec::new(self.weights.clone(), data_length)?;
        let strata = stratify(data_length, grouping_columns)?;

        debug!(
            data_length,
            strata = strata.len(),
            proportions = ?spec.proportions(),
            shuffle = self.shuffle,
            seed = self.seed,
            "splitting dataset"
        );

        let mut pairs = Vec::with_capacity(data_length);
        for stratum in &strata {
            let seed = self.seed_strategy.seed_for(self.seed, stratum.ordinal);
            trace!(
                stratum = stratum.ordinal,
                items = stratum.len(),
                seed,
                "allocating stratum"
            );
            pairs.extend(allocate(&stratum.indices, spec.as_slice(), self.shuffle, seed));
        }

        pairs.sort_unstable_by_key(|(index, _)| *index);
        let output: Vec<S> = pairs.into_iter().map(|(_, name)| name).collect();

        observer.on_stats(&compute_stats(&output, spec.as_slice()));

        Ok(output)
    }
}

/// Split with the default settings (shuffled, seed 42, shared seed).
pub fn split<S, K>(
    weights: Vec<(S, f64)>,
    data_length: Option<usize>,
    grouping_columns: &[Vec<K>],
) -> Result<Vec<S>, SplitError>
where
    S: Clone + PartialEq,
    K: Hash + Eq,
{
    Splitter::new(weights).split(data_length, grouping_columns)
}

fn resolve_length<K>(data_length: Option<usize>, columns: &[Vec<K>]) -> Result<usize, SplitError> {
    data_length
        .or_else(|| columns.first().map(Vec::len))
        .ok_or(SplitError::MissingLength)
}
