//! Test fixtures for splitter crates.
//!
//! Grouping columns are generated from a fixed seed so that integration
//! tests in every crate see the same data.

use std::fmt::Debug;

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Values used by the three reference grouping columns.
pub const REFERENCE_VALUES: [[&str; 3]; 3] = [["a", "b", "c"], ["d", "e", "f"], ["g", "h", "i"]];

/// A column of `len` values drawn uniformly from `values`.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn random_column<T: Clone>(len: usize, values: &[T], seed: u64) -> Vec<T> {
    assert!(!values.is_empty(), "random_column needs at least one value");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .filter_map(|_| values.choose(&mut rng).cloned())
        .collect()
}

/// Three random columns over `a/b/c`, `d/e/f` and `g/h/i`.
pub fn reference_columns(len: usize, seed: u64) -> Vec<Vec<&'static str>> {
    REFERENCE_VALUES
        .iter()
        .enumerate()
        .map(|(i, values)| random_column(len, values, seed.wrapping_add(i as u64)))
        .collect()
}

/// A column of `groups * per_group` values forming `groups` strata of
/// `per_group` items each. Groups are interleaved (`0, 1, 2, 0, 1, 2, ...`).
pub fn balanced_column(groups: usize, per_group: usize) -> Vec<usize> {
    (0..groups * per_group).map(|i| i % groups.max(1)).collect()
}

/// Number of entries in `output` equal to `name`.
pub fn count_by_name<S: PartialEq>(output: &[S], name: &S) -> usize {
    output.iter().filter(|assigned| *assigned == name).count()
}

/// Assert every split's count is within `tolerance` of `round(p * len)`.
pub fn assert_counts_within<S: PartialEq + Debug>(
    output: &[S],
    splits: &[(S, f64)],
    tolerance: usize,
) {
    let total = output.len() as f64;

    for (name, proportion) in splits {
        let expected = (proportion * total).round() as i64;
        let actual = count_by_name(output, name) as i64;
        assert!(
            (actual - expected).unsigned_abs() as usize <= tolerance,
            "split {:?}: expected {} +/- {}, got {}",
            name,
            expected,
            tolerance,
            actual
        );
    }
}

/// Assert that `pairs` assigns each of `expected` exactly once and nothing
/// else.
pub fn assert_partition<S>(pairs: &[(usize, S)], expected: &[usize]) {
    let mut seen: Vec<usize> = pairs.iter().map(|(index, _)| *index).collect();
    seen.sort_unstable();

    let mut wanted = expected.to_vec();
    wanted.sort_unstable();

    assert_eq!(seen, wanted, "allocation is not a partition of its input");
}
