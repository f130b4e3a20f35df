//! Atomic allocation of one stratum across all splits.
//!
//! # Algorithm
//!
//! 1. Seed a fresh generator and optionally shuffle the stratum.
//! 2. When there are more items than splits, compute `floor(p * n)` per
//!    split and rebalance so that no split is left at zero while another
//!    split holds more than one item.
//! 3. Hand out items from the front of the (shuffled) list, split by split.
//! 4. Give any remaining items one at a time by priority: splits that are
//!    still empty first, then every split in priority order.
//!
//! For tiny strata (no more items than splits) step 2 is skipped, so the
//! first splits in priority order receive one item each.

use std::collections::VecDeque;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Assign every index in `indices` to exactly one split.
///
/// `splits` holds normalized `(name, proportion)` pairs in priority order.
/// The result is reproducible for a fixed `seed`.
///
/// # Panics
///
/// Panics if `splits` is empty while `indices` is not, or if the counting
/// passes leave items unassigned. Both indicate a bug in the caller or in
/// this module, never a bad user input.
pub fn allocate<S: Clone>(
    indices: &[usize],
    splits: &[(S, f64)],
    shuffle: bool,
    seed: u64,
) -> Vec<(usize, S)> {
    if indices.is_empty() {
        return Vec::new();
    }
    assert!(!splits.is_empty(), "allocation requires at least one split");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut order = indices.to_vec();
    if shuffle {
        order.shuffle(&mut rng);
    }

    let mut counts = if order.len() > splits.len() {
        let proportions: Vec<f64> = splits.iter().map(|(_, p)| *p).collect();
        target_counts(order.len(), &proportions, &mut rng)
    } else {
        vec![0; splits.len()]
    };

    let mut working: VecDeque<usize> = order.into();
    let mut pairs = Vec::with_capacity(indices.len());

    for ((name, _), &count) in splits.iter().zip(&counts) {
        pairs.extend(working.drain(..count).map(|index| (index, name.clone())));
    }

    let mut cursor = 0;
    while let Some(index) = working.pop_front() {
        let split = match counts.iter().position(|&c| c == 0) {
            Some(empty) => empty,
            None => {
                let next = cursor % splits.len();
                cursor += 1;
                next
            }
        };
        counts[split] += 1;
        pairs.push((index, splits[split].0.clone()));
    }

    assert!(
        working.is_empty() && pairs.len() == indices.len(),
        "allocation left {} of {} items unassigned",
        indices.len() - pairs.len(),
        indices.len()
    );

    trace!(items = indices.len(), ?counts, "allocated stratum");

    pairs
}

/// Added to `p * n` before truncating.
///
/// Absolute counts arrive as `c / len`, and `(c / len) * len` can land one
/// ulp below `c`.
pub const FLOOR_SLACK: f64 = 1e-9;

/// Target item count per split for a stratum of `n` items.
///
/// Counts are truncated (`floor(p * n)`, with [`FLOOR_SLACK`] absorbing
/// float error so that `c / n` yields exactly `c`), clamped so they never exceed
/// `n`, then rebalanced: while a split has zero items and some other split
/// has more than one, a donor picked uniformly at random among the latter
/// gives one item to the first empty split.
///
/// The sum of the returned counts may be lower than `n`; the allocator
/// hands the remainder out by priority.
pub fn target_counts<R: Rng + ?Sized>(n: usize, proportions: &[f64], rng: &mut R) -> Vec<usize> {
    let total = n as f64;
    let mut counts: Vec<usize> = proportions
        .iter()
        .map(|p| (p * total + FLOOR_SLACK).floor() as usize)
        .collect();

    trim_excess(&mut counts, n);
    rebalance(&mut counts, rng);

    counts
}

/// Move single items from splits holding more than one to empty splits.
fn rebalance<R: Rng + ?Sized>(counts: &mut [usize], rng: &mut R) {
    loop {
        let Some(empty) = counts.iter().position(|&c| c == 0) else {
            break;
        };

        let donors: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 1)
            .map(|(i, _)| i)
            .collect();

        let Some(&donor) = donors.choose(rng) else {
            break;
        };

        counts[donor] -= 1;
        counts[empty] += 1;
    }
}

/// Remove overshoot caused by proportions summing slightly above 1.
///
/// Lowest-priority splits give up items first, keeping at least one each.
fn trim_excess(counts: &mut [usize], n: usize) {
    let mut excess = counts.iter().sum::<usize>().saturating_sub(n);

    for count in counts.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let take = excess.min(count.saturating_sub(1));
        *count -= take;
        excess -= take;
    }
}
