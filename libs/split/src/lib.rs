//! # splitter-core
//!
//! Reproducible, stratified assignment of dataset rows to named splits.
//!
//! ## Design Principles
//!
//! - Every index in `0..data_length` lands in exactly one split
//! - The same inputs and seed always produce the same output
//! - Split order is priority: earlier splits win when items are scarce
//! - A split with positive weight is never starved while another split
//!   has items to spare
//!
//! ## Flow
//!
//! 1. Weights are validated and normalized ([`SplitSpec`])
//! 2. Rows are grouped by their grouping-column values ([`stratify`])
//! 3. Each stratum is allocated on its own ([`allocate`])
//! 4. Results are merged back into index order and reported to a
//!    [`SplitObserver`]
//!
//! ```
//! use splitter_core::{Splitter, StatsCollector};
//!
//! let strata = vec![vec!["a", "a", "b", "b", "b", "a", "b", "a"]];
//! let mut stats = StatsCollector::new();
//! let output = Splitter::new(vec![("train", 0.75), ("test", 0.25)])
//!     .split_with_observer(None, &strata, &mut stats)
//!     .unwrap();
//!
//! assert_eq!(output.len(), 8);
//! assert_eq!(stats.stats()[0].count, 6);
//! ```

mod allocator;
mod error;
mod observer;
mod spec;
mod splitter;
mod stratify;

pub use allocator::{allocate, target_counts};
pub use error::SplitError;
pub use observer::{
    compute_stats, NoopObserver, SplitObserver, SplitStats, StatsCollector, TracingObserver,
};
pub use spec::{is_absolute, SplitSpec, PROPORTION_TOLERANCE};
pub use splitter::{split, SeedStrategy, Splitter, DEFAULT_SEED};
pub use stratify::{stratify, Stratum};
