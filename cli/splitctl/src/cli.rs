//! Command-line definition and execution.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use splitter_core::{SplitObserver, SplitStats, Splitter, StatsCollector, TracingObserver};
use tracing::debug;

use crate::config::{Overrides, Plan, Settings};
use crate::error::CliError;
use crate::input::read_column;
use crate::output::{print_report, OutputFormat, Report};

/// Assign dataset rows to named splits, reproducibly.
///
/// Prints one split name per row. Rows are identified by position; pass
/// grouping columns with --strata to keep split proportions within every
/// group of rows sharing the same values.
#[derive(Debug, Parser)]
#[command(name = "splitctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Splits in priority order, as NAME=WEIGHT (e.g. train=0.8 test=0.2,
    /// train=80% test=20%, or absolute counts train=13 test=6 dev=1).
    #[arg(value_name = "NAME=WEIGHT")]
    splits: Vec<String>,

    /// Number of rows. Defaults to the length of the first --strata file.
    #[arg(long, env = "SPLIT_LENGTH")]
    length: Option<usize>,

    /// Grouping column file, one value per line ("-" for stdin).
    /// Can be specified multiple times.
    #[arg(long = "strata", value_name = "FILE")]
    strata: Vec<PathBuf>,

    /// Random seed.
    #[arg(long, env = "SPLIT_SEED")]
    seed: Option<u64>,

    /// Assign rows in their original order instead of shuffling.
    #[arg(long)]
    no_shuffle: bool,

    /// Derive a distinct seed for every stratum.
    #[arg(long)]
    per_stratum_seed: bool,

    /// TOML plan file with splits, seed and shuffle settings.
    #[arg(long, value_name = "FILE", env = "SPLIT_PLAN")]
    plan: Option<PathBuf>,

    /// Output format (table or json).
    #[arg(long, default_value = "table")]
    format: String,

    /// Print per-split statistics (to stderr in table format).
    #[arg(long)]
    stats: bool,
}

impl Cli {
    /// Run the split.
    pub fn run(self) -> Result<()> {
        let format = OutputFormat::parse(&self.format);

        let plan = match &self.plan {
            Some(path) => Plan::load(path)?,
            None => Plan::default(),
        };

        let overrides = Overrides {
            splits: self.splits,
            seed: self.seed,
            no_shuffle: self.no_shuffle,
            per_stratum_seed: self.per_stratum_seed,
        };
        let settings = Settings::resolve(&overrides, &plan)?;

        let columns = self
            .strata
            .iter()
            .map(|path| read_column(path))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            splits = settings.splits.len(),
            columns = columns.len(),
            seed = settings.seed,
            shuffle = settings.shuffle,
            "Configuration loaded"
        );

        let report = execute(&settings, self.length, &columns)?;
        print_report(&report, format, self.stats);

        Ok(())
    }
}

/// Run a split with resolved settings.
pub fn execute(
    settings: &Settings,
    length: Option<usize>,
    columns: &[Vec<String>],
) -> Result<Report, CliError> {
    let mut observer = ReportObserver::default();

    let splitter = Splitter::new(settings.splits.clone())
        .with_shuffle(settings.shuffle)
        .with_seed(settings.seed)
        .with_seed_strategy(settings.seed_strategy);

    debug!(
        weights = ?splitter.weights(),
        shuffle = splitter.shuffle(),
        seed = splitter.seed(),
        "Running split"
    );

    let assignments = splitter.split_with_observer(length, columns, &mut observer)?;

    Ok(Report {
        assignments,
        stats: observer.collector.into_stats(),
    })
}

/// Logs statistics and keeps them for the report.
#[derive(Default)]
struct ReportObserver {
    collector: StatsCollector<String>,
}

impl SplitObserver<String> for ReportObserver {
    fn on_stats(&mut self, stats: &[SplitStats<String>]) {
        TracingObserver.on_stats(stats);
        self.collector.on_stats(stats);
    }
}
