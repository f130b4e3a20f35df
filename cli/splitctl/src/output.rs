//! Output formatting for split results.

use colored::Colorize;
use serde::Serialize;
use splitter_core::SplitStats;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One split name per line, statistics as a table.
    #[default]
    Table,
    /// A single JSON document.
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value; anything but `json` means table.
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Result of one split run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Split name per row, in row order.
    pub assignments: Vec<String>,

    /// Per-split statistics in priority order.
    pub stats: Vec<SplitStats<String>>,
}

#[derive(Debug, Tabled)]
struct StatsRow {
    #[tabled(rename = "Split")]
    name: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Effective")]
    effective: String,
    #[tabled(rename = "Expected")]
    expected: String,
}

impl From<&SplitStats<String>> for StatsRow {
    fn from(stats: &SplitStats<String>) -> Self {
        Self {
            name: stats.name.clone(),
            count: stats.count,
            effective: format!("{:.4}", stats.effective_ratio),
            expected: format!("{:.4}", stats.expected),
        }
    }
}

/// Print a report to stdout (statistics go to stderr in table mode).
pub fn print_report(report: &Report, format: OutputFormat, show_stats: bool) {
    match format {
        OutputFormat::Table => {
            for name in &report.assignments {
                println!("{}", name);
            }
            if show_stats {
                eprintln!("{}", render_stats_table(&report.stats));
            }
        }
        OutputFormat::Json => println!("{}", render_json(report)),
    }
}

/// Render statistics as a table.
pub fn render_stats_table(stats: &[SplitStats<String>]) -> String {
    if stats.is_empty() {
        return "No splits.".dimmed().to_string();
    }

    let rows: Vec<StatsRow> = stats.iter().map(StatsRow::from).collect();
    Table::new(rows).to_string()
}

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            assignments: vec!["train".into(), "test".into(), "train".into()],
            stats: vec![
                SplitStats {
                    name: "train".into(),
                    count: 2,
                    effective_ratio: 2.0 / 3.0,
                    expected: 0.7,
                },
                SplitStats {
                    name: "test".into(),
                    count: 1,
                    effective_ratio: 1.0 / 3.0,
                    expected: 0.3,
                },
            ],
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Table);
    }

    #[test]
    fn test_render_json() {
        let value: serde_json::Value = serde_json::from_str(&render_json(&report())).unwrap();
        assert_eq!(value["assignments"][1], "test");
        assert_eq!(value["stats"][0]["count"], 2);
        assert_eq!(value["stats"][1]["expected"], 0.3);
    }

    #[test]
    fn test_render_stats_table() {
        let table = render_stats_table(&report().stats);
        assert!(table.contains("Split"));
        assert!(table.contains("train"));
        assert!(table.contains("0.6667"));
        assert!(table.contains("0.7000"));
    }
}
