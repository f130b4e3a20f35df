//! Split configuration.
//!
//! Settings come from two places:
//! - An optional TOML plan file (`--plan`)
//! - Command-line flags and environment variables, which win over the plan

use std::path::Path;

use serde::{Deserialize, Serialize};
use splitter_core::{SeedStrategy, DEFAULT_SEED};

use crate::error::CliError;

/// Split plan as stored in a TOML file.
///
/// ```toml
/// seed = 7
/// shuffle = true
/// per_stratum_seed = false
///
/// [[splits]]
/// name = "train"
/// weight = 0.8
///
/// [[splits]]
/// name = "test"
/// weight = 0.2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Splits in priority order.
    #[serde(default)]
    pub splits: Vec<PlanSplit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_stratum_seed: Option<bool>,
}

/// One split entry of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSplit {
    pub name: String,
    pub weight: f64,
}

impl Plan {
    /// Parse a plan from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load a plan from disk.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents).map_err(|source| CliError::Plan {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line, before merging with a plan.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub splits: Vec<String>,
    pub seed: Option<u64>,
    pub no_shuffle: bool,
    pub per_stratum_seed: bool,
}

/// Fully resolved split settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub splits: Vec<(String, f64)>,
    pub seed: u64,
    pub shuffle: bool,
    pub seed_strategy: SeedStrategy,
}

impl Settings {
    /// Merge command-line overrides on top of a plan.
    ///
    /// Split arguments replace the plan's splits entirely rather than
    /// extending them, since their order is the priority order.
    pub fn resolve(overrides: &Overrides, plan: &Plan) -> Result<Self, CliError> {
        let splits = if overrides.splits.is_empty() {
            plan.splits
                .iter()
                .map(|s| (s.name.clone(), s.weight))
                .collect()
        } else {
            overrides
                .splits
                .iter()
                .map(|s| parse_split_arg(s))
                .collect::<Result<Vec<_>, _>>()?
        };

        if splits.is_empty() {
            return Err(CliError::NoSplits);
        }

        let shuffle = !overrides.no_shuffle && plan.shuffle.unwrap_or(true);
        let seed_strategy = if overrides.per_stratum_seed || plan.per_stratum_seed.unwrap_or(false)
        {
            SeedStrategy::PerStratum
        } else {
            SeedStrategy::Shared
        };

        Ok(Self {
            splits,
            seed: overrides.seed.or(plan.seed).unwrap_or(DEFAULT_SEED),
            shuffle,
            seed_strategy,
        })
    }
}

/// Parse a `NAME=WEIGHT` split argument.
///
/// The weight may be a fraction (`0.8`), a percentage (`80%`) or an
/// absolute count (`1300`).
pub fn parse_split_arg(spec: &str) -> Result<(String, f64), CliError> {
    let Some((name, weight_raw)) = spec.rsplit_once('=') else {
        return Err(CliError::invalid_split(spec, "expected NAME=WEIGHT"));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::invalid_split(spec, "split name cannot be empty"));
    }

    let weight_raw = weight_raw.trim();
    let weight = match weight_raw.strip_suffix('%') {
        Some(pct) => {
            let pct: f64 = pct.trim().parse().map_err(|_| {
                CliError::invalid_split(spec, format!("invalid percentage '{}'", weight_raw))
            })?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(CliError::invalid_split(
                    spec,
                    "percentage must be between 0 and 100",
                ));
            }
            pct / 100.0
        }
        None => weight_raw.parse().map_err(|_| {
            CliError::invalid_split(spec, format!("invalid weight '{}'", weight_raw))
        })?,
    };

    Ok((name.to_string(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_arg() {
        assert_eq!(parse_split_arg("train=0.8").unwrap(), ("train".to_string(), 0.8));
        assert_eq!(parse_split_arg("test=20%").unwrap(), ("test".to_string(), 0.2));
        assert_eq!(parse_split_arg("dev=13").unwrap(), ("dev".to_string(), 13.0));
        assert_eq!(parse_split_arg("a=b=0.5").unwrap(), ("a=b".to_string(), 0.5));
    }

    #[test]
    fn test_parse_split_arg_errors() {
        assert!(parse_split_arg("train").is_err());
        assert!(parse_split_arg("=0.5").is_err());
        assert!(parse_split_arg("train=abc").is_err());
        assert!(parse_split_arg("train=120%").is_err());
    }

    #[test]
    fn test_plan_from_toml() {
        let plan = Plan::from_toml_str(
            r#"
seed = 7
shuffle = false

[[splits]]
name = "train"
weight = 13

[[splits]]
name = "test"
weight = 7
"#,
        )
        .unwrap();

        assert_eq!(plan.seed, Some(7));
        assert_eq!(plan.shuffle, Some(false));
        assert_eq!(plan.splits.len(), 2);
        assert_eq!(plan.splits[0].weight, 13.0);
    }

    #[test]
    fn test_plan_rejects_unknown_fields() {
        assert!(Plan::from_toml_str("sed = 7").is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let overrides = Overrides {
            splits: vec!["train=0.8".into(), "test=0.2".into()],
            ..Default::default()
        };
        let settings = Settings::resolve(&overrides, &Plan::default()).unwrap();

        assert_eq!(settings.seed, DEFAULT_SEED);
        assert!(settings.shuffle);
        assert_eq!(settings.seed_strategy, SeedStrategy::Shared);
        assert_eq!(settings.splits[1], ("test".to_string(), 0.2));
    }

    #[test]
    fn test_flags_override_plan() {
        let plan = Plan {
            splits: vec![PlanSplit {
                name: "all".into(),
                weight: 1.0,
            }],
            seed: Some(1),
            shuffle: Some(true),
            per_stratum_seed: None,
        };
        let overrides = Overrides {
            splits: vec![],
            seed: Some(9),
            no_shuffle: true,
            per_stratum_seed: true,
        };
        let settings = Settings::resolve(&overrides, &plan).unwrap();

        assert_eq!(settings.splits, vec![("all".to_string(), 1.0)]);
        assert_eq!(settings.seed, 9);
        assert!(!settings.shuffle);
        assert_eq!(settings.seed_strategy, SeedStrategy::PerStratum);
    }

    #[test]
    fn test_no_splits() {
        let err = Settings::resolve(&Overrides::default(), &Plan::default()).unwrap_err();
        assert!(matches!(err, CliError::NoSplits));
    }

    #[test]
    fn test_load_plan_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, "[[splits]]\nname = \"all\"\nweight = 1.0\n").unwrap();

        let plan = Plan::load(&path).unwrap();
        assert_eq!(plan.splits[0].name, "all");

        let missing = Plan::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, CliError::Io { .. }));
    }
}
