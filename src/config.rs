//! Run configuration for the chain-join pipeline

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::execution::Strategy;

/// The full option set for one batch run.
///
/// `tracked_properties` doubles as the filter set for the load phase and the
/// fixed join order of the chain; it is an input, never inferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub tracked_properties: Vec<String>,
    pub strategy: Strategy,
    #[serde(default = "default_reduction")]
    pub use_semi_join_reduction: bool,
    pub output_path: PathBuf,
    /// Rows buffered before the output sink is flushed.
    #[serde(default)]
    pub output_batch_size: Option<usize>,
}

fn default_reduction() -> bool {
    true
}

impl RunConfig {
    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: RunConfig =
            toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.tracked_properties.is_empty() {
            return Err(Error::Config("tracked_properties must name at least one relation".into()));
        }
        if self.output_batch_size == Some(0) {
            return Err(Error::Config("output_batch_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_round_trip_through_toml() {
        let toml = r#"
            input_path = "data/100k.txt"
            tracked_properties = ["follows", "friendOf", "likes", "hasReview"]
            strategy = "sort_merge_join"
            output_path = "out/results.txt"
        "#;
        let config: RunConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.strategy, Strategy::SortMergeJoin);
        assert!(config.use_semi_join_reduction);
        assert_eq!(config.output_batch_size, None);
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let config = RunConfig {
            input_path: "in.txt".into(),
            tracked_properties: vec![],
            strategy: Strategy::HashJoin,
            use_semi_join_reduction: true,
            output_path: "out.txt".into(),
            output_batch_size: None,
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
