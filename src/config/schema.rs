use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::contest::{CategoryId, Genre, StepId};

/// Main configuration.
///
/// Example YAML:
/// ```yaml
/// dataset: ~/contests/bloc-party.json
/// selection:
///   step: 1
///   category: 2
///   genre: female
/// output:
///   colors: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the contest dataset (JSON export)
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Default step/category/genre to rank, overridable from the command line
    #[serde(default)]
    pub selection: Option<SelectionConfig>,

    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    #[serde(default)]
    pub step: Option<StepId>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    /// Ignored for unisex categories
    #[serde(default)]
    pub genre: Option<Genre>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Force colors on or off (default: on when stdout is a terminal)
    #[serde(default)]
    pub colors: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
dataset: /tmp/contest.json
selection:
  step: 1
  category: 2
  genre: female
output:
  colors: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("/tmp/contest.json")));

        let selection = config.selection.unwrap();
        assert_eq!(selection.step, Some(1));
        assert_eq!(selection.category, Some(2));
        assert_eq!(selection.genre, Some(Genre::Female));
        assert_eq!(config.output.unwrap().colors, Some(false));
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
selection:
  category: 3
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.dataset.is_none());
        assert!(config.output.is_none());

        let selection = config.selection.unwrap();
        assert!(selection.step.is_none());
        assert_eq!(selection.category, Some(3));
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "datasets: /tmp/contest.json\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            dataset: Some(PathBuf::from("/srv/contest.json")),
            selection: Some(SelectionConfig {
                step: Some(4),
                category: Some(1),
                genre: Some(Genre::Male),
            }),
            output: None,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
