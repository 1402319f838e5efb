mod schema;

pub use schema::{Config, OutputConfig, SelectionConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/contest-rank/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("contest-rank")
}

/// Get the default config file path (~/.config/contest-rank/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to an empty config when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path();
            if !default_path.exists() {
                tracing::debug!("no config at {}, using defaults", default_path.display());
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!("loaded config from {}", config_path.display());
    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref dataset) = config.dataset {
        let is_json = dataset
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            errors.push(format!(
                "dataset: expected a .json file, got '{}'",
                dataset.display()
            ));
        }
    }

    if let Some(ref selection) = config.selection {
        if selection.step == Some(0) {
            errors.push("selection.step: ids start at 1".to_string());
        }
        if selection.category == Some(0) {
            errors.push("selection.category: ids start at 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Merge command-line overrides over the configured selection.
pub fn effective_selection(config: &Config, overrides: SelectionConfig) -> SelectionConfig {
    let base = config.selection.clone().unwrap_or_default();
    SelectionConfig {
        step: overrides.step.or(base.step),
        category: overrides.category.or(base.category),
        genre: overrides.genre.or(base.genre),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contest::Genre;
    use std::env;

    #[test]
    fn test_load_explicit_missing_config_fails() {
        let temp_path = env::temp_dir().join("contest_rank_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_file() {
        let temp_path = env::temp_dir().join("contest_rank_test_config.yaml");
        fs::write(
            &temp_path,
            "dataset: /srv/contest.json\nselection:\n  step: 2\n",
        )
        .unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("/srv/contest.json")));
        assert_eq!(config.selection.unwrap().step, Some(2));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_path = env::temp_dir().join("contest_rank_test_invalid_config.yaml");
        fs::write(&temp_path, "selection: [not, a, map]\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = Config {
            dataset: Some(PathBuf::from("/srv/contest.yaml")), // Error 1
            selection: Some(SelectionConfig {
                step: Some(0),     // Error 2
                category: Some(0), // Error 3
                genre: None,
            }),
            output: None,
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("dataset"));
        assert!(errors[1].contains("selection.step"));
        assert!(errors[2].contains("selection.category"));
    }

    #[test]
    fn test_effective_selection_overrides() {
        let config = Config {
            dataset: None,
            selection: Some(SelectionConfig {
                step: Some(1),
                category: Some(2),
                genre: Some(Genre::Female),
            }),
            output: None,
        };
        let selection = effective_selection(
            &config,
            SelectionConfig {
                step: Some(5),
                category: None,
                genre: Some(Genre::Male),
            },
        );
        assert_eq!(selection.step, Some(5));
        assert_eq!(selection.category, Some(2));
        assert_eq!(selection.genre, Some(Genre::Male));
    }

    #[test]
    fn test_config_path_under_config_dir() {
        let path = get_config_path();
        assert!(path.ends_with("contest-rank/config.yaml"));
    }
}
