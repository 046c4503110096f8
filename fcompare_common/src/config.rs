use crate::{DiffAlgorithm, FcompareError};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "fcompare.toml";

/// Persistent defaults; every field can be overridden on the command line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Alignment algorithm for extracted units
    pub algorithm: DiffAlgorithm,

    /// Strip line terminators from text units (CRLF and LF compare equal)
    pub normalize_line_endings: bool,

    /// Field delimiter for CSV files
    pub csv_delimiter: char,

    /// Colorize output when stdout is a terminal
    pub color: bool,

    /// Exit with 1 when files differ and 2 on errors
    pub exit_code: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            algorithm: DiffAlgorithm::Lcs,
            normalize_line_endings: true,
            csv_delimiter: ',',
            color: true,
            exit_code: false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FcompareError> {
        if !self.csv_delimiter.is_ascii() {
            return Err(FcompareError::Config(format!(
                "csv_delimiter must be a single ASCII character, got {:?}",
                self.csv_delimiter
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
    pub exists: bool,
}

/// Load the configuration file.
///
/// An explicit path must exist. Without one, `fcompare.toml` in the platform
/// config directory is used when present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, FcompareError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(FcompareError::Config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => default_config_path(),
    };

    let exists = path.as_ref().is_some_and(|p| p.exists());

    let config = match (&path, exists) {
        (Some(path), true) => parse_config(&fs::read_to_string(path)?)?,
        _ => AppConfig::default(),
    };

    Ok(LoadedConfig {
        config,
        path,
        exists,
    })
}

pub fn parse_config(data: &str) -> Result<AppConfig, FcompareError> {
    let config: AppConfig =
        toml::from_str(data).map_err(|e| FcompareError::Serialization(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "fcompare", "fcompare").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("algorithm = \"patience\"\n").unwrap();
        assert_eq!(config.algorithm, DiffAlgorithm::Patience);
        assert!(config.normalize_line_endings);
        assert_eq!(config.csv_delimiter, ',');
    }

    #[test]
    fn test_invalid_delimiter_rejected() {
        let err = parse_config("csv_delimiter = \"§\"\n").unwrap_err();
        assert!(matches!(err, FcompareError::Config(_)));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let err = parse_config("algorithm = \"histogram\"\n").unwrap_err();
        assert!(matches!(err, FcompareError::Serialization(_)));
    }

    #[test]
    fn test_load_explicit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "csv_delimiter = \";\"\nexit_code = true\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();

        assert!(loaded.exists);
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(
            loaded.config,
            AppConfig {
                csv_delimiter: ';',
                exit_code: true,
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(&path)),
            Err(FcompareError::Config(_))
        ));
    }
}
