//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;
use crate::currency::DEFAULT_PREFIX;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// How amounts and steps are shown
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Display settings
#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// Prefix put in front of rendered amounts
    #[serde(default = "default_prefix")]
    pub currency_prefix: String,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_prefix: default_prefix(),
            color: default_color(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_color() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Also write logs to a file in the data directory
    #[serde(default)]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            file: false,
        }
    }
}

fn default_filter() -> String {
    "kalkulator=info,warn".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.currency_prefix, "Rp");
        assert!(config.display.color);
        assert_eq!(config.logging.filter, "kalkulator=info,warn");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.display.currency_prefix, "Rp");
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [display]
            color = false

            [logging]
            file = true
            "#,
        )
        .unwrap();
        assert!(!config.display.color);
        assert_eq!(config.display.currency_prefix, "Rp");
        assert!(config.logging.file);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[display\ncolor = 1").unwrap_err();
        assert!(matches!(err, super::super::Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ncurrency_prefix = \"IDR\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.display.currency_prefix, "IDR");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, super::super::Error::FileRead { .. }));
    }
}
