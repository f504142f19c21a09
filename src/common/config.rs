//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Test run settings
    #[serde(default)]
    pub run: RunConfig,

    /// Defaults applied while merging results
    #[serde(default)]
    pub results: ResultsConfig,
}

/// REST API settings
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Value of the `api-version` query parameter sent with every request
    #[serde(default = "default_api_version")]
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            version: default_api_version(),
        }
    }
}

fn default_api_version() -> String {
    "7.1".to_string()
}

/// Test run settings
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// Prefix of the run name; the suite name is appended
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
        }
    }
}

fn default_name_prefix() -> String {
    "Automation Test Run".to_string()
}

/// Defaults applied while merging results
#[derive(Debug, Deserialize, Clone)]
pub struct ResultsConfig {
    /// Priority stamped on records that don't carry one
    #[serde(default = "default_priority")]
    pub default_priority: i64,

    /// Failure type stamped on non-passing records that don't carry one
    #[serde(default = "default_failure_type")]
    pub default_failure_type: String,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
            default_failure_type: default_failure_type(),
        }
    }
}

fn default_priority() -> i64 {
    2
}
fn default_failure_type() -> String {
    "New Issue".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.version.trim().is_empty() {
            return Err(super::Error::Config("api.version must not be empty".into()));
        }
        if self.results.default_failure_type.trim().is_empty() {
            return Err(super::Error::Config(
                "results.default_failure_type must not be empty".into(),
            ));
        }
        Ok(())
    }
}
