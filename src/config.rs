//! Configuration file handling.
//!
//! This module provides loading and saving of versweep configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/versweep/config.toml`
//! - macOS: `~/Library/Application Support/versweep/config.toml`
//! - Windows: `%APPDATA%\versweep\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! registry_url = "https://repo1.maven.org/maven2"
//! registry_timeout_secs = 30
//! output_dir = "target/versweep"
//! report_prefix = "dependency-analyze-"
//! default_format = "table"
//!
//! [engine]
//! command = ["dependency-check", "--scan", "{pom}", "--format", "HTML", "--out", "{report}"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::{CommandEngine, DEFAULT_ENGINE_COMMAND, DEFAULT_GENERATED_REPORT};
use crate::error::SweepError;
use crate::registry::{MavenRegistry, DEFAULT_REGISTRY_URL};

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use versweep::Config;
///
/// let config = Config::load().unwrap();
/// println!("Reports go to {}", config.output_dir.display());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of a Maven 2 layout repository.
    ///
    /// Default: Maven Central
    pub registry_url: String,

    /// Timeout for the metadata request. Unset means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_timeout_secs: Option<u64>,

    /// Directory holding per-version reports and the CSV summary.
    ///
    /// Default: `target/versweep`
    pub output_dir: PathBuf,

    /// Prefix for report and CSV file names.
    ///
    /// Default: `dependency-analyze-`
    pub report_prefix: String,

    /// Default console format: "table", "json" or "csv".
    pub default_format: String,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// How the external scanner is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program followed by its arguments, with placeholders.
    pub command: Vec<String>,

    /// Report file the command leaves in `{work_dir}`, if it does not write
    /// to `{report}` directly.
    ///
    /// Unset means the command writes `{report}` itself, except for the
    /// default command, which always leaves `dependency-check-report.html`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_report: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_ENGINE_COMMAND.iter().map(|s| s.to_string()).collect(),
            generated_report: None,
        }
    }
}

impl EngineConfig {
    pub fn is_default_command(&self) -> bool {
        self.command.iter().map(String::as_str).eq(DEFAULT_ENGINE_COMMAND.iter().copied())
    }

    /// Report file to collect after a run, if any.
    pub fn generated_report(&self) -> Option<&str> {
        match &self.generated_report {
            Some(name) => Some(name.as_str()),
            None if self.is_default_command() => Some(DEFAULT_GENERATED_REPORT),
            None => None,
        }
    }

    pub fn build(&self) -> std::result::Result<CommandEngine, SweepError> {
        if self.command.is_empty() {
            return Err(SweepError::Config("engine.command must not be empty".to_string()));
        }

        let engine = CommandEngine::new(self.command.clone());
        Ok(match self.generated_report() {
            Some(name) => engine.with_generated_report(name),
            None => engine,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry_timeout_secs: None,
            output_dir: PathBuf::from("target").join("versweep"),
            report_prefix: "dependency-analyze-".to_string(),
            default_format: "table".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("versweep")
            .join("config.toml")
    }

    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    pub fn registry(&self) -> std::result::Result<MavenRegistry, SweepError> {
        let registry = MavenRegistry::with_base_url(&self.registry_url);
        match self.registry_timeout_secs {
            Some(secs) => registry.with_timeout(Duration::from_secs(secs)),
            None => Ok(registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.registry_url, "https://repo1.maven.org/maven2");
        assert_eq!(config.report_prefix, "dependency-analyze-");
        assert_eq!(config.default_format, "table");
        assert_eq!(config.registry_timeout_secs, None);
        assert_eq!(config.engine.command.first().map(String::as_str), Some("mvn"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            report_prefix = "scan-"

            [engine]
            command = ["odc", "--out", "{report}"]
            "#,
        )
        .unwrap();

        assert_eq!(config.report_prefix, "scan-");
        assert_eq!(config.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.engine.command, vec!["odc", "--out", "{report}"]);
        assert_eq!(config.engine.generated_report(), None);
    }

    #[test]
    fn test_default_command_collects_generated_report() {
        let config = Config::from_toml("report_prefix = \"scan-\"").unwrap();
        assert!(config.engine.is_default_command());
        assert_eq!(
            config.engine.generated_report(),
            Some("dependency-check-report.html")
        );
    }

    #[test]
    fn test_explicit_generated_report_with_custom_command() {
        let config = Config::from_toml(
            r#"
            [engine]
            command = ["odc", "--out", "{work_dir}"]
            generated_report = "odc.html"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.generated_report(), Some("odc.html"));
    }

    #[test]
    fn test_registry_with_timeout() {
        let config = Config {
            registry_timeout_secs: Some(10),
            ..Config::default()
        };
        assert!(config.registry().is_ok());
    }

    #[test]
    fn test_default_config_round_trips() {
        let text = Config::generate_default_config();
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.output_dir, Config::default().output_dir);
    }

    #[test]
    fn test_empty_engine_command_rejected() {
        let engine = EngineConfig {
            command: Vec::new(),
            generated_report: None,
        };
        assert!(matches!(engine.build(), Err(SweepError::Config(_))));
    }
}
