//! Configuration management for the CLI.
//!
//! One TOML file with three tables: `[settings]` for the CLI itself,
//! `[pipeline]` for the per-document pipeline and `[batch]` for the run.
//! Command-line flags override whatever the file sets.

use crate::error::{CliError, Result};
use covenant_batch::BatchConfig;
use covenant_extractor::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Per-document pipeline
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Batch run
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Input root used when `run` gets no `--root`
    #[serde(default = "default_input_root")]
    pub input_root: PathBuf,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".covenant").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one the default path is tried
    /// and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!("Config file not found: {}", path.display())));
                }
                path.to_path_buf()
            }
            None => match Self::path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Check both the pipeline and batch sections.
    pub fn validate(&self) -> Result<()> {
        self.pipeline
            .validate()
            .map_err(|e| CliError::Config(format!("[pipeline] {}", e)))?;
        self.batch
            .validate()
            .map_err(|e| CliError::Config(format!("[batch] {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: default_true(),
            format: default_format(),
            input_root: default_input_root(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_input_root() -> PathBuf {
    PathBuf::from("policies")
}

impl From<crate::cli::CliFormat> for OutputFormat {
    fn from(format: crate::cli::CliFormat) -> Self {
        match format {
            crate::cli::CliFormat::Table => OutputFormat::Table,
            crate::cli::CliFormat::Json => OutputFormat::Json,
        }
    }
}
