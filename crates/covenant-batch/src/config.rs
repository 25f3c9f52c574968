//! Configuration for batch runs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for discovery, scheduling and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Concurrent workers
    pub workers: usize,

    /// Completions between snapshots (0 disables snapshots)
    pub checkpoint_interval: usize,

    /// Snapshot directory, relative paths resolve against `output_dir`
    pub checkpoint_dir: PathBuf,

    /// Directory receiving the manifests
    pub output_dir: PathBuf,

    /// File name of the master manifest
    pub master_file: String,

    /// File name of the catalog served downstream
    pub catalog_file: String,

    /// Documents whose path contains this fragment are skipped
    pub excluded_path_fragment: String,

    /// Extension of the documents to process (case-insensitive)
    pub document_extension: String,
}

impl BatchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be greater than 0".to_string());
        }
        if self.master_file.trim().is_empty() {
            return Err("master_file must not be empty".to_string());
        }
        if self.catalog_file.trim().is_empty() {
            return Err("catalog_file must not be empty".to_string());
        }
        if self.master_file == self.catalog_file {
            return Err("master_file and catalog_file must differ".to_string());
        }
        if self.document_extension.trim_start_matches('.').is_empty() {
            return Err("document_extension must not be empty".to_string());
        }
        Ok(())
    }

    /// Aggressive preset: many workers, sparse snapshots
    pub fn aggressive() -> Self {
        Self {
            workers: 16,
            checkpoint_interval: 50,
            ..Self::default()
        }
    }

    /// Lenient preset: few workers, frequent snapshots
    pub fn lenient() -> Self {
        Self {
            workers: 2,
            checkpoint_interval: 5,
            ..Self::default()
        }
    }

    /// Snapshot directory resolved against the output directory
    pub fn checkpoint_path(&self) -> PathBuf {
        if self.checkpoint_dir.is_absolute() {
            self.checkpoint_dir.clone()
        } else {
            self.output_dir.join(&self.checkpoint_dir)
        }
    }

    /// Path of the master manifest
    pub fn master_path(&self) -> PathBuf {
        self.output_dir.join(&self.master_file)
    }

    /// Path of the serving catalog
    pub fn catalog_path(&self) -> PathBuf {
        self.output_dir.join(&self.catalog_file)
    }

    /// Whether `path` has the configured document extension
    pub fn is_document(&self, path: &Path) -> bool {
        let wanted = self.document_extension.trim_start_matches('.');
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            .unwrap_or(false)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            checkpoint_interval: 10,
            checkpoint_dir: PathBuf::from("checkpoints"),
            output_dir: PathBuf::from("."),
            master_file: "policies_complete.json".to_string(),
            catalog_file: "catalog.json".to_string(),
            excluded_path_fragment: "Riders_Life_insurance".to_string(),
            document_extension: "pdf".to_string(),
        }
    }
}
