//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use covenant_batch::{DocumentFailure, RunMetrics};
use covenant_domain::{Category, PolicyRecord};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the end-of-run report.
    pub fn format_run(&self, metrics: &RunMetrics, failures: &[DocumentFailure]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_run_json(metrics, failures),
            OutputFormat::Table => Ok(self.format_run_table(metrics, failures)),
        }
    }

    fn format_run_json(&self, metrics: &RunMetrics, failures: &[DocumentFailure]) -> Result<String> {
        let categories: Vec<serde_json::Value> = metrics
            .categories
            .iter()
            .map(|(label, emitted, fallback_only)| {
                serde_json::json!({
                    "category": label,
                    "records": emitted,
                    "default_only": fallback_only,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "total": metrics.total,
            "processed": metrics.processed,
            "failed": metrics.failed,
            "success_rate": metrics.success_rate(),
            "emitted": metrics.emitted,
            "model_narratives": metrics.model_narratives,
            "elapsed_secs": metrics.elapsed.as_secs_f64(),
            "categories": categories,
            "failures": failures,
        }))?)
    }

    fn format_run_table(&self, metrics: &RunMetrics, failures: &[DocumentFailure]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Records", "Default-only"]);
        for (label, emitted, fallback_only) in &metrics.categories {
            builder.push_record([label.to_string(), emitted.to_string(), fallback_only.to_string()]);
        }
        builder.push_record([
            "Total".to_string(),
            metrics.emitted.to_string(),
            metrics.fallback_only.to_string(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![
            format!(
                "Documents: {}  Processed: {}  Failed: {}  ({:.1}% in {:.1}s)",
                metrics.total,
                metrics.processed,
                metrics.failed,
                metrics.success_rate() * 100.0,
                metrics.elapsed.as_secs_f64()
            ),
            table.to_string(),
        ];
        if metrics.model_narratives > 0 {
            lines.push(self.info(&format!("{} record(s) carry a model narrative", metrics.model_narratives)));
        }
        for failure in failures {
            lines.push(self.warning(&format!("{}: {}", failure.identifier, failure.reason)));
        }
        lines.join("\n")
    }

    /// Format the category table.
    pub fn format_categories(&self, categories: &[Category]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(categories)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Directory", "Key", "Label", "Manifest"]);
        for category in categories {
            builder.push_record([
                format!("{:?}", category.dir_name),
                category.key.to_string(),
                category.label.to_string(),
                category.manifest_file_name(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        Ok(table.to_string())
    }

    /// Format one record as JSON (every format).
    pub fn format_record(&self, record: &PolicyRecord) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
