//! Run summary

use crate::catalog::Catalog;
use crate::orchestrator::BatchOutcome;
use std::time::Duration;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Documents attempted
    pub total: usize,

    /// Documents that produced a record
    pub processed: usize,

    /// Documents that did not
    pub failed: usize,

    /// Records written to the master manifest
    pub emitted: usize,

    /// Emitted records carrying only defaults
    pub fallback_only: usize,

    /// Emitted records with a model narrative
    pub model_narratives: usize,

    /// Per-category `(label, emitted, fallback_only)`, table order
    pub categories: Vec<(&'static str, usize, usize)>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Collect metrics from a finished run
    pub fn collect(outcome: &BatchOutcome, catalog: &Catalog) -> Self {
        Self {
            total: outcome.total,
            processed: outcome.processed,
            failed: outcome.failed,
            emitted: catalog.total(),
            fallback_only: catalog.stats.iter().map(|s| s.fallback_only).sum(),
            model_narratives: catalog
                .master
                .iter()
                .filter(|r| !r.draft.ai_enrichment.source.is_template())
                .count(),
            categories: catalog
                .stats
                .iter()
                .map(|s| (s.category.label, s.emitted, s.fallback_only))
                .collect(),
            elapsed: outcome.elapsed,
        }
    }

    /// Share of attempted documents that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Batch Summary".to_string(),
            "=============".to_string(),
            format!("Documents: {}", self.total),
            format!("Processed: {}", self.processed),
            format!("Failed: {}", self.failed),
            format!("Success rate: {:.1}%", self.success_rate() * 100.0),
            format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()),
            String::new(),
            "Records by category:".to_string(),
        ];
        for (label, emitted, fallback_only) in &self.categories {
            lines.push(format!("  {}: {} ({} default-only)", label, emitted, fallback_only));
        }
        lines.push(format!("  Total: {}", self.emitted));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_draft;

    #[test]
    fn test_collect_and_summary() {
        let catalog = Catalog::assemble(vec![sample_draft("health", "a.pdf"), sample_draft("health", "b.pdf")]);
        let outcome = BatchOutcome {
            drafts: Vec::new(),
            failures: Vec::new(),
            processed: 2,
            failed: 1,
            total: 3,
            elapsed: Duration::from_millis(1500),
        };

        let metrics = RunMetrics::collect(&outcome, &catalog);
        assert_eq!(metrics.emitted, 2);
        assert_eq!(metrics.fallback_only, 2);
        assert_eq!(metrics.model_narratives, 0);
        assert_eq!(metrics.categories.len(), 6);

        let summary = metrics.summary();
        assert!(summary.contains("Failed: 1"));
        assert!(summary.contains("Health Plan: 2 (2 default-only)"));
        assert!(summary.contains("Success rate: 66.7%"));
    }

    #[test]
    fn test_empty_run_rate() {
        assert_eq!(RunMetrics::default().success_rate(), 0.0);
    }
}
