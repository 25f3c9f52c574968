//! Catalog Assembler
//!
//! Groups drafts by category, numbers them in emission order and writes the
//! manifests. Emission order within a category is ascending `source_path`,
//! so identifiers do not depend on completion order or worker count.

use crate::config::BatchConfig;
use crate::error::BatchError;
use covenant_domain::{Category, PolicyDraft, PolicyRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Records of one category in emission order
#[derive(Debug, Clone)]
pub struct CategoryManifest {
    /// The category
    pub category: Category,

    /// Numbered records
    pub records: Vec<PolicyRecord>,
}

/// Emission counts for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    /// The category
    pub category: Category,

    /// Records emitted
    pub emitted: usize,

    /// Emitted records whose every factual field is a default
    pub fallback_only: usize,
}

/// The assembled catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    /// One manifest per category with at least one record, in table order
    pub manifests: Vec<CategoryManifest>,

    /// Every record, categories in table order
    pub master: Vec<PolicyRecord>,

    /// One entry per known category, including empty ones
    pub stats: Vec<CategoryStats>,
}

/// Files produced by [`Catalog::write`]
#[derive(Debug, Clone, Default)]
pub struct WrittenFiles {
    /// Per-category manifests
    pub manifests: Vec<PathBuf>,

    /// Master manifest
    pub master: PathBuf,

    /// Serving catalog
    pub catalog: PathBuf,
}

/// Shape loaded by the serving layer
#[derive(Serialize)]
struct ServingCatalog<'a> {
    policies: &'a [PolicyRecord],
    total_policies: usize,
    category_stats: BTreeMap<&'static str, usize>,
    categories: Vec<&'static str>,
}

impl Catalog {
    /// Group, order and number drafts
    pub fn assemble(drafts: Vec<PolicyDraft>) -> Self {
        let mut grouped: BTreeMap<usize, Vec<PolicyDraft>> = BTreeMap::new();
        for draft in drafts {
            grouped.entry(draft.category.ordinal()).or_default().push(draft);
        }

        let mut manifests = Vec::new();
        let mut stats = Vec::new();
        for category in Category::all() {
            let mut drafts = grouped.remove(&category.ordinal()).unwrap_or_default();
            drafts.sort_by(|a, b| a.emission_key().cmp(b.emission_key()));

            let fallback_only = drafts.iter().filter(|d| d.is_fallback_only()).count();
            if fallback_only > 1 {
                warn!(
                    category = category.label,
                    fallback_only, "Several records carry only default values"
                );
            }
            stats.push(CategoryStats {
                category: *category,
                emitted: drafts.len(),
                fallback_only,
            });

            if drafts.is_empty() {
                continue;
            }
            let records = drafts
                .into_iter()
                .enumerate()
                .map(|(i, draft)| PolicyRecord::number(draft, i + 1))
                .collect();
            manifests.push(CategoryManifest {
                category: *category,
                records,
            });
        }

        let master = manifests.iter().flat_map(|m| m.records.iter().cloned()).collect();
        Self {
            manifests,
            master,
            stats,
        }
    }

    /// Number of records in the master manifest
    pub fn total(&self) -> usize {
        self.master.len()
    }

    /// Stats for one category
    pub fn stats_for(&self, category: Category) -> Option<&CategoryStats> {
        self.stats.iter().find(|s| s.category == category)
    }

    /// Write every manifest into the configured output directory
    ///
    /// Categories without records produce no file.
    pub fn write(&self, config: &BatchConfig) -> Result<WrittenFiles, BatchError> {
        std::fs::create_dir_all(&config.output_dir)?;
        let mut written = WrittenFiles::default();

        for manifest in &self.manifests {
            let path = config.output_dir.join(manifest.category.manifest_file_name());
            write_json(&path, &manifest.records)?;
            info!(category = manifest.category.label, records = manifest.records.len(), path = %path.display(), "Wrote manifest");
            written.manifests.push(path);
        }

        written.master = config.master_path();
        write_json(&written.master, &self.master)?;

        written.catalog = config.catalog_path();
        let serving = ServingCatalog {
            policies: &self.master,
            total_policies: self.total(),
            category_stats: self.stats.iter().map(|s| (s.category.key, s.emitted)).collect(),
            categories: Category::all().iter().map(|c| c.key).collect(),
        };
        write_json(&written.catalog, &serving)?;

        info!(total = self.total(), path = %written.master.display(), "Wrote master manifest");
        Ok(written)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), BatchError> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}
