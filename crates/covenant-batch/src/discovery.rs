//! Document discovery under the input root
//!
//! Each subdirectory of the root whose name is in the category table is
//! walked recursively. Unmapped subdirectories are ignored, as is any path
//! containing the configured exclusion fragment.

use crate::config::BatchConfig;
use crate::error::BatchError;
use covenant_domain::{Category, DocumentSource};
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, info, warn};

/// Discover every document under `root`, sorted by identifier
pub fn discover(root: &Path, config: &BatchConfig) -> Result<Vec<DocumentSource>, BatchError> {
    if !root.is_dir() {
        return Err(BatchError::InputRootMissing(root.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        match Category::from_dir_name(&dir_name) {
            Some(category) => {
                let before = sources.len();
                walk(root, &entry.path(), category, config, &mut sources);
                info!(category = category.label, documents = sources.len() - before, "Discovered documents");
            }
            None => debug!(dir = %dir_name, "Ignoring unmapped directory"),
        }
    }

    sources.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(sources)
}

fn walk(root: &Path, dir: &Path, category: Category, config: &BatchConfig, sources: &mut Vec<DocumentSource>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let identifier = identifier(root, &path);
        if is_excluded(&identifier, config) {
            debug!(path = %identifier, "Skipping excluded path");
            continue;
        }

        match entry.file_type() {
            Ok(kind) if kind.is_dir() => walk(root, &path, category, config, sources),
            Ok(kind) if kind.is_file() && config.is_document(&path) => {
                sources.push(DocumentSource::new(path, identifier, category));
            }
            Ok(_) => {}
            Err(e) => warn!(path = %identifier, error = %e, "Skipping unreadable entry"),
        }
    }
}

/// Path relative to the root, `/`-separated
fn identifier(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_excluded(identifier: &str, config: &BatchConfig) -> bool {
    let fragment = config.excluded_path_fragment.as_str();
    !fragment.is_empty() && identifier.contains(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_missing_root() {
        let result = discover(Path::new("/definitely/not/here"), &BatchConfig::default());
        assert!(matches!(result, Err(BatchError::InputRootMissing(_))));
    }

    #[test]
    fn test_discovery_rules() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "Savings_Plans/b.pdf");
        touch(root, "Savings_Plans/a.PDF");
        touch(root, "Savings_Plans/nested/deep/c.pdf");
        touch(root, "Savings_Plans/notes.txt");
        touch(root, "Savings_Plans/Riders_Life_insurance/r.pdf");
        touch(root, "Health _Plans/h.pdf");
        touch(root, "Unmapped/u.pdf");
        touch(root, "loose.pdf");

        let sources = discover(root, &BatchConfig::default()).unwrap();
        let ids: Vec<&str> = sources.iter().map(|s| s.identifier.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "Health _Plans/h.pdf",
                "Savings_Plans/a.PDF",
                "Savings_Plans/b.pdf",
                "Savings_Plans/nested/deep/c.pdf",
            ]
        );
        assert_eq!(sources[0].category.key, "health");
        assert_eq!(sources[3].category.key, "savings");
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path(), &BatchConfig::default()).unwrap().is_empty());
    }
}
