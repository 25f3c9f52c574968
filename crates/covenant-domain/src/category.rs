//! Category module - the fixed directory-to-category lookup table

use serde::Serialize;

/// A policy category known to the catalog
///
/// Categories are resolved from the name of a subdirectory under the input
/// root. The mapping is a static table; directories that are not listed are
/// ignored during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    /// Subdirectory name under the input root (also the manifest file stem)
    pub dir_name: &'static str,

    /// Short key used in policy identifiers (e.g. `health` in `health_3`)
    pub key: &'static str,

    /// Human-readable label stored on every record
    pub label: &'static str,
}

/// All known categories, in manifest emission order
pub const CATEGORIES: [Category; 6] = [
    Category { dir_name: "Annuity_Plans", key: "annuity", label: "Annuity Plan" },
    Category { dir_name: "Health _Plans", key: "health", label: "Health Plan" },
    Category { dir_name: "Pension_Plans", key: "pension", label: "Pension Plan" },
    Category { dir_name: "Protection_Plans", key: "protection", label: "Protection Plan" },
    Category { dir_name: "Savings_Plans", key: "savings", label: "Savings Plan" },
    Category { dir_name: "ULIP_Plans", key: "ulip", label: "ULIP Plan" },
];

impl Category {
    /// Look up a category by its subdirectory name
    pub fn from_dir_name(dir_name: &str) -> Option<Self> {
        CATEGORIES.iter().copied().find(|c| c.dir_name == dir_name)
    }

    /// Look up a category by its identifier key
    pub fn from_key(key: &str) -> Option<Self> {
        CATEGORIES.iter().copied().find(|c| c.key == key)
    }

    /// Look up a category by its label
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORIES.iter().copied().find(|c| c.label == label)
    }

    /// All categories in table order
    pub fn all() -> &'static [Category] {
        &CATEGORIES
    }

    /// Position of this category in the table
    pub fn ordinal(&self) -> usize {
        CATEGORIES
            .iter()
            .position(|c| c.key == self.key)
            .unwrap_or(CATEGORIES.len())
    }

    /// Build the stable identifier for the n-th (1-based) record of this category
    pub fn policy_id(&self, position: usize) -> String {
        format!("{}_{}", self.key, position)
    }

    /// File name of this category's manifest
    pub fn manifest_file_name(&self) -> String {
        format!("{}.json", self.dir_name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_dir_name() {
        let health = Category::from_dir_name("Health _Plans").unwrap();
        assert_eq!(health.key, "health");
        assert_eq!(health.label, "Health Plan");
        assert!(Category::from_dir_name("Health_Plans").is_none());
        assert!(Category::from_dir_name("Riders_Life_insurance").is_none());
    }

    #[test]
    fn test_policy_id_format() {
        let ulip = Category::from_key("ulip").unwrap();
        assert_eq!(ulip.policy_id(1), "ulip_1");
        assert_eq!(ulip.policy_id(12), "ulip_12");
    }

    #[test]
    fn test_keys_and_labels_unique() {
        for (i, a) in CATEGORIES.iter().enumerate() {
            for b in &CATEGORIES[i + 1..] {
                assert_ne!(a.key, b.key);
                assert_ne!(a.label, b.label);
                assert_ne!(a.dir_name, b.dir_name);
            }
        }
    }

    #[test]
    fn test_ordinal_follows_table() {
        assert_eq!(Category::from_key("annuity").unwrap().ordinal(), 0);
        assert_eq!(Category::from_label("ULIP Plan").unwrap().ordinal(), 5);
    }

    #[test]
    fn test_manifest_file_name_keeps_dir_name() {
        let health = Category::from_key("health").unwrap();
        assert_eq!(health.manifest_file_name(), "Health _Plans.json");
    }
}
