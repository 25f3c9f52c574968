//! Append-only result arena shared by workers
//!
//! One mutex guards both the entries and the completion counter, which is
//! simply the number of entries pushed so far.

use covenant_domain::{Category, DocumentSource, PolicyDraft};
use serde::Serialize;
use std::sync::Mutex;

/// A document that produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    /// Identifier relative to the input root
    pub identifier: String,

    /// Category the document was discovered under
    #[serde(serialize_with = "serialize_label")]
    pub category: Category,

    /// What went wrong
    pub reason: String,
}

fn serialize_label<S: serde::Serializer>(category: &Category, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.label)
}

impl DocumentFailure {
    /// Failure for a discovered document
    pub fn new(source: &DocumentSource, reason: impl Into<String>) -> Self {
        Self {
            identifier: source.identifier.clone(),
            category: source.category,
            reason: reason.into(),
        }
    }
}

/// Outcome of one document
#[derive(Debug, Clone)]
pub enum ArenaEntry {
    /// A validated draft
    Draft(Box<PolicyDraft>),

    /// A document-level failure
    Failure(DocumentFailure),
}

/// What a push observed
#[derive(Debug)]
pub struct Completion {
    /// 1-based completion index of the pushed entry
    pub index: usize,

    /// Drafts so far, in completion order, when a snapshot is due
    pub snapshot: Option<Vec<PolicyDraft>>,
}

/// Results collected in completion order
#[derive(Debug)]
pub struct ResultArena {
    entries: Mutex<Vec<ArenaEntry>>,
    checkpoint_interval: usize,
}

impl ResultArena {
    /// Create an arena that asks for a snapshot every `checkpoint_interval` pushes
    pub fn new(checkpoint_interval: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            checkpoint_interval,
        }
    }

    /// Append an entry
    ///
    /// The snapshot, when due, is taken under the same lock as the push so
    /// it reflects exactly the first `index` completions.
    pub fn push(&self, entry: ArenaEntry) -> Completion {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push(entry);
        let index = entries.len();

        let due = self.checkpoint_interval > 0 && index % self.checkpoint_interval == 0;
        let snapshot = due.then(|| drafts_of(&entries));
        Completion { index, snapshot }
    }

    /// Number of completions so far
    pub fn completed(&self) -> usize {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    /// Drafts so far, in completion order
    pub fn drafts(&self) -> Vec<PolicyDraft> {
        drafts_of(&self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    /// Take every entry, leaving the arena empty
    pub fn take(&self) -> Vec<ArenaEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

fn drafts_of(entries: &[ArenaEntry]) -> Vec<PolicyDraft> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            ArenaEntry::Draft(draft) => Some((**draft).clone()),
            ArenaEntry::Failure(_) => None,
        })
        .collect()
}
