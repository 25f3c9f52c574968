//! Documents and the text recovered from them

use crate::category::Category;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A discovered document that has not been read yet
///
/// Produced by discovery, consumed once by a batch worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    /// Path on disk
    pub path: PathBuf,

    /// Identifier relative to the input root (stable across runs)
    pub identifier: String,

    /// Category hint taken from the enclosing category directory
    pub category: Category,
}

impl DocumentSource {
    /// Create a new document source
    pub fn new(path: impl Into<PathBuf>, identifier: impl Into<String>, category: Category) -> Self {
        Self {
            path: path.into(),
            identifier: identifier.into(),
            category,
        }
    }

    /// File name component of the path (empty if the path has none)
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A document with its raw content loaded
///
/// Immutable once created.
#[derive(Debug, Clone)]
pub struct Document {
    source: DocumentSource,
    content: Arc<[u8]>,
}

impl Document {
    /// Create a document from its source and raw bytes
    pub fn new(source: DocumentSource, content: Vec<u8>) -> Self {
        Self {
            source,
            content: content.into(),
        }
    }

    /// Where this document came from
    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Identifier relative to the input root
    pub fn identifier(&self) -> &str {
        &self.source.identifier
    }

    /// Path on disk
    pub fn path(&self) -> &Path {
        &self.source.path
    }

    /// Category hint
    pub fn category(&self) -> Category {
        self.source.category
    }

    /// Raw byte content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Raw byte content, shareable with a blocking task without copying
    pub fn shared_content(&self) -> Arc<[u8]> {
        Arc::clone(&self.content)
    }
}

/// Which text recovery strategy produced a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStrategyKind {
    /// Page-by-page positioned extraction, suited to tabular content
    Layout,

    /// Sequential content-stream text extraction
    Sequential,

    /// Printable runs scanned out of the raw bytes
    PrintableScan,
}

impl TextStrategyKind {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TextStrategyKind::Layout => "layout",
            TextStrategyKind::Sequential => "sequential",
            TextStrategyKind::PrintableScan => "printable-scan",
        }
    }
}

/// Text recovered from a document
///
/// The text may be empty; absence of text is a valid downstream state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    /// Recovered text (possibly empty)
    pub text: String,

    /// Strategy that produced the text, `None` when nothing was recovered
    pub strategy: Option<TextStrategyKind>,
}

impl ExtractedText {
    /// Text produced by a given strategy
    pub fn new(text: String, strategy: TextStrategyKind) -> Self {
        Self {
            text,
            strategy: Some(strategy),
        }
    }

    /// No strategy recovered any text
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any text was recovered
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// First `max_chars` characters, with an ellipsis when truncated
    pub fn snippet(&self, max_chars: usize) -> String {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        let mut chars = trimmed.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}
