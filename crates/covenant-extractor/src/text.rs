//! Text Extraction Adapter
//!
//! Recovers plain text from raw document bytes with an ordered strategy
//! ladder. Each strategy either yields non-empty text or nothing; errors and
//! panics inside a strategy are absorbed and the next strategy is tried.

use covenant_domain::{ExtractedText, TextStrategyKind};
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Multi-strategy text recovery
#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    min_printable_run: usize,
}

impl TextExtractor {
    /// Create an extractor keeping printable runs of at least `min_printable_run` bytes
    pub fn new(min_printable_run: usize) -> Self {
        Self {
            min_printable_run: min_printable_run.max(1),
        }
    }

    /// Recover text from `content`; never fails, may return empty text
    pub fn extract(&self, content: &[u8]) -> ExtractedText {
        if content.is_empty() {
            return ExtractedText::empty();
        }

        let ladder = [
            TextStrategyKind::Layout,
            TextStrategyKind::Sequential,
            TextStrategyKind::PrintableScan,
        ];

        for kind in ladder {
            let recovered = match kind {
                TextStrategyKind::Layout => layout_text(content),
                TextStrategyKind::Sequential => sequential_text(content),
                TextStrategyKind::PrintableScan => self.printable_scan(content),
            };
            match recovered {
                Some(text) if !text.trim().is_empty() => {
                    debug!(strategy = kind.as_str(), chars = text.len(), "Recovered text");
                    return ExtractedText::new(text.trim().to_string(), kind);
                }
                _ => debug!(strategy = kind.as_str(), "Strategy produced no text"),
            }
        }

        ExtractedText::empty()
    }

    /// Printable runs of the raw bytes, joined with single spaces
    fn printable_scan(&self, content: &[u8]) -> Option<String> {
        let mut runs: Vec<&str> = Vec::new();
        let mut start = None;

        for (i, byte) in content.iter().enumerate() {
            let printable = byte.is_ascii_alphanumeric() || byte.is_ascii_whitespace() || *byte == 0x0b;
            match (printable, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    self.keep_run(&content[s..i], &mut runs);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            self.keep_run(&content[s..], &mut runs);
        }

        if runs.is_empty() {
            None
        } else {
            Some(runs.join(" "))
        }
    }

    fn keep_run<'a>(&self, run: &'a [u8], runs: &mut Vec<&'a str>) {
        if run.len() < self.min_printable_run || !run.iter().any(|b| b.is_ascii_alphanumeric()) {
            return;
        }
        // Only ASCII bytes reach here
        if let Ok(s) = std::str::from_utf8(run) {
            runs.push(s);
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Page-by-page positioned extraction
fn layout_text(content: &[u8]) -> Option<String> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(content)
    }))
    .ok()?
    .ok()?;

    let text = pages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Some(text)
}

/// Sequential content-stream extraction
fn sequential_text(content: &[u8]) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let doc = lopdf::Document::load_mem(content).ok()?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return None;
        }
        doc.extract_text(&pages).ok()
    }))
    .ok()
    .flatten()
}
