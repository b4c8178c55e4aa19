use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::ChatBackend;

/// Summary text shown (and persisted) when summarization fails.
pub const FALLBACK_SUMMARY: &str = "Failed to generate summary";

/// Derived summary + key terms for a block of conversation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub key_terms: Vec<String>,
}

impl SummaryResult {
    /// Sentinel result so callers can proceed without special-casing errors.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            key_terms: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.summary == FALLBACK_SUMMARY && self.key_terms.is_empty()
    }
}

/// Normalize raw model output into search-friendly tags.
///
/// Splits on commas and newlines, trims whitespace and surrounding
/// punctuation, lowercases, drops empties and full-sentence strays, dedupes
/// preserving order, and caps the list at five terms.
pub fn normalize_key_terms(raw: &str) -> Vec<String> {
    let mut terms = Vec::new();

    for token in raw.split(|c| c == ',' || c == '\n') {
        let term = token
            .trim()
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .trim()
            .to_lowercase();

        if term.is_empty() {
            continue;
        }
        // A key term is one or two words, not a sentence
        if term.split_whitespace().count() > 3 {
            continue;
        }
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    terms.truncate(5);
    terms
}

/// Wraps the relay's summarization endpoint; never fails.
///
/// On any failure (network, malformed response) the caller gets
/// [`SummaryResult::fallback`] so the context-update step can proceed.
pub struct SummaryService {
    backend: Arc<dyn ChatBackend>,
}

impl SummaryService {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn summarize(&self, text: &str) -> SummaryResult {
        // Rough estimate (1 token ~ 4 characters), diagnostics only
        let estimated_tokens = text.len() / 4;
        debug!(estimated_tokens, "requesting conversation summary");

        match self.backend.summarize(text).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Summarization failed, using fallback: {e:#}");
                SummaryResult::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        let terms = normalize_key_terms(" Rust , Async Programming ,  MONGODB ");
        assert_eq!(terms, vec!["rust", "async programming", "mongodb"]);
    }

    #[test]
    fn normalize_splits_on_newlines_and_strips_punctuation() {
        let terms = normalize_key_terms("- ethics.\n- \"ai safety\"\n- alignment!");
        assert_eq!(terms, vec!["ethics", "ai safety", "alignment"]);
    }

    #[test]
    fn normalize_drops_sentences_and_dedupes() {
        let terms = normalize_key_terms(
            "rust, rust, here is a whole sentence about the topic, tooling",
        );
        assert_eq!(terms, vec!["rust", "tooling"]);
    }

    #[test]
    fn normalize_caps_at_five() {
        let terms = normalize_key_terms("a, b, c, d, e, f, g");
        assert_eq!(terms.len(), 5);
    }

    #[test]
    fn fallback_is_recognizable() {
        assert!(SummaryResult::fallback().is_fallback());
        let real = SummaryResult {
            summary: "something".into(),
            key_terms: vec!["tag".into()],
        };
        assert!(!real.is_fallback());
    }
}
