mod common;

use std::sync::Arc;

use common::FakeBackend;
use parley_core::summary::{SummaryResult, SummaryService};

#[tokio::test]
async fn summarize_passes_through_backend_result() {
    let backend = Arc::new(FakeBackend::new());
    let service = SummaryService::new(backend.clone());

    let result = service.summarize("user text\n\nassistant text").await;

    assert_eq!(result.summary, "a short summary");
    assert_eq!(result.key_terms, vec!["alpha", "beta"]);
    assert_eq!(*backend.summarize_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn summarize_never_fails_and_falls_back_on_error() {
    let backend = Arc::new(FakeBackend::new().failing_summarize());
    let service = SummaryService::new(backend);

    let result = service.summarize("some conversation").await;

    assert!(result.is_fallback());
    assert_eq!(result.summary, "Failed to generate summary");
    assert!(result.key_terms.is_empty());
}

#[tokio::test]
async fn summarize_handles_empty_input() {
    let backend = Arc::new(FakeBackend::new());
    let service = SummaryService::new(backend);

    let result = service.summarize("").await;

    // The service itself never gates on input size
    assert_eq!(
        result,
        SummaryResult {
            summary: "a short summary".to_string(),
            key_terms: vec!["alpha".to_string(), "beta".to_string()],
        }
    );
}
