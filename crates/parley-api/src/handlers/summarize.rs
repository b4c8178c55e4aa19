use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use parley_core::normalize_key_terms;
use parley_llm::{ChatMessage, CompletionOptions, CompletionRequest, KEY_TERMS_PROMPT, SUMMARY_PROMPT};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    pub key_terms: Vec<String>,
}

/// Turn a conversation blob into `{ summary, keyTerms }`.
///
/// Two provider calls: one extracting 3-5 comma-separated key terms (which
/// are normalized into tags here, at the point of generation), one producing
/// a 1-2 sentence summary. Provider failures surface as 500; no retries.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> ApiResult<Json<SummarizeResponse>> {
    let terms_response = state
        .llm
        .complete(completion_for(&state, KEY_TERMS_PROMPT, &req.text))
        .await
        .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;
    let key_terms = normalize_key_terms(&terms_response.content);

    let summary_response = state
        .llm
        .complete(completion_for(&state, SUMMARY_PROMPT, &req.text))
        .await
        .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;

    Ok(Json(SummarizeResponse {
        summary: summary_response.content.trim().to_string(),
        key_terms,
    }))
}

fn completion_for(state: &AppState, instruction: &str, text: &str) -> CompletionRequest {
    CompletionRequest::new(
        state.config.llm.model.as_str(),
        vec![
            ChatMessage::system(instruction),
            ChatMessage::user(text),
        ],
    )
    .with_options(CompletionOptions::new().temperature(state.config.llm.temperature))
}
