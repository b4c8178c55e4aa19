use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use parley_llm::{ChatMessage, CompletionOptions, CompletionRequest, Role, DEFAULT_SYSTEM_PROMPT};
use parley_persist::MessageRole;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub message: String,
}

/// Forward a message list to the completion provider and persist the reply.
///
/// Validation happens before any provider or store call: `messages` must be
/// a JSON array and `conversation_id` a string. A default system message is
/// injected when the list carries none; the injected prompt is never
/// persisted. Upstream failures surface as 500 with nothing persisted.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ChatResponseBody>> {
    let messages_value = body
        .get("messages")
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("messages is required".to_string()))?;
    if !messages_value.is_array() {
        return Err(ApiError::BadRequest(
            "messages must be an array".to_string(),
        ));
    }

    let conversation_id = body
        .get("conversation_id")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("conversation_id is required".to_string()))?
        .to_string();

    let mut messages: Vec<ChatMessage> = serde_json::from_value(messages_value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid message list: {e}")))?;

    if !messages.iter().any(|m| m.role == Role::System) {
        messages.insert(0, ChatMessage::system(DEFAULT_SYSTEM_PROMPT));
    }

    let request = CompletionRequest::new(state.config.llm.model.as_str(), messages).with_options(
        CompletionOptions::new().temperature(state.config.llm.temperature),
    );

    let response = state
        .llm
        .complete(request)
        .await
        .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;

    state
        .store
        .insert_message(&conversation_id, MessageRole::Assistant, &response.content)
        .await?;

    Ok(Json(ChatResponseBody {
        message: response.content,
    }))
}
