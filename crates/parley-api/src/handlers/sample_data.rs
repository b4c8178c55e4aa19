use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use parley_persist::seed_sample_data;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SampleDataResponse {
    pub message: String,
}

/// Idempotent seed endpoint: no-ops when any conversation already exists.
pub async fn sample_data(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SampleDataResponse>> {
    let report = seed_sample_data(state.store.as_ref()).await?;

    let message = if report.seeded {
        format!("Seeded {} sample conversations", report.conversations)
    } else {
        "Sample data already present".to_string()
    };

    Ok(Json(SampleDataResponse { message }))
}
