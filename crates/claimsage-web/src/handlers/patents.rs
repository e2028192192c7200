//! Patent listing and detail endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use claimsage_common::records::PatentRecord;
use claimsage_common::ClaimsageError;
use serde_json::{json, Value};

use super::ApiError;
use crate::state::SharedState;

pub async fn list_patents(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    if state.corpus.is_empty() {
        return Err(ClaimsageError::PatentNotFound(
            "no patents loaded; run the structuring pass first".to_string(),
        )
        .into());
    }
    Ok(Json(json!({
        "count": state.corpus.len(),
        "patents": state.corpus.summaries(),
    })))
}

pub async fn patent_detail(
    State(state): State<SharedState>,
    Path(patent_id): Path<String>,
) -> Result<Json<PatentRecord>, ApiError> {
    let record = state
        .corpus
        .get(&patent_id)
        .ok_or_else(|| ClaimsageError::PatentNotFound(patent_id))?;
    Ok(Json((*record).clone()))
}
