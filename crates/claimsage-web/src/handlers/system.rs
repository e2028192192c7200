//! Service status endpoint.

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn status(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "patents": state.corpus.len(),
        "model": state.synthesizer.current_model(),
    }))
}
