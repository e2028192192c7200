//! Question-answering endpoint.

use axum::extract::{Json as JsonBody, State};
use axum::response::Json;
use chrono::{DateTime, Utc};
use claimsage_common::records::{Answer, Citation};
use claimsage_common::ClaimsageError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiError;
use crate::state::SharedState;

const MIN_QUESTION_CHARS: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub patent_id: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub patent_number: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn chat(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let question = validate_question(&request.question)?;
    let record = state
        .corpus
        .get(&request.patent_id)
        .ok_or_else(|| ClaimsageError::PatentNotFound(request.patent_id.clone()))?;

    info!(patent = %record.patent_number, "answering question");
    let Answer { answer, citations } = state.synthesizer.answer(&record, question).await?;

    Ok(Json(ChatResponse {
        answer,
        citations,
        patent_number: record.patent_number.clone(),
        model: state.synthesizer.current_model().to_string(),
        timestamp: Utc::now(),
    }))
}

fn validate_question(raw: &str) -> Result<&str, ClaimsageError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_QUESTION_CHARS {
        return Err(ClaimsageError::InvalidQuestion(
            "question must be at least 3 characters".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_questions_are_rejected() {
        assert!(validate_question("ab").is_err());
        assert!(validate_question("  a  ").is_err());
        assert!(validate_question("").is_err());
    }

    #[test]
    fn test_valid_question_is_trimmed() {
        assert_eq!(
            validate_question("  What is the Si content?  ").unwrap(),
            "What is the Si content?"
        );
    }
}
