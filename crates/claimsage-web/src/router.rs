//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{chat::chat, patents::{list_patents, patent_detail}, system::status};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/api/patents", get(list_patents))
        .route("/api/patents/{id}", get(patent_detail))
        .route("/api/chat", post(chat))
        .route("/api/status", get(status))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use claimsage_corpus::PatentCorpus;
    use claimsage_llm::{AnswerSynthesizer, GroqBackend, ModelChain};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let backend = Arc::new(GroqBackend::new(
            "http://127.0.0.1:9",
            "test-key",
            Duration::from_secs(1),
        ));
        let synthesizer = AnswerSynthesizer::new(backend, ModelChain::default_groq());
        build_router(AppState::new(PatentCorpus::empty(), synthesizer))
    }

    #[tokio::test]
    async fn test_status_always_answers() {
        let response = test_router()
            .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_corpus_listing_is_not_found() {
        let response = test_router()
            .oneshot(Request::get("/api/patents").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_patent_detail_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::get("/api/patents/EP0000000A0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_short_question_is_rejected_before_generation() {
        let body = r#"{"patentId": "EP3888777A1", "question": "ab"}"#;
        let response = test_router()
            .oneshot(
                Request::post("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_for_unknown_patent_is_not_found() {
        let body = r#"{"patentId": "EP0000000A0", "question": "What is the Si content?"}"#;
        let response = test_router()
            .oneshot(
                Request::post("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
