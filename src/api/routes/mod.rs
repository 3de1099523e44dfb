pub mod chat;
pub mod documents;
pub mod health;

use axum::http::{header, Method, StatusCode};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::request_logger;
use crate::api::state::AppState;
use crate::domain::DomainError;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.config.cors.allowed_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_v1_routes())
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat_handler))
        .route("/sessions/{session_id}/history", get(chat::get_history))
        .route("/documents", post(documents::create_document))
        .route("/documents/{id}", delete(documents::delete_document))
        .route("/documents/search", post(documents::search_documents))
}

pub(crate) fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        DomainError::Internal(_) | DomainError::Configuration(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::application::testing::{KeywordEmbedding, ScriptedChatModel};
    use crate::application::VectorStoreRetriever;
    use crate::infrastructure::{AppConfig, InMemoryVectorStore, RagChainBuilder};

    fn app(model: ScriptedChatModel) -> Router {
        let retriever = Arc::new(VectorStoreRetriever::new(
            Arc::new(KeywordEmbedding::new(&["return", "electronics"])),
            Arc::new(InMemoryVectorStore::new()),
            2,
        ));
        let chain = RagChainBuilder::with_model(retriever.clone(), Arc::new(model))
            .build_chain()
            .unwrap();
        create_router(AppState::new(chain, retriever, AppConfig::default()))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(ScriptedChatModel::echo());
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_ingest_then_chat_records_history() {
        let app = app(ScriptedChatModel::new(["Within 30 days."]));

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/documents",
            Some(json!({ "name": "policy", "content": "You can return items within 30 days." })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["chunks"], 1);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/chat",
            Some(json!({ "input": "What is the return policy?", "session_id": "u1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Within 30 days.");
        assert_eq!(body["session_id"], "u1");
        assert_eq!(body["context"][0]["source"], "policy");

        let (status, body) = send(&app, "GET", "/api/v1/sessions/u1/history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["turns"], 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Within 30 days.");
    }

    #[tokio::test]
    async fn test_chat_without_session_uses_default() {
        let app = app(ScriptedChatModel::echo());

        let (status, body) =
            send(&app, "POST", "/api/v1/chat", Some(json!({ "input": "hi" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session_id"], "user-session");
    }

    #[tokio::test]
    async fn test_unknown_session_history_is_not_found() {
        let app = app(ScriptedChatModel::echo());
        let (status, _) = send(&app, "GET", "/api/v1/sessions/nobody/history", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_bad_gateway() {
        let app = app(ScriptedChatModel::failing("rate limited"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/chat",
            Some(json!({ "input": "hi", "session_id": "s" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_search_documents() {
        let app = app(ScriptedChatModel::echo());
        send(
            &app,
            "POST",
            "/api/v1/documents",
            Some(json!({
                "name": "policy",
                "content": "Electronics have a 10 day window.\n\nOther items return in 30 days."
            })),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/documents/search",
            Some(json!({ "query": "electronics", "limit": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["source"], "policy");
        assert!(body[0]["content"]
            .as_str()
            .is_some_and(|c| c.starts_with("Electronics")));
    }
}
