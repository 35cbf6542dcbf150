pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/match/upload", post(matching::handle_match_upload))
        // Saved documents
        .route(
            "/api/v1/documents",
            get(documents::handle_list_documents).post(documents::handle_save_document),
        )
        .route(
            "/api/v1/documents/:name",
            get(documents::handle_get_document).delete(documents::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:name/match",
            post(documents::handle_match_saved),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::documents::store::MemoryDocumentStore;

    fn test_app() -> Router {
        let state = AppState::new(Config::default(), Arc::new(MemoryDocumentStore::default()));
        build_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumatch-api");
    }

    #[tokio::test]
    async fn test_match_returns_score_and_missing_keywords() {
        let app = test_app();
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/match",
                json!({
                    "resume_text": "Rust engineer, Postgres and Kubernetes",
                    "job_text": "Rust engineer needed: Kafka, Postgres"
                }),
            ),
        )
        .await;

        // Job tokens: rust, engineer, needed, kafka, postgres → 3 of 5 covered.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchScore"], 60);
        assert_eq!(body["missingKeywords"], json!(["kafka", "needed"]));
    }

    #[tokio::test]
    async fn test_match_rejects_blank_input() {
        let app = test_app();
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/match",
                json!({ "resume_text": "   ", "job_text": "Java required" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            matching::MISSING_INPUT_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_match_job_with_only_stop_words_scores_zero() {
        let app = test_app();
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/match",
                json!({ "resume_text": "anything", "job_text": "to be or" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchScore"], 0);
        assert_eq!(body["missingKeywords"], json!([]));
    }

    #[tokio::test]
    async fn test_match_upload_with_text_resume() {
        let app = test_app();
        let boundary = "resumatch-boundary";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Rust engineer\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"job_text\"\r\n\r\n\
             Rust engineer wanted\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/match/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchScore"], 67);
        assert_eq!(body["missingKeywords"], json!(["wanted"]));
    }

    #[tokio::test]
    async fn test_match_upload_without_resume_part() {
        let app = test_app();
        let boundary = "resumatch-boundary";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"job_text\"\r\n\r\n\
             Rust engineer wanted\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/match/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_saved_document_lifecycle() {
        let app = test_app();

        let (status, saved) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents",
                json!({ "user_id": "ada@example.com", "content": "Rust and Python engineer" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["name"], "Resume 1");

        let (status, list) = send(
            &app,
            empty_request(Method::GET, "/api/v1/documents?user_id=ada@example.com"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["documents"].as_array().unwrap().len(), 1);
        assert_eq!(list["documents"][0]["name"], "Resume 1");

        let (status, loaded) = send(
            &app,
            empty_request(
                Method::GET,
                "/api/v1/documents/Resume%201?user_id=ada@example.com",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded["content"], "Rust and Python engineer");

        let (status, result) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents/Resume%201/match?user_id=ada@example.com",
                json!({ "job_text": "Python engineer with Django" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["matchScore"], 67);
        assert_eq!(result["missingKeywords"], json!(["django"]));

        let (status, _) = send(
            &app,
            empty_request(
                Method::DELETE,
                "/api/v1/documents/Resume%201?user_id=ada@example.com",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app,
            empty_request(
                Method::GET,
                "/api/v1/documents/Resume%201?user_id=ada@example.com",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_documents_are_scoped_to_user() {
        let app = test_app();

        send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents",
                json!({ "user_id": "ada", "name": "cv", "content": "Rust" }),
            ),
        )
        .await;

        let (status, list) =
            send(&app, empty_request(Method::GET, "/api/v1/documents?user_id=bob")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["documents"], json!([]));

        let (status, _) = send(
            &app,
            empty_request(Method::DELETE, "/api/v1/documents/cv?user_id=bob"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_rejects_blank_content_and_user() {
        let app = test_app();

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents",
                json!({ "user_id": "ada", "content": "  " }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "There's no resume content to save.");

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents",
                json!({ "user_id": " ", "content": "Rust" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "user_id is required");
    }

    #[tokio::test]
    async fn test_path_name_is_trimmed_like_saved_name() {
        let app = test_app();
        send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents",
                json!({ "user_id": "ada", "name": " cv ", "content": "Rust engineer" }),
            ),
        )
        .await;

        let (status, loaded) = send(
            &app,
            empty_request(Method::GET, "/api/v1/documents/%20cv%20?user_id=ada"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded["name"], "cv");

        let (status, result) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents/%20cv/match?user_id=ada",
                json!({ "job_text": "Rust engineer" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["matchScore"], 100);

        let (status, _) = send(
            &app,
            empty_request(Method::DELETE, "/api/v1/documents/cv%20?user_id=ada"),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let app = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/match")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"resume_text\": "))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_json_field_uses_error_envelope() {
        let app = test_app();
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/documents",
                json!({ "user_id": "ada" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("content"));
    }
}
