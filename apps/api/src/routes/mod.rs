pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/resume/analyze", post(handlers::handle_analyze))
        .route("/api/v1/resume/upload", post(handlers::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::orchestrator::ResumeExtractor;
    use crate::extraction::patterns::{default_name_templates, DEFAULT_SKILLS};

    const BOUNDARY: &str = "X-RESUME-BOUNDARY";

    fn test_state() -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
                name_templates: default_name_templates(),
                max_upload_bytes: 1024 * 1024,
            },
            extractor: Arc::new(ResumeExtractor::default()),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload(file_name: &str, content_type: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_skills_returns_default_vocabulary() {
        let request = Request::get("/api/v1/skills").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"].as_array().unwrap().len(), DEFAULT_SKILLS.len());
        assert_eq!(body["skills"][0], "Python");
    }

    #[tokio::test]
    async fn test_analyze_with_request_vocabulary() {
        let request = json_post(
            "/api/v1/resume/analyze",
            json!({
                "text": "Jane Doe\nPython and SQL developer, jane@example.com",
                "skills": ["Python", "SQL", "Docker"]
            }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(body["email"], "jane@example.com");
        assert_eq!(body["skills"], json!(["Python", "SQL"]));
        assert_eq!(body["remaining_skills"], json!(["Docker"]));
        let score = body["score"].as_f64().unwrap();
        assert!((score - 66.67).abs() < 0.01, "Score was {score}");
        assert_eq!(body["score_display"], "66.67%");
        assert_eq!(body["facts"][0], json!({"kind": "person_name", "value": "Jane Doe"}));
        assert_eq!(body["facts"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_analyze_empty_vocabulary_is_400() {
        let request = json_post(
            "/api/v1/resume/analyze",
            json!({"text": "anything", "skills": []}),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_upload_plain_text() {
        let (status, body) = send(upload(
            "cv.txt",
            "text/plain",
            "Jane Doe\nReach me at (415) 555-2671. Docker and AWS.",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contact_number"], "(415) 555-2671");
        assert_eq!(body["skills"], json!(["AWS", "Docker"]));
    }

    #[tokio::test]
    async fn test_upload_unsupported_format_is_415() {
        let (status, body) = send(upload("photo.png", "image/png", "not a resume")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_upload_broken_pdf_is_422() {
        let (status, body) = send(upload("cv.pdf", "application/pdf", "garbage")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "DOCUMENT_DECODE_ERROR");
    }
}
