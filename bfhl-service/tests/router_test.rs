use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use bfhl_service::config::{BfhlConfig, OpenAiConfig, DEFAULT_FIBONACCI_MAX_TERMS};
use bfhl_service::services::metrics;
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::services::providers::{
    GenerationParams, ProviderError, ProviderResponse, TextProvider,
};
use bfhl_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::ServiceExt;

struct PanickingProvider;

#[async_trait::async_trait]
impl TextProvider for PanickingProvider {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn complete(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        panic!("provider blew up")
    }
}

fn router_with(provider: Arc<dyn TextProvider>) -> axum::Router {
    let config = BfhlConfig {
        common: CoreConfig::default(),
        official_email: "router@example.org".to_string(),
        fibonacci_max_terms: DEFAULT_FIBONACCI_MAX_TERMS,
        openai: OpenAiConfig::default(),
    };
    build_router(AppState::new(config, provider))
}

fn router() -> axum::Router {
    router_with(Arc::new(MockTextProvider::answering("Blue")))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn bfhl_runs_ai_through_router() {
    let response = router()
        .oneshot(
            Request::post("/bfhl")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"AI": "Colour of the sky?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"is_success": true, "official_email": "router@example.org", "data": "Blue"})
    );
}

#[tokio::test]
async fn missing_content_type_is_malformed_body() {
    let response = router()
        .oneshot(
            Request::post("/bfhl")
                .body(Body::from(r#"{"fibonacci": 3}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid JSON body");
}

#[tokio::test]
async fn get_on_bfhl_is_not_allowed() {
    let response = router()
        .oneshot(Request::get("/bfhl").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_preflight_is_permitted() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/bfhl")
                .header(header::ORIGIN, "https://frontend.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn request_id_is_generated() {
    let response = router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let request_id = response.headers().get("x-request-id").unwrap();
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn panics_become_counted_500_envelopes() {
    metrics::init_metrics();

    let response = router_with(Arc::new(PanickingProvider))
        .oneshot(
            Request::post("/bfhl")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"AI": "Will this work?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({
            "is_success": false,
            "official_email": "router@example.org",
            "error": "Internal Server Error"
        })
    );

    let exposition = metrics::get_metrics();
    assert!(
        exposition.lines().any(|line| line.starts_with("http_requests_total")
            && line.contains(r#"path="/bfhl""#)
            && line.contains(r#"status="500""#)),
        "{exposition}"
    );
}
