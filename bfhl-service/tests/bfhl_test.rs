mod common;

use bfhl_service::services::providers::mock::MockTextProvider;
use common::{TestApp, TEST_EMAIL};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

async fn assert_ok(app: &TestApp, body: serde_json::Value, expected: serde_json::Value) {
    let (status, response) = app.post_bfhl(&body).await;
    assert_eq!(status, 200, "request {body}");
    assert_eq!(
        response,
        json!({"is_success": true, "official_email": TEST_EMAIL, "data": expected})
    );
}

async fn assert_rejected(app: &TestApp, body: serde_json::Value, message: &str) {
    let (status, response) = app.post_bfhl(&body).await;
    assert_eq!(status, 400, "request {body}");
    assert_eq!(
        response,
        json!({"is_success": false, "official_email": TEST_EMAIL, "error": message})
    );
}

#[tokio::test]
async fn fibonacci_returns_sequence() {
    let app = TestApp::spawn().await;
    assert_ok(&app, json!({"fibonacci": 5}), json!([0, 1, 1, 2, 3])).await;
    assert_ok(&app, json!({"fibonacci": 0}), json!([])).await;
    assert_ok(&app, json!({"fibonacci": 1}), json!([0])).await;
}

#[tokio::test]
async fn fibonacci_rejects_bad_counts() {
    let app = TestApp::spawn().await;
    for body in [
        json!({"fibonacci": -1}),
        json!({"fibonacci": 2.5}),
        json!({"fibonacci": "5"}),
        json!({"fibonacci": 10_001}),
    ] {
        assert_rejected(&app, body, "Invalid fibonacci input").await;
    }
}

#[tokio::test]
async fn fibonacci_terms_past_u64_are_exact_json_numbers() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/bfhl", app.address))
        .json(&json!({"fibonacci": 95}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let text = response.text().await.expect("Failed to read body");
    assert!(text.ends_with(",12200160415121876738,19740274219868223167]}"), "{text}");
}

#[tokio::test]
async fn prime_filters_input() {
    let app = TestApp::spawn().await;
    assert_ok(&app, json!({"prime": [2, 3, 4, 5, 9]}), json!([2, 3, 5])).await;
    assert_ok(&app, json!({"prime": []}), json!([])).await;
    assert_rejected(&app, json!({"prime": 7}), "Prime input must be an array").await;
}

#[tokio::test]
async fn lcm_and_hcf() {
    let app = TestApp::spawn().await;
    assert_ok(&app, json!({"lcm": [4, 6]}), json!(12)).await;
    assert_ok(&app, json!({"hcf": [12, 18]}), json!(6)).await;
    assert_ok(&app, json!({"hcf": [-12, 18]}), json!(6)).await;

    assert_rejected(&app, json!({"lcm": []}), "LCM input must be a non-empty array").await;
    assert_rejected(&app, json!({"hcf": []}), "HCF input must be a non-empty array").await;
    assert_rejected(&app, json!({"hcf": [4, "x"]}), "HCF input must be a non-empty array").await;
    assert_rejected(&app, json!({"lcm": [0, 0]}), "LCM is undefined for the given input").await;
    assert_rejected(
        &app,
        json!({"hcf": [i64::MIN, 0]}),
        "HCF is out of range for the given input",
    )
    .await;
}

#[tokio::test]
async fn health_stays_responsive_during_slow_prime_request() {
    let app = TestApp::spawn().await;

    // The largest 15-digit prime: every copy costs millions of trial divisions.
    let slow = json!({"prime": vec![999_999_999_999_989_i64; 60]});
    let client = app.client.clone();
    let url = format!("{}/bfhl", app.address);
    let in_flight = tokio::spawn(async move {
        client
            .post(url)
            .json(&slow)
            .send()
            .await
            .map(|response| response.status().as_u16())
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let health = tokio::time::timeout(
        Duration::from_millis(500),
        app.client.get(format!("{}/health", app.address)).send(),
    )
    .await
    .expect("/health blocked behind the prime request")
    .expect("Failed to execute request");

    assert_eq!(health.status().as_u16(), 200);
    assert!(!in_flight.is_finished());
    assert_eq!(in_flight.await.unwrap().unwrap(), 200);
}

#[tokio::test]
async fn ai_answers_with_one_word() {
    let provider = Arc::new(MockTextProvider::answering("Paris, of course."));
    let app = TestApp::spawn_with_provider(provider.clone()).await;

    assert_ok(&app, json!({"AI": "What is the capital of France?"}), json!("Paris")).await;
    assert_eq!(provider.prompts(), vec!["What is the capital of France?"]);
}

#[tokio::test]
async fn ai_input_must_be_a_string() {
    let app = TestApp::spawn().await;
    assert_rejected(&app, json!({"AI": 42}), "AI input must be a string").await;
    assert_rejected(&app, json!({"AI": ""}), "AI input must be a string").await;
}

#[tokio::test]
async fn provider_failure_is_opaque_500() {
    let app = TestApp::spawn_with_provider(Arc::new(MockTextProvider::new(false))).await;

    let (status, response) = app.post_bfhl(&json!({"AI": "Anything?"})).await;
    assert_eq!(status, 500);
    assert_eq!(
        response,
        json!({
            "is_success": false,
            "official_email": TEST_EMAIL,
            "error": "Internal Server Error"
        })
    );
}

#[tokio::test]
async fn key_count_and_names_are_validated() {
    let app = TestApp::spawn().await;
    assert_rejected(&app, json!({}), "Exactly one input key is required").await;
    assert_rejected(
        &app,
        json!({"fibonacci": 3, "prime": [2]}),
        "Exactly one input key is required",
    )
    .await;
    assert_rejected(&app, json!({"factorial": 5}), "Invalid input key").await;
    assert_rejected(&app, json!({"ai": "lowercase key"}), "Invalid input key").await;
}

#[tokio::test]
async fn body_must_be_a_json_object() {
    let app = TestApp::spawn().await;
    assert_rejected(&app, json!([1, 2, 3]), "Request body must be a JSON object").await;

    let response = app
        .client
        .post(format!("{}/bfhl", app.address))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_success"], false);
    assert_eq!(body["error"], "Invalid JSON body");
    assert_eq!(body["official_email"], TEST_EMAIL);
}

#[tokio::test]
async fn success_and_failure_envelopes_are_exclusive() {
    let app = TestApp::spawn().await;

    let (_, ok) = app.post_bfhl(&json!({"hcf": [9]})).await;
    assert!(ok.get("data").is_some());
    assert!(ok.get("error").is_none());

    let (_, failed) = app.post_bfhl(&json!({"hcf": 9})).await;
    assert!(failed.get("data").is_none());
    assert!(failed.get("error").is_some());
}
