use bfhl_service::config::{BfhlConfig, OpenAiConfig, DEFAULT_FIBONACCI_MAX_TERMS};
use bfhl_service::services::metrics;
use bfhl_service::services::providers::TextProvider;
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const TEST_EMAIL: &str = "student@example.edu";

pub fn test_config() -> BfhlConfig {
    BfhlConfig {
        common: CoreConfig {
            port: 0, // Random port
            ..CoreConfig::default()
        },
        official_email: TEST_EMAIL.to_string(),
        fibonacci_max_terms: DEFAULT_FIBONACCI_MAX_TERMS,
        openai: OpenAiConfig::default(),
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the app with a mock provider that answers `"Mock"`.
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Arc::new(MockTextProvider::new(true))).await
    }

    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        metrics::init_metrics();

        let app = Application::build_with_provider(test_config(), provider)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }

    pub async fn post_bfhl(&self, body: &serde_json::Value) -> (u16, serde_json::Value) {
        let response = self
            .client
            .post(format!("{}/bfhl", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request");

        let status = response.status().as_u16();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }
}
