//! Application startup and lifecycle management.

use crate::config::BfhlConfig;
use crate::handlers;
use crate::middleware::metrics_middleware;
use crate::models::{Envelope, INTERNAL_ERROR_MESSAGE};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::openai::OpenAiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::{Dispatcher, OneWordAnswerer};
use axum::{
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BfhlConfig>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: BfhlConfig, provider: Arc<dyn TextProvider>) -> Self {
        let answerer = OneWordAnswerer::new(provider, config.openai.max_tokens);
        let dispatcher = Dispatcher::new(answerer, config.fibonacci_max_terms);
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    pub fn official_email(&self) -> &str {
        &self.config.official_email
    }
}

/// Pick the completion provider for this process.
///
/// Without an API key (only allowed outside production) the mock answers.
pub fn text_provider(config: &BfhlConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    if config.openai.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, using mock AI provider");
        return Ok(Arc::new(MockTextProvider::new(true)));
    }

    let provider = OpenAiTextProvider::new(&config.openai)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

    tracing::info!(
        model = %config.openai.model,
        base_url = %config.openai.base_url,
        "Initialized OpenAI text provider"
    );

    Ok(Arc::new(provider))
}

/// Build the HTTP router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let official_email: Arc<str> = Arc::from(state.official_email());
    let panic_handler = move |_: Box<dyn Any + Send + 'static>| -> Response {
        tracing::error!("Request handler panicked");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::failure(official_email.as_ref(), INTERNAL_ERROR_MESSAGE)),
        )
            .into_response()
    };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/bfhl", post(handlers::bfhl))
        // Panic catcher stays inside the metrics layer.
        .route_layer(CatchPanicLayer::custom(panic_handler))
        .route_layer(from_fn(metrics_middleware))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the provider chosen from configuration.
    pub async fn build(config: BfhlConfig) -> Result<Self, AppError> {
        let provider = text_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an explicit provider.
    pub async fn build_with_provider(
        config: BfhlConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            provider = provider.name(),
            "bfhl service listening"
        );

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, provider),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
