use axum::http::StatusCode;
use thiserror::Error;

use super::operation::OperationKind;
use crate::services::math::MathError;
use crate::services::providers::ProviderError;

/// Message returned for every failure that is not the caller's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Everything that can go wrong while serving `POST /bfhl`.
#[derive(Debug, Error)]
pub enum BfhlError {
    #[error("Exactly one input key is required")]
    ExactlyOneKey,

    #[error("Invalid input key: {0}")]
    UnknownOperation(String),

    #[error("Invalid {0} input shape")]
    Shape(OperationKind),

    #[error("Arithmetic domain error: {0}")]
    ArithmeticDomain(#[from] MathError),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("Request body is not a JSON object")]
    NotAnObject,

    #[error("AI provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("Computation task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("Failed to encode result: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl BfhlError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BfhlError::Provider(_) | BfhlError::Worker(_) | BfhlError::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// The message placed in the envelope. Never carries provider detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            BfhlError::ExactlyOneKey => "Exactly one input key is required",
            BfhlError::UnknownOperation(_) => "Invalid input key",
            BfhlError::Shape(kind) => kind.shape_message(),
            BfhlError::ArithmeticDomain(MathError::HcfOverflow) => {
                "HCF is out of range for the given input"
            }
            BfhlError::ArithmeticDomain(_) => "LCM is undefined for the given input",
            BfhlError::MalformedBody(_) => "Invalid JSON body",
            BfhlError::NotAnObject => "Request body must be a JSON object",
            BfhlError::Provider(_) | BfhlError::Worker(_) | BfhlError::Encoding(_) => {
                INTERNAL_ERROR_MESSAGE
            }
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BfhlError::ExactlyOneKey | BfhlError::UnknownOperation(_) => "unknown_operation",
            BfhlError::Shape(_) => "shape",
            BfhlError::MalformedBody(_) | BfhlError::NotAnObject => "malformed_body",
            BfhlError::ArithmeticDomain(_) => "arithmetic_domain",
            BfhlError::Provider(_) => "provider",
            BfhlError::Worker(_) | BfhlError::Encoding(_) => "internal",
        }
    }
}
