use serde::Serialize;
use serde_json::Value;

/// The uniform response body: `data` on success, `error` on failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Success without a payload, as returned by the health probe.
    pub fn ok(official_email: impl Into<String>) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: None,
            error: None,
        }
    }

    pub fn success(official_email: impl Into<String>, data: Value) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(official_email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}
