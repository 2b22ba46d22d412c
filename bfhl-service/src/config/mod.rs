use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;
use validator::Validate;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FIBONACCI_MAX_TERMS: usize = 10_000;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone, Validate)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    /// Contact address echoed in every response envelope.
    #[validate(email(message = "OFFICIAL_EMAIL must be a valid email address"))]
    pub official_email: String,
    /// Largest accepted `fibonacci` count. Bounds response size and CPU per request.
    #[validate(range(min = 1, message = "FIBONACCI_MAX_TERMS must be at least 1"))]
    pub fibonacci_max_terms: usize,
    #[validate(nested)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Validate)]
pub struct OpenAiConfig {
    /// `None` outside production selects the mock provider.
    pub api_key: Option<Secret<String>>,
    #[validate(url(message = "OPENAI_BASE_URL must be a valid URL"))]
    pub base_url: String,
    #[validate(length(min = 1, message = "OPENAI_MODEL cannot be empty"))]
    pub model: String,
    #[validate(range(min = 1, message = "OPENAI_MAX_TOKENS must be at least 1"))]
    pub max_tokens: u32,
    #[validate(range(min = 1, message = "OPENAI_TIMEOUT_SECS must be at least 1"))]
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BfhlConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(Secret::new(key)),
            _ if is_prod => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "OPENAI_API_KEY is required in production but not set"
                )));
            }
            _ => None,
        };

        let config = BfhlConfig {
            common: common_config,
            official_email: get_env("OFFICIAL_EMAIL", None)?,
            fibonacci_max_terms: parse_env("FIBONACCI_MAX_TERMS", DEFAULT_FIBONACCI_MAX_TERMS)?,
            openai: OpenAiConfig {
                api_key,
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL))?,
                model: get_env("OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL))?,
                max_tokens: parse_env("OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
                timeout_secs: parse_env("OPENAI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}
