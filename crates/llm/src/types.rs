//! Shared types for the LLM provider layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to an LLM backend.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Quota exhausted: {message}")]
    QuotaExhausted { message: String },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String, status: Option<u16> },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl LlmError {
    /// Transient failures are worth retrying. Everything else fails fast:
    /// quota, auth, and malformed-response errors do not fix themselves.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::NetworkError { .. } | LlmError::ServerError { .. }
        )
    }

    /// Quota errors signal that callers should switch backends rather than
    /// hammer the same key.
    pub fn is_quota(&self) -> bool {
        matches!(self, LlmError::QuotaExhausted { .. })
    }
}

pub type LlmResult<T> = Result<T, LlmError>;

/// Configuration shared by all providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key. `None` means the provider is not configured.
    pub api_key: Option<String>,
    /// Model identifier sent with each request.
    pub model: String,
    /// Override for the default API endpoint.
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Generation cap per request.
    pub max_tokens: u32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Client-side rolling-window request cap.
    pub max_requests_per_minute: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: String::new(),
            base_url: None,
            temperature: 0.2,
            max_tokens: 1000,
            timeout_secs: 15,
            max_requests_per_minute: 30,
        }
    }
}

/// Per-request overrides applied on top of [`ProviderConfig`].
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub temperature_override: Option<f32>,
    pub max_tokens_override: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(LlmError::NetworkError {
            message: "timeout".into()
        }
        .is_transient());
        assert!(LlmError::ServerError {
            message: "bad gateway".into(),
            status: Some(502)
        }
        .is_transient());
        assert!(!LlmError::QuotaExhausted {
            message: "out of tokens".into()
        }
        .is_transient());
        assert!(!LlmError::ParseError {
            message: "not json".into()
        }
        .is_transient());
    }

    #[test]
    fn quota_classification() {
        assert!(LlmError::QuotaExhausted {
            message: "429".into()
        }
        .is_quota());
        assert!(!LlmError::NetworkError {
            message: "refused".into()
        }
        .is_quota());
    }
}
