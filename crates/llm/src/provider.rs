//! LLM Provider Trait
//!
//! Defines the common interface for all LLM providers, plus the shared
//! HTTP-error mapping and the bounded retry wrapper.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::types::{GenerationOptions, LlmError, LlmResult, ProviderConfig};

/// Maximum attempts per logical request, first try included.
const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles per attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Trait that all LLM providers must implement.
///
/// Provides a unified interface for:
/// - Plain text generation (generate)
/// - Health checking
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;

    /// Send a prompt and return the raw completion text.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> LlmResult<String>;

    /// Check if the provider is healthy and reachable.
    ///
    /// For API providers this validates the API key.
    async fn health_check(&self) -> LlmResult<()>;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::QuotaExhausted {
            message: body.to_string(),
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Call `generate` with bounded exponential backoff on transient failures.
///
/// Only network and 5xx errors are retried; quota, auth, and parse errors
/// surface immediately so callers can degrade to another backend instead
/// of burning more quota on a dead key.
pub async fn generate_with_retry(
    provider: &dyn LlmProvider,
    prompt: &str,
    options: &GenerationOptions,
) -> LlmResult<String> {
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 1;
    loop {
        match provider.generate(prompt, options).await {
            Ok(text) => return Ok(text),
            Err(err) if err.is_transient() && attempt < MAX_ATTEMPTS => {
                warn!(
                    provider = provider.name(),
                    attempt,
                    error = %err,
                    "transient provider failure, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
