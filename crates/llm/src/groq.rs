//! Groq Provider
//!
//! Implementation of the LlmProvider trait for Groq's OpenAI-compatible
//! chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{GenerationOptions, LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default Groq API endpoint
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Models listing endpoint, used for health checks
const GROQ_MODELS_URL: &str = "https://api.groq.com/openai/v1/models";

/// Default Groq model
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Groq provider
pub struct GroqProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GroqProvider {
    /// Create a new Groq provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(Duration::from_secs(config.timeout_secs));
        Self { config, client }
    }

    /// Create a provider configured from the `GROQ_API_KEY` environment
    /// variable. A low temperature keeps scoring output close to the
    /// requested JSON schema.
    pub fn from_env() -> Self {
        Self::new(ProviderConfig {
            api_key: std::env::var("GROQ_API_KEY").ok(),
            model: GROQ_DEFAULT_MODEL.to_string(),
            temperature: 0.15,
            ..Default::default()
        })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GROQ_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": options
                .temperature_override
                .unwrap_or(self.config.temperature),
            "max_tokens": options
                .max_tokens_override
                .unwrap_or(self.config.max_tokens),
        })
    }

    /// Extract the completion text from a parsed response
    fn parse_response(&self, response: &GroqResponse) -> LlmResult<String> {
        response
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.clone())
            .ok_or_else(|| LlmError::ParseError {
                message: "Groq response contained no completion text".to_string(),
            })
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> LlmResult<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("groq"))?;

        let body = self.build_request_body(prompt, options);

        let response = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "groq"));
        }

        let groq_response: GroqResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(&groq_response)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("groq"))?;

        // List models to verify API key
        let response = self
            .client
            .get(GROQ_MODELS_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 200 {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(parse_http_error(status, &body, "groq"))
        }
    }
}

/// Groq API response format (OpenAI-compatible)
#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            api_key: Some("gsk-test".to_string()),
            model: GROQ_DEFAULT_MODEL.to_string(),
            temperature: 0.15,
            ..Default::default()
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = GroqProvider::new(test_config());
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_request_body() {
        let provider = GroqProvider::new(test_config());
        let body = provider.build_request_body("Evaluate this answer", &GenerationOptions::default());
        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Evaluate this answer");
        assert!((body["temperature"].as_f64().unwrap() - 0.15).abs() < 1e-6);
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_request_body_overrides() {
        let provider = GroqProvider::new(test_config());
        let options = GenerationOptions {
            temperature_override: Some(0.5),
            max_tokens_override: Some(256),
        };
        let body = provider.build_request_body("hi", &options);
        assert!((body["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_parse_response() {
        let provider = GroqProvider::new(test_config());
        let response: GroqResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "{\"confidence\": 80}"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            provider.parse_response(&response).unwrap(),
            "{\"confidence\": 80}"
        );
    }

    #[test]
    fn test_parse_response_without_content() {
        let provider = GroqProvider::new(test_config());
        let response: GroqResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            provider.parse_response(&response),
            Err(LlmError::ParseError { .. })
        ));
    }
}
