//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Gemini
//! generateContent API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{GenerationOptions, LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default Gemini API base (model name and method are appended per request)
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default Gemini model
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(Duration::from_secs(config.timeout_secs));
        Self { config, client }
    }

    /// Create a provider configured from the `GEMINI_API_KEY` environment
    /// variable.
    pub fn from_env() -> Self {
        Self::new(ProviderConfig {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
            ..Default::default()
        })
    }

    /// Full URL for the generateContent call
    fn generate_url(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE);
        format!("{}/{}:generateContent", base, self.config.model)
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> serde_json::Value {
        serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": options
                    .temperature_override
                    .unwrap_or(self.config.temperature),
                "maxOutputTokens": options
                    .max_tokens_override
                    .unwrap_or(self.config.max_tokens),
            },
        })
    }

    /// Extract the completion text from a parsed response
    fn parse_response(&self, response: &GeminiResponse) -> LlmResult<String> {
        let text: String = response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            Err(LlmError::ParseError {
                message: "Gemini response contained no completion text".to_string(),
            })
        } else {
            Ok(text)
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
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
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let body = self.build_request_body(prompt, options);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
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
            // Gemini reports free-tier exhaustion with a descriptive body
            // even on non-429 statuses.
            if body_text.contains("RESOURCE_EXHAUSTED") {
                return Err(LlmError::QuotaExhausted { message: body_text });
            }
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(&gemini_response)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        // List models to verify API key
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE);
        let response = self
            .client
            .get(base)
            .header("x-goog-api-key", api_key)
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
            Err(parse_http_error(status, &body, "gemini"))
        }
    }
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            api_key: Some("AIza-test".to_string()),
            model: GEMINI_DEFAULT_MODEL.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::new(test_config());
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-2.5-pro");
    }

    #[test]
    fn test_generate_url() {
        let provider = GeminiProvider::new(test_config());
        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body() {
        let provider = GeminiProvider::new(test_config());
        let body = provider.build_request_body("Evaluate this answer", &GenerationOptions::default());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Evaluate this answer");
        assert!(
            (body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let provider = GeminiProvider::new(test_config());
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(provider.parse_response(&response).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let provider = GeminiProvider::new(test_config());
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            provider.parse_response(&response),
            Err(LlmError::ParseError { .. })
        ));
    }
}
