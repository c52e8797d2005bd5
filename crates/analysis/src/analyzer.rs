//! Single-backend answer analyzer.
//!
//! Wraps one LLM provider with the full evaluation pipeline: degenerate
//! short-circuit, rate limiting, prompt construction, bounded retry, JSON
//! extraction, and normalization. The `try_*` operations surface provider
//! errors for layering; the plain operations absorb them into mock scores.

use std::sync::Arc;

use tracing::{debug, warn};

use hirelens_core::{normalize, ScoreRecord};
use hirelens_llm::{
    extract_json, generate_with_retry, GenerationOptions, LlmError, LlmProvider, LlmResult,
    RateLimiter,
};

use crate::mock::{self, MockPolicy};
use crate::prompt::{Prompt, PromptBuilder};

/// One backend plus its limiter and fallback policy.
pub struct AnswerAnalyzer {
    provider: Arc<dyn LlmProvider>,
    limiter: RateLimiter,
    mock: MockPolicy,
}

impl AnswerAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>, mock: MockPolicy) -> Self {
        let limiter = RateLimiter::new(provider.config().max_requests_per_minute);
        Self {
            provider,
            limiter,
            mock,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Shared handle on the underlying backend, for components that send
    /// their own prompts (adaptive questions, window interpretation).
    pub fn provider(&self) -> Arc<dyn LlmProvider> {
        Arc::clone(&self.provider)
    }

    /// Evaluate a written answer, surfacing provider errors.
    pub async fn try_analyze_text(
        &self,
        question: &str,
        answer: &str,
        domain: &str,
    ) -> LlmResult<ScoreRecord> {
        self.run(PromptBuilder::text_prompt(question, answer, domain))
            .await
    }

    /// Evaluate a spoken-answer transcript, surfacing provider errors.
    pub async fn try_analyze_speech(&self, transcript: &str) -> LlmResult<ScoreRecord> {
        self.run(PromptBuilder::speech_prompt(transcript)).await
    }

    /// Evaluate a written answer, absorbing failures into mock scores.
    pub async fn analyze_text(&self, question: &str, answer: &str, domain: &str) -> ScoreRecord {
        match self.try_analyze_text(question, answer, domain).await {
            Ok(record) => record,
            Err(err) => self.degrade(err),
        }
    }

    /// Evaluate a transcript, absorbing failures into mock scores.
    pub async fn analyze_speech(&self, transcript: &str) -> ScoreRecord {
        match self.try_analyze_speech(transcript).await {
            Ok(record) => record,
            Err(err) => self.degrade(err),
        }
    }

    /// The record this analyzer falls back to when its backend is down.
    pub fn mock_record(&self) -> ScoreRecord {
        self.mock.record()
    }

    async fn run(&self, prompt: Prompt) -> LlmResult<ScoreRecord> {
        if prompt.degenerate {
            debug!(
                provider = self.provider.name(),
                "degenerate input, returning fixed rubric without a provider call"
            );
            return Ok(mock::degenerate_record());
        }

        self.limiter.acquire().await;
        let raw =
            generate_with_retry(self.provider.as_ref(), &prompt.text, &GenerationOptions::default())
                .await?;
        debug!(
            provider = self.provider.name(),
            bytes = raw.len(),
            "provider response received"
        );
        let parsed = extract_json(&raw).ok_or_else(|| LlmError::ParseError {
            message: "no JSON object in provider response".to_string(),
        })?;
        Ok(normalize(&parsed))
    }

    fn degrade(&self, err: LlmError) -> ScoreRecord {
        // Match on the failure class so logs distinguish dead keys from
        // garbage output.
        match &err {
            LlmError::QuotaExhausted { .. } => warn!(
                provider = self.provider.name(),
                "provider quota exhausted, using mock scores"
            ),
            LlmError::AuthenticationFailed { .. } => warn!(
                provider = self.provider.name(),
                "provider authentication failed, using mock scores"
            ),
            LlmError::ParseError { .. } => warn!(
                provider = self.provider.name(),
                "provider returned unusable output, using mock scores"
            ),
            _ => warn!(
                provider = self.provider.name(),
                error = %err,
                "provider call failed, using mock scores"
            ),
        }
        self.mock.record()
    }
}
