//! HireLens LLM
//!
//! Provides a unified interface for the LLM backends used to evaluate
//! interview answers:
//! - Groq (OpenAI-compatible chat completions, primary)
//! - Gemini (generateContent, secondary)
//!
//! Also includes the HTTP client factory, client-side rate limiting,
//! bounded retry, and JSON extraction from raw completion text.

pub mod extract;
pub mod gemini;
pub mod groq;
pub mod http_client;
pub mod provider;
pub mod rate_limit;
pub mod types;

// Re-export main types
pub use extract::extract_json;
pub use gemini::{GeminiProvider, GEMINI_DEFAULT_MODEL};
pub use groq::{GroqProvider, GROQ_DEFAULT_MODEL};
pub use http_client::build_http_client;
pub use provider::{generate_with_retry, missing_api_key_error, parse_http_error, LlmProvider};
pub use rate_limit::RateLimiter;
pub use types::*;
