//! HireLens Analysis
//!
//! The interview-answer evaluation pipeline: prompt construction,
//! single-backend analyzers, layered fallback across backends, adaptive
//! follow-up question selection, and numeric video-window scoring.
//!
//! ## Module Organization
//!
//! - `prompt` - Prompt construction and degenerate-input detection
//! - `analyzer` - One backend wrapped with the full evaluation pipeline
//! - `mock` - Fixed and sampled fallback records
//! - `adaptive` - Follow-up question selection (provider plus rule table)
//! - `window` - Heuristic scoring of numeric capture windows
//! - `service` - The public service boundary with layered fallback

pub mod adaptive;
pub mod analyzer;
pub mod mock;
pub mod prompt;
pub mod service;
pub mod window;

// ── Service Boundary ───────────────────────────────────────────────────
pub use service::AnalysisService;

// ── Analyzer & Fallback ────────────────────────────────────────────────
pub use analyzer::AnswerAnalyzer;
pub use mock::{brief_transcript_record, degenerate_record, fixed_low_record, MockPolicy};

// ── Prompts ────────────────────────────────────────────────────────────
pub use prompt::{is_degenerate, Prompt, PromptBuilder};

// ── Adaptive Questions ─────────────────────────────────────────────────
pub use adaptive::{default_record, rule_table, AdaptiveQuestionGenerator, ScoreSummary};

// ── Video Windows ──────────────────────────────────────────────────────
pub use window::{score_window, WindowFeatures, WindowScores};
