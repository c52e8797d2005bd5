//! HireLens Core
//!
//! Canonical data model and deterministic derivations for the HireLens
//! workspace. This crate has zero dependencies on provider or transport
//! code (HTTP clients, LLM backends, async runtime).
//!
//! ## Module Organization
//!
//! - `record` - Canonical evaluation records (`ScoreRecord`, `VideoScoreRecord`, `AdaptiveQuestionRecord`)
//! - `normalize` - Strict coercion of provider JSON into canonical records
//! - `features` - Content-feature counters extracted from answer text
//! - `video` - Video-presence score derivation and qualitative feedback
//!
//! ## Design Principles
//!
//! 1. **Everything here is deterministic** - same input, same record, no I/O
//! 2. **Normalization never fails** - malformed provider output degrades to defaults
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod features;
pub mod normalize;
pub mod record;
pub mod video;

// ── Canonical Records ──────────────────────────────────────────────────
pub use record::{
    AdaptiveQuestionRecord, FollowupAction, QuestionCategory, Resource, ScoreRecord,
    VideoScoreRecord,
};

// ── Normalization ──────────────────────────────────────────────────────
pub use normalize::{clamp_score, normalize, DEFAULT_SCORE, NUMERIC_FIELDS};

// ── Content Features ───────────────────────────────────────────────────
pub use features::ContentFeatures;

// ── Video Derivation ───────────────────────────────────────────────────
pub use video::{derive, derive_linear, feedback, VideoFeedback, VideoScores};
