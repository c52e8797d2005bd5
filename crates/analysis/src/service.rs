//! The analysis service boundary.
//!
//! One [`AnalysisService`] owns the configured backends and exposes the
//! public operations. Layering on every scoring path: primary backend,
//! then secondary, then mock scores. No operation here ever fails; the
//! worst outcome is a deterministic fallback record.

use std::sync::Arc;

use tracing::{info, warn};

use hirelens_core::{
    derive, feedback, AdaptiveQuestionRecord, ContentFeatures, ScoreRecord, VideoScoreRecord,
};
use hirelens_llm::{
    extract_json, generate_with_retry, GeminiProvider, GenerationOptions, GroqProvider,
    LlmError, LlmProvider, LlmResult, RateLimiter,
};

use crate::adaptive::{AdaptiveQuestionGenerator, ScoreSummary};
use crate::analyzer::AnswerAnalyzer;
use crate::mock::{self, MockPolicy};
use crate::prompt::PromptBuilder;
use crate::window::{score_window, WindowFeatures, WindowScores};

/// Transcripts shorter than this carry no evaluable speech at all.
const MIN_TRANSCRIPT_LEN: usize = 5;

pub struct AnalysisService {
    primary: AnswerAnalyzer,
    secondary: Option<AnswerAnalyzer>,
    adaptive: AdaptiveQuestionGenerator,
    window_provider: Option<Arc<dyn LlmProvider>>,
    window_limiter: RateLimiter,
}

impl AnalysisService {
    /// Assemble a service from pre-built analyzers. Adaptive questions and
    /// window interpretation reuse the primary backend.
    pub fn new(primary: AnswerAnalyzer, secondary: Option<AnswerAnalyzer>) -> Self {
        let provider = primary.provider();
        let max_per_minute = provider.config().max_requests_per_minute;
        let window_provider = provider.config().api_key.is_some().then(|| provider.clone());
        Self {
            adaptive: AdaptiveQuestionGenerator::new(
                provider.config().api_key.is_some().then(|| provider.clone()),
            ),
            window_limiter: RateLimiter::new(max_per_minute),
            window_provider,
            primary,
            secondary,
        }
    }

    /// Standard deployment wiring: Groq primary with the harsh fixed mock,
    /// Gemini secondary (when a key is present) with sampled mock scores.
    pub fn from_env() -> Self {
        let groq = GroqProvider::from_env();
        let gemini = GeminiProvider::from_env();
        let secondary = gemini.config().api_key.is_some().then(|| {
            AnswerAnalyzer::new(Arc::new(gemini), MockPolicy::sampled())
        });
        Self::new(
            AnswerAnalyzer::new(Arc::new(groq), MockPolicy::Fixed),
            secondary,
        )
    }

    /// Evaluate a written answer for a domain. Never fails.
    pub async fn analyze_text_answer(
        &self,
        question: &str,
        answer: &str,
        domain: &str,
    ) -> ScoreRecord {
        match self.primary.try_analyze_text(question, answer, domain).await {
            Ok(record) => record,
            Err(err) => {
                self.note_primary_failure(&err);
                if let Some(secondary) = &self.secondary {
                    match secondary.try_analyze_text(question, answer, domain).await {
                        Ok(record) => return record,
                        Err(err) => {
                            warn!(
                                provider = secondary.provider_name(),
                                error = %err,
                                "secondary backend failed, using mock scores"
                            );
                        }
                    }
                }
                self.primary.mock_record()
            }
        }
    }

    /// Evaluate a spoken-answer transcript. Never fails.
    pub async fn analyze_speech_answer(&self, transcript: &str) -> ScoreRecord {
        if transcript.trim().len() < MIN_TRANSCRIPT_LEN {
            info!("transcript too short to evaluate, returning fixed rubric");
            return mock::brief_transcript_record();
        }
        match self.primary.try_analyze_speech(transcript).await {
            Ok(record) => record,
            Err(err) => {
                self.note_primary_failure(&err);
                if let Some(secondary) = &self.secondary {
                    match secondary.try_analyze_speech(transcript).await {
                        Ok(record) => return record,
                        Err(err) => {
                            warn!(
                                provider = secondary.provider_name(),
                                error = %err,
                                "secondary backend failed, using mock scores"
                            );
                        }
                    }
                }
                self.primary.mock_record()
            }
        }
    }

    /// Evaluate a video answer. The frames themselves are never decoded;
    /// presence scores are derived from the transcript evaluation plus
    /// content features, so results are reproducible.
    pub async fn analyze_video_interview(
        &self,
        _video: &[u8],
        _question: &str,
        answer: &str,
    ) -> VideoScoreRecord {
        let scores = self.analyze_speech_answer(answer).await;
        let features = ContentFeatures::extract(answer);
        let video_scores = derive(Some(&features), &scores);
        let video_feedback = feedback(&video_scores);
        VideoScoreRecord {
            scores,
            eye_contact_score: video_scores.eye_contact_score,
            body_language_score: video_scores.body_language_score,
            distraction_score: video_scores.distraction_score,
            facial_expression_score: video_scores.facial_expression_score,
            posture_score: video_scores.posture_score,
            eye_contact: video_feedback.eye_contact,
            gestures: video_feedback.gestures,
            facial_expressions: video_feedback.facial_expressions,
            posture: video_feedback.posture,
        }
    }

    /// Choose the next interview question from the previous scores.
    pub async fn generate_adaptive_question(
        &self,
        previous_question: &str,
        user_answer: &str,
        scores: &ScoreSummary,
        weaknesses: &[String],
    ) -> AdaptiveQuestionRecord {
        self.adaptive
            .generate(previous_question, user_answer, scores, weaknesses)
            .await
    }

    /// Score one numeric capture window. The heuristic result stands on
    /// its own; when a backend is configured it may replace the notes and
    /// scores with a more humanlike interpretation.
    pub async fn analyze_video_window(
        &self,
        window_start: i64,
        window_end: i64,
        _fps: u32,
        features: &WindowFeatures,
    ) -> WindowScores {
        let heuristic = score_window(window_start, window_end, features);
        if let Some(provider) = &self.window_provider {
            match self
                .humanize_window(provider.as_ref(), window_start, window_end, features)
                .await
            {
                Ok(scores) => return scores,
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        error = %err,
                        "window interpretation failed, using heuristic scores"
                    );
                }
            }
        }
        heuristic
    }

    async fn humanize_window(
        &self,
        provider: &dyn LlmProvider,
        window_start: i64,
        window_end: i64,
        features: &WindowFeatures,
    ) -> LlmResult<WindowScores> {
        self.window_limiter.acquire().await;
        let prompt = PromptBuilder::window_prompt(
            window_start,
            window_end,
            &features.head_disp,
            &features.bbox_width,
            &features.avg_iris_x,
            features.blink_rate,
        );
        let raw = generate_with_retry(provider, &prompt, &GenerationOptions::default()).await?;
        let parsed = extract_json(&raw).ok_or_else(|| LlmError::ParseError {
            message: "no JSON object in window interpretation response".to_string(),
        })?;
        let mut scores: WindowScores =
            serde_json::from_value(parsed).map_err(|e| LlmError::ParseError {
                message: format!("malformed window interpretation: {}", e),
            })?;
        scores.eye_contact_score = scores.eye_contact_score.min(100);
        scores.head_stability_score = scores.head_stability_score.min(100);
        scores.posture_score = scores.posture_score.min(100);
        scores.confidence_score = scores.confidence_score.min(100);
        Ok(scores)
    }

    fn note_primary_failure(&self, err: &LlmError) {
        if err.is_quota() {
            warn!(
                provider = self.primary.provider_name(),
                "primary backend quota exhausted, falling back"
            );
        } else {
            warn!(
                provider = self.primary.provider_name(),
                error = %err,
                "primary backend failed, falling back"
            );
        }
    }
}
