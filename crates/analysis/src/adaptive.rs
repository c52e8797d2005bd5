//! Adaptive follow-up question selection.
//!
//! The provider is asked first for a context-specific question; if it is
//! unavailable or returns something unusable, a deterministic rule table
//! picks a templated question from the previous scores instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use hirelens_core::{AdaptiveQuestionRecord, FollowupAction, QuestionCategory};
use hirelens_llm::{
    extract_json, generate_with_retry, GenerationOptions, LlmError, LlmProvider, LlmResult,
    RateLimiter,
};

use crate::prompt::PromptBuilder;

fn default_dimension() -> u8 {
    50
}

/// The score dimensions the selection logic looks at. Callers usually have
/// a full evaluation record; partial payloads deserialize with 50 filled in
/// for anything missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreSummary {
    #[serde(default = "default_dimension")]
    pub technical_accuracy: u8,
    #[serde(default = "default_dimension")]
    pub clarity_structure: u8,
    #[serde(default = "default_dimension")]
    pub depth_of_knowledge: u8,
    #[serde(default = "default_dimension")]
    pub communication: u8,
    #[serde(default = "default_dimension")]
    pub confidence: u8,
    #[serde(default = "default_dimension")]
    pub reasoning: u8,
}

impl Default for ScoreSummary {
    fn default() -> Self {
        Self {
            technical_accuracy: 50,
            clarity_structure: 50,
            depth_of_knowledge: 50,
            communication: 50,
            confidence: 50,
            reasoning: 50,
        }
    }
}

impl From<&hirelens_core::ScoreRecord> for ScoreSummary {
    fn from(record: &hirelens_core::ScoreRecord) -> Self {
        Self {
            technical_accuracy: record.technical_accuracy,
            clarity_structure: record.clarity_structure,
            depth_of_knowledge: record.depth_of_knowledge,
            communication: record.communication,
            confidence: record.confidence,
            reasoning: record.reasoning,
        }
    }
}

/// Chooses the next interview question from the previous answer's scores.
pub struct AdaptiveQuestionGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    limiter: RateLimiter,
}

impl AdaptiveQuestionGenerator {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        let max_per_minute = provider
            .as_ref()
            .map(|p| p.config().max_requests_per_minute)
            .unwrap_or(1);
        Self {
            provider,
            limiter: RateLimiter::new(max_per_minute),
        }
    }

    /// Pick the follow-up question. Never fails: provider trouble degrades
    /// to the rule table, which always produces a record.
    pub async fn generate(
        &self,
        previous_question: &str,
        user_answer: &str,
        scores: &ScoreSummary,
        weaknesses: &[String],
    ) -> AdaptiveQuestionRecord {
        if let Some(provider) = &self.provider {
            match self
                .try_provider(provider.as_ref(), previous_question, user_answer, scores, weaknesses)
                .await
            {
                Ok(record) => return record,
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        error = %err,
                        "adaptive question generation failed, using rule table"
                    );
                }
            }
        }
        rule_table(previous_question, scores)
    }

    async fn try_provider(
        &self,
        provider: &dyn LlmProvider,
        previous_question: &str,
        user_answer: &str,
        scores: &ScoreSummary,
        weaknesses: &[String],
    ) -> LlmResult<AdaptiveQuestionRecord> {
        self.limiter.acquire().await;
        let prompt =
            PromptBuilder::adaptive_prompt(previous_question, user_answer, scores, weaknesses);
        let raw = generate_with_retry(provider, &prompt, &GenerationOptions::default()).await?;
        let parsed = extract_json(&raw).ok_or_else(|| LlmError::ParseError {
            message: "no JSON object in adaptive question response".to_string(),
        })?;
        parse_record(&parsed).ok_or_else(|| LlmError::ParseError {
            message: "adaptive question response missing required fields".to_string(),
        })
    }
}

/// Validate a provider payload into a typed record. Unknown category or
/// action strings fail here and fall through to the rule table.
fn parse_record(value: &Value) -> Option<AdaptiveQuestionRecord> {
    let category: QuestionCategory =
        serde_json::from_value(value.get("category")?.clone()).ok()?;
    let action: FollowupAction = serde_json::from_value(value.get("action")?.clone()).ok()?;
    let next_question = value.get("next_question")?.as_str()?.trim();
    if next_question.is_empty() {
        return None;
    }
    Some(AdaptiveQuestionRecord {
        category,
        action,
        next_question: next_question.to_string(),
    })
}

/// Deterministic first-match selection over the score summary.
pub fn rule_table(previous_question: &str, scores: &ScoreSummary) -> AdaptiveQuestionRecord {
    let technical = scores.technical_accuracy as f64;
    let clarity = scores.clarity_structure as f64;
    let depth = scores.depth_of_knowledge as f64;
    let communication = scores.communication as f64;
    let confidence = scores.confidence as f64;
    let reasoning = scores.reasoning as f64;

    let avg = (technical + reasoning + depth) / 3.0;

    let (category, action, next_question) =
        if avg >= 85.0 && technical >= 80.0 && reasoning >= 80.0 {
            (
                QuestionCategory::Strong,
                FollowupAction::DeepDrill,
                format!(
                    "You demonstrated strong knowledge about '{previous_question}'. Let's explore a practical application. How would you implement a solution to handle the specific challenges you mentioned in a production environment?"
                ),
            )
        } else if avg >= 70.0 && (clarity < 60.0 || communication < 60.0) {
            (
                QuestionCategory::Medium,
                FollowupAction::AskClarification,
                format!(
                    "I can see you understand the concepts related to '{previous_question}'. Let's work on communication. Can you explain the key points you mentioned using an analogy that a non-technical person could understand?"
                ),
            )
        } else if avg < 50.0 && (technical < 50.0 || reasoning < 50.0) {
            (
                QuestionCategory::Weak,
                FollowupAction::SimplifyAndProbe,
                format!(
                    "Let's strengthen your foundation on '{previous_question}'. What are the three most important principles someone should understand before diving deeper into this topic?"
                ),
            )
        } else if depth < 50.0 {
            (
                QuestionCategory::Medium,
                FollowupAction::ModerateFollowup,
                format!(
                    "You covered the basics of '{previous_question}'. Now let's dig deeper. What are some edge cases or limitations of the approach you described, and how would you address them?"
                ),
            )
        } else if confidence >= 80.0 && (technical < 60.0 || reasoning < 60.0) {
            (
                QuestionCategory::Confused,
                FollowupAction::ChallengeMisconception,
                format!(
                    "I'd like to challenge your thinking on '{previous_question}'. Can you walk me through your reasoning step by step and identify where you might have made assumptions?"
                ),
            )
        } else {
            (
                QuestionCategory::Medium,
                FollowupAction::ValidateThenProbe,
                format!(
                    "Your response on '{previous_question}' showed good understanding. Now, how would you adapt your approach if you had to meet a tight deadline with limited resources?"
                ),
            )
        };

    AdaptiveQuestionRecord {
        category,
        action,
        next_question,
    }
}

/// Generic fallback question when nothing else is available.
pub fn default_record() -> AdaptiveQuestionRecord {
    AdaptiveQuestionRecord {
        category: QuestionCategory::Medium,
        action: FollowupAction::ModerateFollowup,
        next_question: "Can you tell me more about your experience with this topic?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(
        technical: u8,
        clarity: u8,
        depth: u8,
        communication: u8,
        confidence: u8,
        reasoning: u8,
    ) -> ScoreSummary {
        ScoreSummary {
            technical_accuracy: technical,
            clarity_structure: clarity,
            depth_of_knowledge: depth,
            communication,
            confidence,
            reasoning,
        }
    }

    #[test]
    fn partial_payload_fills_missing_dimensions_with_fifty() {
        let parsed: ScoreSummary =
            serde_json::from_value(json!({"technical_accuracy": 90})).unwrap();
        assert_eq!(parsed.technical_accuracy, 90);
        assert_eq!(parsed.clarity_structure, 50);
        assert_eq!(parsed.reasoning, 50);
    }

    #[test]
    fn strong_candidate_gets_deep_drill() {
        let record = rule_table("What is REST?", &summary(90, 70, 88, 70, 70, 85));
        assert_eq!(record.category, QuestionCategory::Strong);
        assert_eq!(record.action, FollowupAction::DeepDrill);
        assert!(record.next_question.contains("What is REST?"));
    }

    #[test]
    fn good_knowledge_poor_communication_gets_clarification() {
        let record = rule_table("Explain indexing.", &summary(80, 55, 75, 58, 70, 75));
        assert_eq!(record.category, QuestionCategory::Medium);
        assert_eq!(record.action, FollowupAction::AskClarification);
    }

    #[test]
    fn weak_candidate_gets_simplified_probe() {
        let record = rule_table("Explain joins.", &summary(40, 50, 45, 50, 50, 42));
        assert_eq!(record.category, QuestionCategory::Weak);
        assert_eq!(record.action, FollowupAction::SimplifyAndProbe);
    }

    #[test]
    fn shallow_depth_gets_moderate_followup() {
        let record = rule_table("Explain caching.", &summary(70, 70, 45, 70, 60, 70));
        assert_eq!(record.action, FollowupAction::ModerateFollowup);
    }

    #[test]
    fn overconfident_but_wrong_gets_challenged() {
        let record = rule_table("Explain TCP.", &summary(55, 70, 60, 70, 85, 58));
        assert_eq!(record.category, QuestionCategory::Confused);
        assert_eq!(record.action, FollowupAction::ChallengeMisconception);
    }

    #[test]
    fn balanced_performance_gets_validated_then_probed() {
        let record = rule_table("Explain DNS.", &summary(70, 70, 70, 70, 70, 70));
        assert_eq!(record.action, FollowupAction::ValidateThenProbe);
    }

    #[test]
    fn parse_record_rejects_unknown_category() {
        let value = json!({
            "category": "heroic",
            "action": "deep_drill",
            "next_question": "How would you scale it?",
        });
        assert!(parse_record(&value).is_none());
    }

    #[test]
    fn parse_record_rejects_blank_question() {
        let value = json!({
            "category": "strong",
            "action": "deep_drill",
            "next_question": "   ",
        });
        assert!(parse_record(&value).is_none());
    }

    #[test]
    fn parse_record_accepts_valid_payload() {
        let value = json!({
            "category": "confused",
            "action": "challenge_misconception",
            "next_question": "Where does your assumption break down?",
        });
        let record = parse_record(&value).unwrap();
        assert_eq!(record.category, QuestionCategory::Confused);
        assert_eq!(record.action, FollowupAction::ChallengeMisconception);
    }
}
