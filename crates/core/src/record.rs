//! Canonical evaluation records shared across the workspace.
//!
//! Every analysis operation produces one of these records. They are
//! request-scoped values: built fresh per call, serialized to the caller,
//! never persisted.

use serde::{Deserialize, Serialize};

/// A recommended learning resource attached to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub description: String,
}

impl Resource {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The canonical seven-dimension evaluation of one interview answer.
///
/// Numeric fields are integers in `[0, 100]` and list fields are non-empty
/// once a record has passed through [`crate::normalize::normalize`]. Code
/// that fabricates records directly (mocks, fixed rubrics) upholds the same
/// bounds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub technical_accuracy: u8,
    pub clarity_structure: u8,
    pub depth_of_knowledge: u8,
    pub communication: u8,
    pub confidence: u8,
    pub reasoning: u8,
    pub emotion: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub recommended_resources: Vec<Resource>,
}

impl ScoreRecord {
    /// Mean of the seven numeric dimensions, useful for quick ranking.
    pub fn overall(&self) -> f64 {
        let total = self.technical_accuracy as u32
            + self.clarity_structure as u32
            + self.depth_of_knowledge as u32
            + self.communication as u32
            + self.confidence as u32
            + self.reasoning as u32
            + self.emotion as u32;
        total as f64 / 7.0
    }
}

/// A [`ScoreRecord`] extended with presence scores and qualitative feedback
/// for a video answer. Serializes flat so callers see one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoScoreRecord {
    #[serde(flatten)]
    pub scores: ScoreRecord,
    pub eye_contact_score: u8,
    pub body_language_score: u8,
    pub distraction_score: u8,
    pub facial_expression_score: u8,
    pub posture_score: u8,
    pub eye_contact: String,
    pub gestures: String,
    pub facial_expressions: String,
    pub posture: String,
}

/// How the previous answer was judged when choosing a follow-up question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Strong,
    Medium,
    Weak,
    Confused,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Strong => "strong",
            QuestionCategory::Medium => "medium",
            QuestionCategory::Weak => "weak",
            QuestionCategory::Confused => "confused",
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interviewer strategy for the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowupAction {
    DeepDrill,
    AskClarification,
    SimplifyAndProbe,
    ModerateFollowup,
    ChallengeMisconception,
    ValidateThenProbe,
}

impl FollowupAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowupAction::DeepDrill => "deep_drill",
            FollowupAction::AskClarification => "ask_clarification",
            FollowupAction::SimplifyAndProbe => "simplify_and_probe",
            FollowupAction::ModerateFollowup => "moderate_followup",
            FollowupAction::ChallengeMisconception => "challenge_misconception",
            FollowupAction::ValidateThenProbe => "validate_then_probe",
        }
    }
}

impl std::fmt::Display for FollowupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chosen follow-up question plus the judgement that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveQuestionRecord {
    pub category: QuestionCategory,
    pub action: FollowupAction,
    pub next_question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_value(QuestionCategory::Confused).unwrap();
        assert_eq!(json, serde_json::json!("confused"));
    }

    #[test]
    fn action_round_trips_snake_case() {
        let json = serde_json::json!("challenge_misconception");
        let action: FollowupAction = serde_json::from_value(json).unwrap();
        assert_eq!(action, FollowupAction::ChallengeMisconception);
        assert_eq!(action.to_string(), "challenge_misconception");
    }

    #[test]
    fn video_record_serializes_flat() {
        let record = VideoScoreRecord {
            scores: ScoreRecord {
                technical_accuracy: 80,
                clarity_structure: 70,
                depth_of_knowledge: 75,
                communication: 90,
                confidence: 80,
                reasoning: 72,
                emotion: 60,
                strengths: vec!["Clear delivery".into()],
                improvements: vec!["Add depth".into()],
                suggestions: vec!["Use examples".into()],
                recommended_resources: vec![Resource::new("Guide", "A guide")],
            },
            eye_contact_score: 80,
            body_language_score: 83,
            distraction_score: 25,
            facial_expression_score: 68,
            posture_score: 84,
            eye_contact: "Good".into(),
            gestures: "Natural".into(),
            facial_expressions: "Engaged".into(),
            posture: "Professional".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["technical_accuracy"], 80);
        assert_eq!(json["eye_contact_score"], 80);
        assert!(json.get("scores").is_none());
    }

    #[test]
    fn overall_is_mean_of_seven_dimensions() {
        let record = ScoreRecord {
            technical_accuracy: 70,
            clarity_structure: 70,
            depth_of_knowledge: 70,
            communication: 70,
            confidence: 70,
            reasoning: 70,
            emotion: 70,
            strengths: vec!["s".into()],
            improvements: vec!["i".into()],
            suggestions: vec!["g".into()],
            recommended_resources: vec![Resource::new("t", "d")],
        };
        assert!((record.overall() - 70.0).abs() < f64::EPSILON);
    }
}
