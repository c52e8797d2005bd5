//! Video-presence score derivation.
//!
//! No actual video frames are inspected here. Presence scores are derived
//! deterministically from the speech evaluation, optionally adjusted by
//! content features, so the same transcript always yields the same scores.

use serde::{Deserialize, Serialize};

use crate::features::ContentFeatures;
use crate::record::ScoreRecord;

/// The five derived presence scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoScores {
    pub eye_contact_score: u8,
    pub body_language_score: u8,
    pub distraction_score: u8,
    pub facial_expression_score: u8,
    pub posture_score: u8,
}

/// Canned qualitative feedback matching the derived scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFeedback {
    pub eye_contact: String,
    pub gestures: String,
    pub facial_expressions: String,
    pub posture: String,
}

fn blend(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Derive presence scores from a speech evaluation.
///
/// With `features` present, each blend gets small bonuses or penalties for
/// fluency, confident language, complexity, emotional range, and sentence
/// structure. Without features the result is the pure linear blend.
pub fn derive(features: Option<&ContentFeatures>, scores: &ScoreRecord) -> VideoScores {
    let confidence = scores.confidence as f64;
    let clarity = scores.clarity_structure as f64;
    let communication = scores.communication as f64;
    let technical = scores.technical_accuracy as f64;
    let emotion = scores.emotion as f64;

    let mut eye = confidence * 0.4 + clarity * 0.3 + communication * 0.3;
    let mut body = confidence * 0.4 + communication * 0.4 + technical * 0.2;
    let mut focus = clarity * 0.4 + technical * 0.3 + confidence * 0.3;
    let mut facial = emotion * 0.6 + confidence * 0.4;
    let mut posture = confidence * 0.6 + communication * 0.4;

    if let Some(f) = features {
        let word_count = f.word_count as f64;
        let hesitation = f.hesitation_markers as f64;

        if f.word_count > 50 && hesitation < word_count * 0.05 {
            eye += 10.0;
        } else if hesitation > word_count * 0.1 {
            eye -= 15.0;
        }

        if f.confidence_indicators > 3 {
            body += 10.0;
        } else if f.confidence_indicators == 0 {
            body -= 10.0;
        }
        if f.complexity_score > 70 {
            body += 5.0;
        }

        let hesitation_ratio = hesitation / word_count.max(1.0);
        if hesitation_ratio > 0.1 {
            focus -= 20.0;
        } else if hesitation_ratio < 0.02 {
            focus += 10.0;
        }

        // A ~5% share of emotional words is the expected baseline.
        let emotional_ratio = f.emotional_indicators as f64 / (word_count * 0.05).max(1.0);
        if emotional_ratio > 1.5 {
            facial += 15.0;
        } else if emotional_ratio < 0.5 {
            facial -= 10.0;
        }

        let avg_sentence_length = word_count / (f.sentence_count as f64).max(1.0);
        if (10.0..=25.0).contains(&avg_sentence_length) {
            posture += 10.0;
        } else if avg_sentence_length > 30.0 {
            posture -= 10.0;
        }
    }

    VideoScores {
        eye_contact_score: blend(eye),
        body_language_score: blend(body),
        distraction_score: blend(100.0 - focus),
        facial_expression_score: blend(facial),
        posture_score: blend(posture),
    }
}

/// Pure linear blend used when no content features are available at all,
/// with slightly different weights favoring delivery over structure.
pub fn derive_linear(scores: &ScoreRecord) -> VideoScores {
    let confidence = scores.confidence as f64;
    let clarity = scores.clarity_structure as f64;
    let communication = scores.communication as f64;
    let reasoning = scores.reasoning as f64;
    let emotion = scores.emotion as f64;

    VideoScores {
        eye_contact_score: blend(confidence * 0.4 + clarity * 0.3 + communication * 0.3),
        body_language_score: blend(confidence * 0.5 + communication * 0.5),
        distraction_score: blend(
            100.0 - (clarity * 0.4 + reasoning * 0.3 + confidence * 0.3),
        ),
        facial_expression_score: blend(emotion * 0.6 + confidence * 0.4),
        posture_score: blend(confidence * 0.7 + communication * 0.3),
    }
}

/// Tiered qualitative feedback for the derived scores.
pub fn feedback(scores: &VideoScores) -> VideoFeedback {
    let eye_contact = if scores.eye_contact_score > 80 {
        "Maintained excellent eye contact throughout the response, showing confidence and engagement"
    } else if scores.eye_contact_score > 60 {
        "Good eye contact with occasional moments of looking away"
    } else {
        "Could improve eye contact to appear more confident and engaged"
    };

    let gestures = if scores.body_language_score > 80 {
        "Used natural gestures effectively to emphasize key points"
    } else if scores.body_language_score > 60 {
        "Some good gestures, but could use more natural body language"
    } else {
        "Limited body language; incorporating more gestures would enhance communication"
    };

    let facial_expressions = if scores.facial_expression_score > 80 {
        "Expressive facial movements that matched the emotional content of the response"
    } else if scores.facial_expression_score > 60 {
        "Generally good expressions with room for more emotional variety"
    } else {
        "Facial expressions could be more varied to better match the content"
    };

    let posture = if scores.posture_score > 80 {
        "Maintained strong, confident posture throughout the response"
    } else if scores.posture_score > 60 {
        "Good posture with minor slouching at times"
    } else {
        "Posture appeared somewhat slouched; sitting up straighter would convey more confidence"
    };

    VideoFeedback {
        eye_contact: eye_contact.to_string(),
        gestures: gestures.to_string(),
        facial_expressions: facial_expressions.to_string(),
        posture: posture.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Resource;

    fn record(
        technical: u8,
        clarity: u8,
        communication: u8,
        confidence: u8,
        reasoning: u8,
        emotion: u8,
    ) -> ScoreRecord {
        ScoreRecord {
            technical_accuracy: technical,
            clarity_structure: clarity,
            depth_of_knowledge: 70,
            communication,
            confidence,
            reasoning,
            emotion,
            strengths: vec!["s".into()],
            improvements: vec!["i".into()],
            suggestions: vec!["g".into()],
            recommended_resources: vec![Resource::new("t", "d")],
        }
    }

    #[test]
    fn derive_without_features_is_pure_blend() {
        let scores = record(75, 70, 90, 80, 72, 60);
        let video = derive(None, &scores);
        assert_eq!(video.eye_contact_score, 80);
        assert_eq!(video.body_language_score, 83);
        assert_eq!(video.posture_score, 84);
    }

    #[test]
    fn derive_is_deterministic() {
        let scores = record(75, 70, 90, 80, 72, 60);
        let features = ContentFeatures::extract(
            "I definitely delivered a scalable REST API and proven backend improvements. \
             The rollout was successful and the team was proud of the achievement.",
        );
        let first = derive(Some(&features), &scores);
        let second = derive(Some(&features), &scores);
        assert_eq!(first, second);
    }

    #[test]
    fn heavy_hesitation_lowers_eye_contact_and_focus() {
        let scores = record(70, 70, 70, 70, 70, 70);
        let fluent = derive(None, &scores);
        let features = ContentFeatures::extract(
            "Um, uh, like, basically, actually, you know, er, I mean, really, totally it works.",
        );
        let hesitant = derive(Some(&features), &scores);
        assert!(hesitant.eye_contact_score < fluent.eye_contact_score);
        assert!(hesitant.distraction_score > fluent.distraction_score);
    }

    #[test]
    fn linear_blend_uses_reasoning_for_distraction() {
        let scores = record(75, 80, 90, 80, 40, 60);
        let video = derive_linear(&scores);
        // 100 - (0.4*80 + 0.3*40 + 0.3*80) = 100 - 68
        assert_eq!(video.distraction_score, 32);
        assert_eq!(video.body_language_score, 85);
        assert_eq!(video.posture_score, 83);
    }

    #[test]
    fn feedback_tiers_follow_thresholds() {
        let high = feedback(&VideoScores {
            eye_contact_score: 90,
            body_language_score: 85,
            distraction_score: 10,
            facial_expression_score: 82,
            posture_score: 88,
        });
        assert!(high.eye_contact.contains("excellent eye contact"));
        assert!(high.posture.contains("strong, confident posture"));

        let low = feedback(&VideoScores {
            eye_contact_score: 40,
            body_language_score: 55,
            distraction_score: 70,
            facial_expression_score: 30,
            posture_score: 20,
        });
        assert!(low.eye_contact.contains("Could improve eye contact"));
        assert!(low.gestures.contains("Limited body language"));
    }
}
