//! Deterministic content-feature extraction from answer text.
//!
//! These counters feed the feature-aware video score deriver and are cheap
//! enough to run on every request. All matching happens on a lowercased
//! copy of the answer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SENTENCE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));

static TECHNICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(api|rest|graphql|database|algorithm|framework|library|sdk)\b",
        r"\b(machine learning|neural network|deep learning|artificial intelligence)\b",
        r"\b(frontend|backend|fullstack|devops|cloud|microservice)\b",
        r"\b(sql|nosql|docker|kubernetes|aws|azure|gcp)\b",
        r"\b(agile|scrum|kanban|waterfall|ci/cd)\b",
    ])
});

static EMOTIONAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(excited|passionate|enthusiastic|love|enjoy)\b",
        r"\b(challenging|difficult|struggle|hard|complex)\b",
        r"\b(proud|accomplished|successful|achievement)\b",
        r"\b(learned|discovered|realized|understood)\b",
    ])
});

static HESITATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(um|uh|er|ah|like|you know|sort of|i mean)\b",
        r"\.{2,}",
        r"\b(basically|actually|literally|totally|really)\b",
    ])
});

static CONFIDENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(certainly|definitely|absolutely|clearly|obviously)\b",
        r"\b(proven|demonstrated|achieved|implemented|delivered)\b",
        r"\b(successful|effective|efficient|innovative|scalable)\b",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid keyword pattern"))
        .collect()
}

fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

/// Counters derived from one answer's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub technical_terms: usize,
    pub emotional_indicators: usize,
    pub hesitation_markers: usize,
    pub confidence_indicators: usize,
    /// `min(100, (technical_terms * 2 + avg_word_length * 5) * 2)`, rounded.
    pub complexity_score: u8,
}

impl ContentFeatures {
    pub fn extract(answer: &str) -> Self {
        let text = answer.to_lowercase();
        let text = text.trim();
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let sentence_count = SENTENCE_SPLIT
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count();

        let technical_terms = count_matches(&TECHNICAL_PATTERNS, text);
        let emotional_indicators = count_matches(&EMOTIONAL_PATTERNS, text);
        let hesitation_markers = count_matches(&HESITATION_PATTERNS, text);
        let confidence_indicators = count_matches(&CONFIDENCE_PATTERNS, text);

        let avg_word_length = if word_count == 0 {
            0.0
        } else {
            words.iter().map(|w| w.len()).sum::<usize>() as f64 / word_count as f64
        };
        let complexity =
            ((technical_terms as f64 * 2.0 + avg_word_length * 5.0) * 2.0).round();
        let complexity_score = complexity.clamp(0.0, 100.0) as u8;

        Self {
            word_count,
            sentence_count,
            technical_terms,
            emotional_indicators,
            hesitation_markers,
            confidence_indicators,
            complexity_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_yields_zeroed_features() {
        let features = ContentFeatures::extract("   ");
        assert_eq!(features.word_count, 0);
        assert_eq!(features.sentence_count, 0);
        assert_eq!(features.technical_terms, 0);
        assert_eq!(features.complexity_score, 0);
    }

    #[test]
    fn counts_technical_terms_case_insensitively() {
        let features =
            ContentFeatures::extract("We built a REST API on AWS with Docker and SQL.");
        assert_eq!(features.technical_terms, 5);
    }

    #[test]
    fn counts_hesitation_and_ellipses() {
        let features = ContentFeatures::extract("Um, well... it was basically, you know, fine.");
        // "um" + "..." + "basically" + "you know"
        assert_eq!(features.hesitation_markers, 4);
    }

    #[test]
    fn sentence_count_ignores_trailing_terminator() {
        let features = ContentFeatures::extract("First point. Second point! Third point?");
        assert_eq!(features.sentence_count, 3);
    }

    #[test]
    fn complexity_caps_at_one_hundred() {
        let dense = "microservice kubernetes algorithm framework database graphql ".repeat(10);
        let features = ContentFeatures::extract(&dense);
        assert_eq!(features.complexity_score, 100);
    }

    #[test]
    fn emotional_and_confidence_indicators_counted() {
        let features = ContentFeatures::extract(
            "I was excited and proud; we definitely delivered a scalable, effective system.",
        );
        assert_eq!(features.emotional_indicators, 2);
        assert_eq!(features.confidence_indicators, 4);
    }
}
