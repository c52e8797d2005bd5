//! Strict normalization of provider-produced score JSON.
//!
//! LLM backends are asked for a fixed JSON schema but routinely return
//! floats, numeric strings, missing keys, or empty lists. [`normalize`]
//! coerces whatever arrives into a well-formed [`ScoreRecord`] and never
//! fails: unusable input degrades to defaults instead of erroring.

use serde_json::Value;

use crate::record::{Resource, ScoreRecord};

/// Score used when a numeric field is absent from the payload.
pub const DEFAULT_SCORE: u8 = 75;

/// The seven numeric fields of the canonical schema, in record order.
pub const NUMERIC_FIELDS: [&str; 7] = [
    "technical_accuracy",
    "clarity_structure",
    "depth_of_knowledge",
    "communication",
    "confidence",
    "reasoning",
    "emotion",
];

/// Coerce a parsed provider payload into a canonical record.
///
/// Coercion rules per numeric field:
/// - missing key: [`DEFAULT_SCORE`]
/// - integer: clamped to `[0, 100]`
/// - float: rounded half-away-from-zero, then clamped
/// - string: trimmed and parsed as a number (0 if unparsable), then clamped
/// - any other JSON type: 0
///
/// List fields keep only non-empty string items; an empty result is replaced
/// with a single placeholder entry so downstream consumers never see `[]`.
pub fn normalize(payload: &Value) -> ScoreRecord {
    ScoreRecord {
        technical_accuracy: coerce_score(payload.get("technical_accuracy")),
        clarity_structure: coerce_score(payload.get("clarity_structure")),
        depth_of_knowledge: coerce_score(payload.get("depth_of_knowledge")),
        communication: coerce_score(payload.get("communication")),
        confidence: coerce_score(payload.get("confidence")),
        reasoning: coerce_score(payload.get("reasoning")),
        emotion: coerce_score(payload.get("emotion")),
        strengths: coerce_list(payload.get("strengths"), "Response received"),
        improvements: coerce_list(
            payload.get("improvements"),
            "Provide more supporting detail",
        ),
        suggestions: coerce_list(
            payload.get("suggestions"),
            "Expand on key points with concrete examples",
        ),
        recommended_resources: coerce_resources(payload.get("recommended_resources")),
    }
}

/// Clamp an arbitrary integer into the valid score range.
pub fn clamp_score(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn coerce_score(value: Option<&Value>) -> u8 {
    let Some(value) = value else {
        return DEFAULT_SCORE;
    };
    let raw = if let Some(n) = value.as_i64() {
        n
    } else if let Some(f) = value.as_f64() {
        f.round() as i64
    } else if let Some(s) = value.as_str() {
        s.trim()
            .parse::<f64>()
            .map(|f| f.round() as i64)
            .unwrap_or(0)
    } else {
        0
    };
    clamp_score(raw)
}

fn coerce_list(value: Option<&Value>, placeholder: &str) -> Vec<String> {
    let items: Vec<String> = value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}

fn coerce_resources(value: Option<&Value>) -> Vec<Resource> {
    let items: Vec<Resource> = value
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(resource_from_value).collect())
        .unwrap_or_default();
    if items.is_empty() {
        default_resources()
    } else {
        items
    }
}

fn resource_from_value(value: &Value) -> Option<Resource> {
    let title = value.get("title")?.as_str()?.trim();
    let description = value.get("description")?.as_str()?.trim();
    if title.is_empty() || description.is_empty() {
        return None;
    }
    Some(Resource::new(title, description))
}

fn default_resources() -> Vec<Resource> {
    vec![
        Resource::new(
            "Interview Preparation Guide",
            "General guidance on structuring strong interview answers",
        ),
        Resource::new(
            "Skill Development",
            "Practice resources for your target role",
        ),
    ]
}
