//! Numeric video-window scoring.
//!
//! The capture frontend streams per-window feature arrays (head
//! displacement, face bounding-box width, iris position, blink rate).
//! Heuristics turn these into 0-100 scores; a provider can optionally
//! re-interpret the window for more humanlike notes.

use serde::{Deserialize, Serialize};

/// Raw numeric features for one capture window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowFeatures {
    #[serde(default)]
    pub head_disp: Vec<f64>,
    #[serde(default)]
    pub bbox_width: Vec<f64>,
    #[serde(default)]
    pub avg_iris_x: Vec<f64>,
    #[serde(default)]
    pub blink_rate: f64,
}

/// Scores for one capture window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowScores {
    pub window_start: i64,
    pub window_end: i64,
    pub eye_contact_score: u8,
    pub head_stability_score: u8,
    pub posture_score: u8,
    pub confidence_score: u8,
    pub notes: String,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn heuristic(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Deterministic heuristic scores for one window.
///
/// Eye contact penalizes iris deviation from center (an empty iris series
/// counts as maximal 0.5 deviation), head stability and posture penalize
/// variance in their series, and confidence blends the three minus a blink
/// penalty.
pub fn score_window(
    window_start: i64,
    window_end: i64,
    features: &WindowFeatures,
) -> WindowScores {
    let head_variance = population_variance(&features.head_disp);
    let posture_variance = population_variance(&features.bbox_width);
    let iris_center_dev = if features.avg_iris_x.is_empty() {
        0.5
    } else {
        (mean(&features.avg_iris_x) - 0.5).abs()
    };

    let eye = (100.0 - iris_center_dev * 200.0).round().max(0.0);
    let head = (100.0 - head_variance * 3000.0).round().max(0.0);
    let posture = (100.0 - posture_variance * 1000.0).round().max(0.0);
    let confidence = ((eye * 0.4 + head * 0.35 + posture * 0.25)
        - features.blink_rate * 10.0)
        .round()
        .max(0.0);

    WindowScores {
        window_start,
        window_end,
        eye_contact_score: heuristic(eye),
        head_stability_score: heuristic(head),
        posture_score: heuristic(posture),
        confidence_score: heuristic(confidence),
        notes: "Heuristic scores calculated from facial features".to_string(),
    }
}
