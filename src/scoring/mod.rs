//! Resume scoring: model-backed analysis, heuristic fallback and ranking

pub mod analyzer;
pub mod fallback;
pub mod ranking;

use serde::{Deserialize, Serialize, Serializer};

pub use analyzer::ResumeAnalyzer;
pub use fallback::FallbackScorer;
pub use ranking::{best_candidate, rank, top_n};

/// Lowest and highest score a resume can receive
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Outcome of scoring one resume against the vacancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Source resume, attached by the caller after scoring
    #[serde(default)]
    pub file_name: String,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub justification: String,
}

impl AnalysisResult {
    pub fn new(score: f64, justification: impl Into<String>) -> Self {
        Self {
            file_name: String::new(),
            score: clamp_score(score),
            justification: justification.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// Clamp into the valid score range; NaN collapses to the minimum
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        MIN_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_score() {
        assert_eq!(AnalysisResult::new(12.5, "x").score, 10.0);
        assert_eq!(AnalysisResult::new(-3.0, "x").score, 0.0);
        assert_eq!(AnalysisResult::new(f64::NAN, "x").score, 0.0);
        assert_eq!(AnalysisResult::new(7.25, "x").score, 7.25);
    }

    #[test]
    fn test_serialized_score_has_two_decimals() {
        let result = AnalysisResult::new(7.456, "ok").with_file_name("resume_001.txt");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["score"], serde_json::json!(7.46));
        assert_eq!(json["file_name"], "resume_001.txt");
        assert_eq!(json["justification"], "ok");
    }
}
