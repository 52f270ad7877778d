//! Model-backed resume analysis with validation and heuristic fallback

use crate::error::Result;
use crate::llm::prompts::PromptTemplates;
use crate::llm::TextGenerator;
use crate::scoring::fallback::FallbackScorer;
use crate::scoring::AnalysisResult;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Low temperature keeps scores stable between runs
pub const SCORING_TEMPERATURE: f32 = 0.2;

/// Justification emitted by a known bad model response; never a real explanation
pub const PLACEHOLDER_JUSTIFICATION: &str = "Python";

/// Why a model response was not accepted
#[derive(Debug, Error, PartialEq)]
pub enum RejectReason {
    #[error("empty response")]
    EmptyResponse,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("missing score")]
    MissingScore,

    #[error("score is not a number: {0}")]
    InvalidScore(String),

    #[error("missing justification")]
    MissingJustification,

    #[error("empty justification")]
    EmptyJustification,

    #[error("placeholder justification")]
    PlaceholderJustification,
}

/// Which path produced a result
#[derive(Debug, Clone, PartialEq)]
enum Scored {
    Model(AnalysisResult),
    Fallback(AnalysisResult),
    Failed(AnalysisResult),
}

impl Scored {
    fn label(&self) -> &'static str {
        match self {
            Scored::Model(_) => "model",
            Scored::Fallback(_) => "fallback",
            Scored::Failed(_) => "failed",
        }
    }

    fn result(&self) -> &AnalysisResult {
        match self {
            Scored::Model(r) | Scored::Fallback(r) | Scored::Failed(r) => r,
        }
    }

    fn into_result(self) -> AnalysisResult {
        match self {
            Scored::Model(r) | Scored::Fallback(r) | Scored::Failed(r) => r,
        }
    }
}

/// Scores resumes against a vacancy, one at a time
pub struct ResumeAnalyzer<G> {
    generator: G,
    templates: PromptTemplates,
    fallback: FallbackScorer,
    max_retries: u32,
    throttle: Duration,
}

impl<G: TextGenerator> ResumeAnalyzer<G> {
    pub fn new(generator: G, max_retries: u32, throttle: Duration) -> Result<Self> {
        info!("Initialized resume analyzer");
        Ok(Self {
            generator,
            templates: PromptTemplates::default(),
            fallback: FallbackScorer::new()?,
            max_retries,
            throttle,
        })
    }

    /// Score one resume. Always yields a valid result, then pauses for the throttle.
    pub async fn analyze_one(&self, resume: &str, vacancy: &str) -> AnalysisResult {
        debug!("Scoring resume against the vacancy");
        debug!("Resume starts with: {}", preview(resume, 100));

        let start = Instant::now();
        let scored = self.score(resume, vacancy).await;
        let elapsed = start.elapsed();

        info!(
            "Resume analysis completed in {:.2} seconds. Score: {:.2}/10",
            elapsed.as_secs_f64(),
            scored.result().score
        );
        debug!("Score produced by the {} path", scored.label());

        if !self.throttle.is_zero() {
            tokio::time::sleep(self.throttle).await;
        }

        scored.into_result()
    }

    async fn score(&self, resume: &str, vacancy: &str) -> Scored {
        let prompt = self.templates.render_scoring(resume, vacancy);
        let response = self
            .generator
            .generate(&prompt, SCORING_TEMPERATURE, self.max_retries)
            .await;

        match parse_model_response(&response) {
            Ok(result) => Scored::Model(result),
            Err(reason) => {
                warn!("Model response rejected ({}), using fallback scoring", reason);
                self.score_with_fallback(resume, vacancy)
            }
        }
    }

    fn score_with_fallback(&self, resume: &str, vacancy: &str) -> Scored {
        info!("Using fallback resume scoring");

        match catch_unwind(AssertUnwindSafe(|| self.fallback.score(resume, vacancy))) {
            Ok(result) => Scored::Fallback(result),
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown error".to_string());
                error!("Fallback scoring failed: {}", message);
                Scored::Failed(AnalysisResult::new(0.0, format!("Failed to analyze resume: {}", message)))
            }
        }
    }
}

/// Validate a raw model response and turn it into a result
pub fn parse_model_response(response: &str) -> std::result::Result<AnalysisResult, RejectReason> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(RejectReason::EmptyResponse);
    }

    let candidate = extract_json_object(trimmed).unwrap_or(trimmed);
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| RejectReason::MalformedJson(e.to_string()))?;
    let object = value.as_object().ok_or(RejectReason::NotAnObject)?;

    let score = match object.get("score") {
        None | Some(Value::Null) => return Err(RejectReason::MissingScore),
        Some(raw) => coerce_score(raw)?,
    };

    let justification = object
        .get("justification")
        .and_then(Value::as_str)
        .ok_or(RejectReason::MissingJustification)?;
    if justification.trim().is_empty() {
        return Err(RejectReason::EmptyJustification);
    }
    if justification == PLACEHOLDER_JUSTIFICATION {
        return Err(RejectReason::PlaceholderJustification);
    }

    Ok(AnalysisResult::new(score, justification))
}

/// Accept numbers and numeric strings
fn coerce_score(raw: &Value) -> std::result::Result<f64, RejectReason> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|score| score.is_finite())
        .ok_or_else(|| RejectReason::InvalidScore(raw.to_string()))
}

/// First balanced `{...}` in `text`, ignoring braces inside JSON strings
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.match_indices('{')
        .find_map(|(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// First `max_chars` characters on one line, for debug logs
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text.chars().take(max_chars).collect::<String>().replace('\n', " ");
    if text.chars().count() > max_chars {
        format!("{}...", flat.trim())
    } else {
        flat.trim().to_string()
    }
}
