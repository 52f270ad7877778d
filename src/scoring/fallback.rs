//! Deterministic keyword and heuristic scoring, used when the model is unavailable

use crate::error::{Result, ScreenerError};
use crate::scoring::{clamp_score, round2, AnalysisResult};
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

/// Technology and process terms counted in a resume
pub const KEY_TECHNOLOGIES: &[&str] = &[
    "python", "django", "flask", "fastapi", "rest", "api",
    "sql", "postgresql", "mysql", "mongodb", "nosql", "redis",
    "docker", "kubernetes", "git", "ci/cd", "linux", "aws", "azure",
    "microservices", "tdd", "unit tests", "pytest", "asyncio",
];

/// Points available for keyword coverage
const KEYWORD_WEIGHT: f64 = 6.0;

const SENIOR_MARKERS: &[&str] = &["senior", "5+ years", "5+ лет", "5 лет"];
const MIDDLE_MARKERS: &[&str] = &["middle", "mid-level", "3+ years", "3+ лет", "3 года"];
const JUNIOR_MARKERS: &[&str] = &["junior", "1+ year", "1+ год", "2 года"];

const HIGHER_EDUCATION_MARKERS: &[&str] = &["магистр", "высшее", "master's", "higher education"];
const BASIC_EDUCATION_MARKERS: &[&str] = &["бакалавр", "колледж", "bachelor", "college"];

/// Experience tier inferred from seniority markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    Unknown = 0,
    Junior = 1,
    Middle = 2,
    Senior = 3,
}

/// Education tier inferred from degree markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationLevel {
    Unknown = 0,
    Basic = 1,
    Higher = 2,
}

/// Per-component breakdown of a fallback score
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackBreakdown {
    pub keyword_matches: usize,
    pub total_keywords: usize,
    pub experience: ExperienceLevel,
    pub education: EducationLevel,
}

impl FallbackBreakdown {
    pub fn keyword_score(&self) -> f64 {
        if self.total_keywords == 0 {
            return 0.0;
        }
        self.keyword_matches as f64 / self.total_keywords as f64 * KEYWORD_WEIGHT
    }

    pub fn experience_score(&self) -> f64 {
        self.experience as u8 as f64
    }

    pub fn education_score(&self) -> f64 {
        self.education as u8 as f64 / 2.0
    }

    pub fn total(&self) -> f64 {
        round2(clamp_score(self.keyword_score() + self.experience_score() + self.education_score()))
    }

    pub fn justification(&self) -> String {
        let mut text = format!(
            "The candidate matches {} of {} key technologies. ",
            self.keyword_matches, self.total_keywords
        );

        text.push_str(match self.experience {
            ExperienceLevel::Senior => "Has significant work experience (Senior level). ",
            ExperienceLevel::Middle => "Has moderate work experience (Middle level). ",
            ExperienceLevel::Junior => "Has limited work experience (Junior level). ",
            ExperienceLevel::Unknown => "Work experience is not stated or is minimal. ",
        });

        text.push_str(match self.education {
            EducationLevel::Higher => "Has higher education or a master's degree.",
            EducationLevel::Basic => "Has a bachelor's degree or college education.",
            EducationLevel::Unknown => "No information about education.",
        });

        text
    }
}

/// Keyword/heuristic scorer with no I/O and no failure modes after construction
pub struct FallbackScorer {
    matcher: AhoCorasick,
    total_keywords: usize,
}

impl FallbackScorer {
    pub fn new() -> Result<Self> {
        Self::with_keywords(KEY_TECHNOLOGIES)
    }

    pub fn with_keywords(keywords: &[&str]) -> Result<Self> {
        let patterns: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let matcher = AhoCorasick::new(&patterns)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            matcher,
            total_keywords: patterns.len(),
        })
    }

    /// Score `resume` from keyword coverage, experience and education markers.
    ///
    /// The vacancy is accepted for symmetry with the model path; the keyword
    /// list is fixed, so it does not influence the result.
    pub fn score(&self, resume: &str, _vacancy: &str) -> AnalysisResult {
        let breakdown = self.breakdown(resume);
        AnalysisResult::new(breakdown.total(), breakdown.justification())
    }

    pub fn breakdown(&self, resume: &str) -> FallbackBreakdown {
        let resume_lower = resume.to_lowercase();

        // Distinct keywords present anywhere, overlaps included ("rest api" counts both)
        let matched: HashSet<usize> = self
            .matcher
            .find_overlapping_iter(&resume_lower)
            .map(|m| m.pattern().as_usize())
            .collect();

        FallbackBreakdown {
            keyword_matches: matched.len(),
            total_keywords: self.total_keywords,
            experience: detect_experience(&resume_lower),
            education: detect_education(&resume_lower),
        }
    }
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

fn detect_experience(text: &str) -> ExperienceLevel {
    if contains_any(text, SENIOR_MARKERS) {
        ExperienceLevel::Senior
    } else if contains_any(text, MIDDLE_MARKERS) {
        ExperienceLevel::Middle
    } else if contains_any(text, JUNIOR_MARKERS) {
        ExperienceLevel::Junior
    } else {
        ExperienceLevel::Unknown
    }
}

fn detect_education(text: &str) -> EducationLevel {
    if contains_any(text, HIGHER_EDUCATION_MARKERS) {
        EducationLevel::Higher
    } else if contains_any(text, BASIC_EDUCATION_MARKERS) {
        EducationLevel::Basic
    } else {
        EducationLevel::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> FallbackScorer {
        FallbackScorer::new().unwrap()
    }

    #[test]
    fn test_exact_score_arithmetic() {
        let resume = "Senior engineer. Python, Docker, Kubernetes, Redis. Магистр.";
        let result = scorer().score(resume, "any vacancy");

        let total = KEY_TECHNOLOGIES.len() as f64;
        let expected = round2(clamp_score((4.0 / total) * 6.0 + 3.0 + 1.0));
        assert_eq!(KEY_TECHNOLOGIES.len(), 24);
        assert_eq!(result.score, expected);
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let result = scorer().score("", "");
        assert_eq!(result.score, 0.0);
        assert!(!result.justification.is_empty());
        assert!(result.justification.contains("0 of 24"));
    }

    #[test]
    fn test_overlapping_keywords_count_separately() {
        let breakdown = scorer().breakdown("Built a REST API with PostgreSQL");
        // rest, api, sql, postgresql
        assert_eq!(breakdown.keyword_matches, 4);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let breakdown = scorer().breakdown("docker docker docker");
        assert_eq!(breakdown.keyword_matches, 1);
    }

    #[test]
    fn test_experience_precedence() {
        assert_eq!(detect_experience("junior then senior"), ExperienceLevel::Senior);
        assert_eq!(detect_experience("middle developer"), ExperienceLevel::Middle);
        assert_eq!(detect_experience("опыт 3 года"), ExperienceLevel::Middle);
        assert_eq!(detect_experience("junior"), ExperienceLevel::Junior);
        assert_eq!(detect_experience("intern"), ExperienceLevel::Unknown);
    }

    #[test]
    fn test_education_levels() {
        assert_eq!(detect_education("высшее образование"), EducationLevel::Higher);
        assert_eq!(detect_education("бакалавр"), EducationLevel::Basic);
        assert_eq!(detect_education("self-taught"), EducationLevel::Unknown);
    }

    #[test]
    fn test_score_never_exceeds_maximum() {
        let resume = KEY_TECHNOLOGIES.join(" ") + " senior магистр";
        let result = scorer().score(&resume, "");
        assert_eq!(result.score, 10.0);
    }

    #[test]
    fn test_justification_is_deterministic() {
        let first = scorer().score("Junior, Flask, college", "v");
        let second = scorer().score("Junior, Flask, college", "v");
        assert_eq!(first, second);
        assert_eq!(
            first.justification,
            "The candidate matches 1 of 24 key technologies. \
             Has limited work experience (Junior level). \
             Has a bachelor's degree or college education."
        );
    }
}
