//! Prompt templates for vacancy generation, resume generation and resume scoring

use crate::generation::tiers::QualityTier;

/// Prompt templates with `{placeholder}` substitution
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub vacancy: String,
    pub resume: String,
    pub scoring: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            vacancy: VACANCY_TEMPLATE.to_string(),
            resume: RESUME_TEMPLATE.to_string(),
            scoring: SCORING_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_vacancy(&self) -> String {
        self.vacancy.clone()
    }

    /// Resume prompt steered towards the fit quality of `tier`
    pub fn render_resume(&self, vacancy: &str, tier: QualityTier) -> String {
        fill(&self.resume, &[("{instruction}", tier.instruction()), ("{vacancy}", vacancy)])
    }

    /// Scoring prompt asking for a JSON object with `score` and `justification`
    pub fn render_scoring(&self, resume: &str, vacancy: &str) -> String {
        fill(&self.scoring, &[("{resume}", resume), ("{vacancy}", vacancy)])
    }
}

/// Single-pass placeholder substitution; substituted text is never rescanned
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(key).map(|pos| (pos, *key, *value)))
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, key, value)) => {
                output.push_str(&rest[..pos]);
                output.push_str(value);
                rest = &rest[pos + key.len()..];
            }
            None => {
                output.push_str(rest);
                return output;
            }
        }
    }
}

const VACANCY_TEMPLATE: &str = r#"Generate a detailed job vacancy description for a Python developer position.

The description must include:
1. Job title
2. About the company (short description)
3. Responsibilities
4. Requirements (mandatory and nice-to-have skills)
5. Working conditions

Make the description realistic, with concrete technical requirements and skills."#;

const RESUME_TEMPLATE: &str = r#"Generate a candidate resume for the following vacancy:

{vacancy}

{instruction}

The resume must include:
1. Candidate's full name
2. Contact information (email, phone)
3. Objective (short description of the desired position)
4. Work experience (in reverse chronological order)
5. Education
6. Skills
7. Additional information (languages, certificates, etc.)

Make the resume realistic."#;

const SCORING_TEMPLATE: &str = r#"Evaluate how well the candidate's resume matches the vacancy requirements.

VACANCY:
{vacancy}

RESUME:
{resume}

Rate the match on a scale from 0 to 10, where 0 means no match at all and 10 means a perfect match.
Give a short justification covering the candidate's strengths and weaknesses relative to the vacancy.

Return the result as JSON with the fields:
- score: a number from 0 to 10
- justification: a string with the justification"#;
