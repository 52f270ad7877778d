//! Candidate report assembled from a ranked result list

use crate::scoring::{self, AnalysisResult};
use serde::{Deserialize, Serialize};

/// Date format used in every output artifact
pub const ANALYSIS_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub best_candidate: AnalysisResult,
    pub top_candidates: Vec<AnalysisResult>,
    pub analysis_date: String,
}

impl CandidateReport {
    /// Build a report dated now. `None` when there is nothing to report.
    pub fn from_ranked(ranked: &[AnalysisResult], top_n: usize) -> Option<Self> {
        let date = chrono::Local::now().format(ANALYSIS_DATE_FORMAT).to_string();
        Self::from_ranked_at(ranked, top_n, date)
    }

    pub fn from_ranked_at(ranked: &[AnalysisResult], top_n: usize, analysis_date: String) -> Option<Self> {
        let best_candidate = ranked.first()?.clone();
        Some(Self {
            best_candidate,
            top_candidates: scoring::top_n(ranked, top_n).to_vec(),
            analysis_date,
        })
    }

    /// Number shown in "TOP-N" headings
    pub fn shown(&self) -> usize {
        self.top_candidates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ranking_has_no_report() {
        assert!(CandidateReport::from_ranked(&[], 5).is_none());
    }

    #[test]
    fn test_report_takes_prefix() {
        let ranked = vec![
            AnalysisResult::new(9.0, "a").with_file_name("resume_002.txt"),
            AnalysisResult::new(5.0, "b").with_file_name("resume_001.txt"),
            AnalysisResult::new(1.0, "c").with_file_name("resume_003.txt"),
        ];

        let report = CandidateReport::from_ranked_at(&ranked, 2, "2026-10-19 10:00:00".to_string()).unwrap();
        assert_eq!(report.best_candidate.file_name, "resume_002.txt");
        assert_eq!(report.shown(), 2);
        assert_eq!(report.top_candidates[1].file_name, "resume_001.txt");
    }
}
