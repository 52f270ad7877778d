//! Candidate ranking and selection

use crate::scoring::AnalysisResult;
use log::{debug, info, warn};

/// Sort by score, highest first. Equal scores keep their input order.
pub fn rank(mut results: Vec<AnalysisResult>) -> Vec<AnalysisResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

/// Prefix of an already ranked list; `n` is clamped to the list length
pub fn top_n(ranked: &[AnalysisResult], n: usize) -> &[AnalysisResult] {
    let selected = &ranked[..n.min(ranked.len())];
    if !selected.is_empty() {
        info!("Selected {} top candidates", selected.len());
        debug!(
            "Top candidates: {}",
            selected.iter().map(|c| c.file_name.as_str()).collect::<Vec<_>>().join(", ")
        );
    }
    selected
}

/// Highest-scoring result, first one on ties
pub fn best_candidate(results: &[AnalysisResult]) -> Option<&AnalysisResult> {
    let best = results
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.score.total_cmp(&b.score).then(ib.cmp(ia)))
        .map(|(_, r)| r);

    match best {
        Some(candidate) => info!(
            "Selected best candidate: {} with score {:.2}",
            candidate.file_name, candidate.score
        ),
        None => warn!("No results to select the best candidate from"),
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, score: f64) -> AnalysisResult {
        AnalysisResult::new(score, "because").with_file_name(name)
    }

    fn names(results: &[AnalysisResult]) -> Vec<&str> {
        results.iter().map(|r| r.file_name.as_str()).collect()
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let ranked = rank(vec![
            result("a", 3.0),
            result("b", 9.0),
            result("c", 9.0),
            result("d", 1.0),
        ]);
        assert_eq!(names(&ranked), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_top_n_clamps_to_length() {
        let ranked = rank(vec![result("a", 1.0), result("b", 2.0)]);
        assert_eq!(names(top_n(&ranked, 5)), vec!["b", "a"]);
        assert_eq!(names(top_n(&ranked, 1)), vec!["b"]);
        assert!(top_n(&ranked, 0).is_empty());
    }

    #[test]
    fn test_best_candidate_prefers_first_on_tie() {
        let results = vec![result("a", 4.0), result("b", 8.5), result("c", 8.5)];
        assert_eq!(best_candidate(&results).map(|r| r.file_name.as_str()), Some("b"));
        assert!(best_candidate(&[]).is_none());
    }
}
