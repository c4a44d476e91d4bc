//! Composite impact/recency scoring.
//!
//! Formula: `score = ln(citations + 1) * 1 / (current_year - year + 1)`
//!
//! The logarithm compresses the heavy-tailed citation distribution; the
//! reciprocal-age term decays older work monotonically.

use crate::types::CanonicalPaper;

/// Compute the composite score for one paper.
///
/// # Scoring Formula
///
/// ```text
/// impact  = ln(max(citation_count, 0) + 1)
/// recency = 1 / max(current_year - year + 1, 1)
/// score   = impact * recency
/// ```
///
/// - Negative citation counts are clamped to 0.
/// - Future-dated papers (`year > current_year`) get the same recency
///   multiplier as current-year papers (denominator clamped to 1).
/// - Uncited papers always score 0.
///
/// # Examples
///
/// ```
/// use lineage_search::orchestrator::scoring::composite_score;
///
/// let classic = composite_score(5000, 1990, 2025);
/// let fresh = composite_score(50, 2025, 2025);
/// assert!(fresh > classic);
/// ```
pub fn composite_score(citation_count: i64, year: i32, current_year: i32) -> f64 {
    let impact = (citation_count.max(0) as f64).ln_1p();
    let age = (i64::from(current_year) - i64::from(year) + 1).max(1);
    impact * (1.0 / age as f64)
}

/// Assign scores to every paper. Each paper is scored exactly once.
pub fn score_papers(mut papers: Vec<CanonicalPaper>, current_year: i32) -> Vec<CanonicalPaper> {
    for paper in &mut papers {
        let citations = i64::try_from(paper.citation_count).unwrap_or(i64::MAX);
        paper.score = composite_score(citations, paper.year, current_year);
    }
    papers
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i32 = 2025;

    fn make_paper(id: &str, year: i32, citations: u64) -> CanonicalPaper {
        CanonicalPaper {
            id: id.to_string(),
            title: format!("Paper {id}"),
            year,
            authors: "A. Author".into(),
            description: "D".into(),
            document_url: None,
            citation_count: citations,
            score: 0.0,
        }
    }

    #[test]
    fn formula_correctness() {
        let score = composite_score(99, 2016, NOW);
        let expected = 100f64.ln() / 10.0;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn current_year_has_full_recency() {
        let score = composite_score(10, NOW, NOW);
        assert!((score - 11f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn recency_monotonicity_for_equal_citations() {
        let recent = composite_score(10, NOW, NOW);
        let older = composite_score(10, NOW - 10, NOW);
        assert!(recent > older);
    }

    #[test]
    fn recency_decays_progressively() {
        let scores: Vec<f64> = (0..20).map(|age| composite_score(100, NOW - age, NOW)).collect();
        for i in 1..scores.len() {
            assert!(scores[i] < scores[i - 1]);
        }
    }

    #[test]
    fn uncited_papers_score_zero_regardless_of_age() {
        assert!(composite_score(0, NOW, NOW).abs() < f64::EPSILON);
        assert!(composite_score(0, NOW - 10, NOW).abs() < f64::EPSILON);
    }

    #[test]
    fn citation_monotonicity_is_log_scaled() {
        let high = composite_score(100, 2015, NOW);
        let low = composite_score(10, 2015, NOW);
        assert!(high > low);
        assert!(high / low < 10.0);
    }

    #[test]
    fn negative_citations_clamped_to_zero() {
        assert!(composite_score(-5, 2020, NOW).abs() < f64::EPSILON);
    }

    #[test]
    fn future_year_clamped_to_current_year_weight() {
        let future = composite_score(10, NOW + 1, NOW);
        let far_future = composite_score(10, NOW + 50, NOW);
        let current = composite_score(10, NOW, NOW);
        assert!(future.is_finite());
        assert!((future - current).abs() < 1e-12);
        assert!((far_future - current).abs() < 1e-12);
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = composite_score(1234, 2001, NOW);
        let b = composite_score(1234, 2001, NOW);
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn score_papers_updates_all_scores() {
        let papers = vec![make_paper("a", 2020, 100), make_paper("b", NOW, 0)];
        let scored = score_papers(papers, NOW);
        assert!((scored[0].score - 101f64.ln() / 6.0).abs() < 1e-12);
        assert!(scored[1].score.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_papers_return_empty() {
        assert!(score_papers(vec![], NOW).is_empty());
    }
}
