//! Quality filter: plausibility thresholds applied after scoring.
//!
//! A paper survives iff both hold:
//! - `year >= min_year` (1980 by default)
//! - it is cited, or it was published within the last `uncited_grace_years`

use crate::types::CanonicalPaper;

/// Thresholds for [`quality_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    pub min_year: i32,
    pub uncited_grace_years: i32,
    pub current_year: i32,
}

impl QualityThresholds {
    /// Whether a single paper passes.
    pub fn accepts(&self, paper: &CanonicalPaper) -> bool {
        if paper.year < self.min_year {
            return false;
        }
        let stale_and_uncited = paper.citation_count == 0
            && paper.year < self.current_year - self.uncited_grace_years;
        !stale_and_uncited
    }
}

/// Keep papers that pass `thresholds`, preserving order.
pub fn quality_filter(
    papers: Vec<CanonicalPaper>,
    thresholds: &QualityThresholds,
) -> Vec<CanonicalPaper> {
    let before = papers.len();
    let kept: Vec<CanonicalPaper> = papers
        .into_iter()
        .filter(|p| thresholds.accepts(p))
        .collect();
    tracing::debug!(before, after = kept.len(), "quality filter applied");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i32 = 2025;

    fn thresholds() -> QualityThresholds {
        QualityThresholds {
            min_year: 1980,
            uncited_grace_years: 2,
            current_year: NOW,
        }
    }

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
    fn pre_1980_rejected_regardless_of_citations() {
        let t = thresholds();
        assert!(!t.accepts(&make_paper("a", 1975, 0)));
        assert!(!t.accepts(&make_paper("b", 1975, 50_000)));
        assert!(!t.accepts(&make_paper("c", 1979, 10)));
    }

    #[test]
    fn year_1980_accepted() {
        assert!(thresholds().accepts(&make_paper("a", 1980, 1)));
    }

    #[test]
    fn uncited_old_paper_rejected() {
        assert!(!thresholds().accepts(&make_paper("a", NOW - 5, 0)));
        assert!(!thresholds().accepts(&make_paper("b", NOW - 3, 0)));
    }

    #[test]
    fn uncited_recent_paper_accepted() {
        let t = thresholds();
        assert!(t.accepts(&make_paper("a", NOW, 0)));
        assert!(t.accepts(&make_paper("b", NOW - 1, 0)));
        assert!(t.accepts(&make_paper("c", NOW - 2, 0)));
    }

    #[test]
    fn cited_old_paper_accepted() {
        assert!(thresholds().accepts(&make_paper("a", 1995, 1)));
    }

    #[test]
    fn filter_preserves_order() {
        let papers = vec![
            make_paper("keep-1", 2010, 5),
            make_paper("drop-old", 1970, 5),
            make_paper("keep-2", NOW, 0),
            make_paper("drop-uncited", 2000, 0),
            make_paper("keep-3", 1990, 1),
        ];
        let kept = quality_filter(papers, &thresholds());
        let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["keep-1", "keep-2", "keep-3"]);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(quality_filter(vec![], &thresholds()).is_empty());
    }
}
