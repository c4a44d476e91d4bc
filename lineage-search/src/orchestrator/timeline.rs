//! Timeline assembly: top-K by score, then chronological order.

use std::cmp::Ordering;

use crate::types::CanonicalPaper;

/// Select the `max_results` highest-scored papers and order them by year.
///
/// 1. Stable sort by score descending (ties keep input order).
/// 2. Truncate to `max_results`.
/// 3. Stable sort by year ascending, so same-year papers stay in
///    score-descending order.
pub fn assemble(mut papers: Vec<CanonicalPaper>, max_results: usize) -> Vec<CanonicalPaper> {
    papers.sort_by(by_score_descending);
    papers.truncate(max_results);
    papers.sort_by_key(|p| p.year);
    papers
}

/// Total order on scores, highest first. `NaN` sorts last.
fn by_score_descending(a: &CanonicalPaper, b: &CanonicalPaper) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (false, false) => b.score.total_cmp(&a.score),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}
