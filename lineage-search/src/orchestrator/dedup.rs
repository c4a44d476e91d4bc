//! Normalisation and deduplication of raw paper records by identifier.
//!
//! A single pass over the raw collection keeps the first well-formed record
//! for each identifier and maps it to a [`CanonicalPaper`]. Records missing an
//! identifier, title, year or authors are dropped without diagnostics beyond
//! a trace event; upstream data is noisy and this is a filtering decision,
//! not an error.

use std::collections::HashSet;

use crate::types::{CanonicalPaper, RawPaper};

/// Maximum number of abstract characters used as a description.
pub const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// Description used when neither a summary nor an abstract is available.
pub const MISSING_DESCRIPTION: &str = "Summary not available.";

/// Deduplicate and validate raw records.
///
/// A record is kept iff its identifier is present and not yet seen, its
/// title is non-empty, its year is present and non-zero, and it has at least
/// one author. The identifier is marked seen only when the record is
/// accepted, so a malformed record never shadows a later valid one.
/// A rejected copy does not consume its identifier; marking ids seen before
/// validation would change which records survive.
///
/// Output order follows input order. Scores are left at `0.0`.
pub fn normalize(raw: Vec<RawPaper>) -> Vec<CanonicalPaper> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut papers = Vec::new();

    for record in raw {
        let Some(id) = record.paper_id.as_deref().filter(|id| !id.is_empty()) else {
            tracing::trace!("dropping record without identifier");
            continue;
        };
        if seen.contains(id) {
            continue;
        }
        let Some(paper) = to_canonical(&record, id) else {
            tracing::trace!(id, "dropping incomplete record");
            continue;
        };
        seen.insert(paper.id.clone());
        papers.push(paper);
    }

    papers
}

/// Map one raw record to a canonical paper, or `None` if it is incomplete.
fn to_canonical(record: &RawPaper, id: &str) -> Option<CanonicalPaper> {
    let title = record.title.as_deref().filter(|t| !t.is_empty())?;
    let year = record.year.filter(|y| *y != 0)?;
    let authors = record.author_names().collect::<Vec<_>>().join(", ");
    if authors.is_empty() {
        return None;
    }

    let document_url = record
        .open_access_pdf_url()
        .or_else(|| record.url.as_deref().filter(|u| !u.is_empty()))
        .map(str::to_string);

    Some(CanonicalPaper {
        id: id.to_string(),
        title: title.to_string(),
        year,
        authors,
        description: describe(record),
        document_url,
        citation_count: record.citation_count.unwrap_or(0).max(0).unsigned_abs(),
        score: 0.0,
    })
}

/// Pick the description: summary, else truncated abstract, else placeholder.
fn describe(record: &RawPaper) -> String {
    if let Some(summary) = record.short_summary() {
        return summary.to_string();
    }
    match record.abstract_text.as_deref().filter(|a| !a.is_empty()) {
        Some(text) => {
            let preview: String = text.chars().take(ABSTRACT_PREVIEW_CHARS).collect();
            format!("{preview}...")
        }
        None => MISSING_DESCRIPTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OpenAccessPdf, RawAuthor, Tldr};

    fn make_raw(id: &str, title: &str, year: i32) -> RawPaper {
        RawPaper {
            paper_id: Some(id.to_string()),
            title: Some(title.to_string()),
            year: Some(year),
            authors: vec![RawAuthor::named("Ada Lovelace"), RawAuthor::named("Charles Babbage")],
            citation_count: Some(12),
            url: Some(format!("https://www.semanticscholar.org/paper/{id}")),
            ..Default::default()
        }
    }

    #[test]
    fn unique_records_pass_through() {
        let papers = normalize(vec![make_raw("a", "A", 2001), make_raw("b", "B", 2002)]);
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].id, "a");
        assert_eq!(papers[1].id, "b");
    }

    #[test]
    fn first_duplicate_wins() {
        let mut later = make_raw("dup", "Later Title", 2010);
        later.citation_count = Some(9999);
        let papers = normalize(vec![make_raw("dup", "First Title", 2005), later]);
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "First Title");
        assert_eq!(papers[0].year, 2005);
        assert_eq!(papers[0].citation_count, 12);
    }

    #[test]
    fn missing_identifier_dropped() {
        let mut raw = make_raw("x", "X", 2000);
        raw.paper_id = None;
        let mut empty = make_raw("", "Y", 2000);
        empty.paper_id = Some(String::new());
        assert!(normalize(vec![raw, empty]).is_empty());
    }

    #[test]
    fn missing_title_dropped() {
        let mut raw = make_raw("x", "X", 2000);
        raw.title = None;
        let mut blank = make_raw("y", "", 2000);
        blank.title = Some(String::new());
        assert!(normalize(vec![raw, blank]).is_empty());
    }

    #[test]
    fn missing_year_dropped() {
        let mut raw = make_raw("x", "X", 2000);
        raw.year = None;
        assert!(normalize(vec![raw]).is_empty());
    }

    #[test]
    fn empty_authors_dropped() {
        let mut raw = make_raw("x", "X", 2000);
        raw.authors.clear();
        assert!(normalize(vec![raw]).is_empty());
    }

    #[test]
    fn nameless_authors_dropped() {
        let mut raw = make_raw("p1", "Anonymous", 2001);
        raw.authors = vec![RawAuthor::default()];
        assert!(normalize(vec![raw]).is_empty());
    }

    #[test]
    fn malformed_record_does_not_shadow_later_valid_one() {
        let mut broken = make_raw("same", "Broken", 2000);
        broken.authors.clear();
        let papers = normalize(vec![broken, make_raw("same", "Valid", 2001)]);
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Valid");
    }

    #[test]
    fn authors_joined_with_comma() {
        let papers = normalize(vec![make_raw("a", "A", 2000)]);
        assert_eq!(papers[0].authors, "Ada Lovelace, Charles Babbage");
    }

    #[test]
    fn summary_preferred_over_abstract() {
        let mut raw = make_raw("a", "A", 2000);
        raw.abstract_text = Some("Long abstract".into());
        raw.tldr = Some(Tldr {
            text: Some("Short summary.".into()),
        });
        let papers = normalize(vec![raw]);
        assert_eq!(papers[0].description, "Short summary.");
    }

    #[test]
    fn abstract_truncated_to_200_chars_with_ellipsis() {
        let mut raw = make_raw("a", "A", 2000);
        raw.abstract_text = Some("é".repeat(250));
        let papers = normalize(vec![raw]);
        let description = &papers[0].description;
        assert!(description.ends_with("..."));
        assert_eq!(description.chars().count(), ABSTRACT_PREVIEW_CHARS + 3);
    }

    #[test]
    fn short_abstract_still_gets_ellipsis() {
        let mut raw = make_raw("a", "A", 2000);
        raw.abstract_text = Some("Brief.".into());
        let papers = normalize(vec![raw]);
        assert_eq!(papers[0].description, "Brief....");
    }

    #[test]
    fn placeholder_when_no_text() {
        let papers = normalize(vec![make_raw("a", "A", 2000)]);
        assert_eq!(papers[0].description, MISSING_DESCRIPTION);
    }

    #[test]
    fn pdf_url_preferred_over_landing_page() {
        let mut raw = make_raw("a", "A", 2000);
        raw.open_access_pdf = Some(OpenAccessPdf {
            url: Some("https://arxiv.org/pdf/a.pdf".into()),
        });
        let papers = normalize(vec![raw, make_raw("b", "B", 2000)]);
        assert_eq!(
            papers[0].document_url.as_deref(),
            Some("https://arxiv.org/pdf/a.pdf")
        );
        assert_eq!(
            papers[1].document_url.as_deref(),
            Some("https://www.semanticscholar.org/paper/b")
        );
    }

    #[test]
    fn citation_count_defaults_and_clamps() {
        let mut missing = make_raw("a", "A", 2000);
        missing.citation_count = None;
        let mut negative = make_raw("b", "B", 2000);
        negative.citation_count = Some(-7);
        let papers = normalize(vec![missing, negative]);
        assert_eq!(papers[0].citation_count, 0);
        assert_eq!(papers[1].citation_count, 0);
    }

    #[test]
    fn scores_start_at_zero() {
        let papers = normalize(vec![make_raw("a", "A", 2000)]);
        assert!(papers[0].score.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(normalize(vec![]).is_empty());
    }
}
