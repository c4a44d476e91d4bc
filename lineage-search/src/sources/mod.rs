//! Paper source implementations.
//!
//! Each module provides a struct implementing [`crate::source::PaperSource`]
//! for a specific academic-search API.

pub mod semantic_scholar;

pub use semantic_scholar::SemanticScholarSource;
