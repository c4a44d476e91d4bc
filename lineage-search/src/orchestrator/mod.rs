//! Timeline orchestrator: multi-strategy retrieval, dedup, scoring, ranking.
//!
//! Each stage is a plain function over owned collections; [`search`] wires
//! them into the [`TimelineSearch`](search::TimelineSearch) pipeline.

pub mod dedup;
pub mod filter;
pub mod retrieve;
pub mod scoring;
pub mod search;
pub mod timeline;
