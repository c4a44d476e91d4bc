//! # lineage
//!
//! Host process for the literature timeline engine. Loads configuration,
//! builds a [`lineage_search::DefaultTimelineSearch`] and serves it over a
//! newline-delimited JSON bridge on stdin/stdout.

pub mod config;
pub mod error;
pub mod host;

pub use error::{AppError, Result};
