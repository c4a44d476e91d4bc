//! Error types for the lineage host.

/// Top-level error type for the host process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file or override error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeline engine error.
    #[error("search error: {0}")]
    Search(#[from] lineage_search::SearchError),

    /// Malformed or unsupported host command.
    #[error("command error: {0}")]
    Command(String),

    /// Stdin/stdout protocol channel error.
    #[error("channel error: {0}")]
    Channel(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
