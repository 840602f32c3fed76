//! Error types for rowscout.
//!
//! A scan has exactly one way to fail: the record source could not be opened,
//! its header could not be read, or it stopped being readable part way through.
//! All of these surface as [`SearchError::SourceUnavailable`] and abort the scan
//! without a partial result. Ragged rows are not errors.
//!
//! The remaining variants belong to the plumbing around the scan (configuration,
//! terminal and JSON output):
//! ```rust,ignore
//! match rowscout::search(&config, "paris", 1) {
//!     Ok(result) => // Render the page,
//!     Err(SearchError::SourceUnavailable { name, reason }) => // Show an error page,
//!     Err(e) => // Configuration or output failure
//! }
//! ```
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while searching a record source
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Source unavailable: {name}: {reason}")]
    SourceUnavailable { name: String, reason: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SearchError {
    pub fn source_unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Returns true if this error means the record source could not be read
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
