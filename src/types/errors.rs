//! Error types for Arc Screener.

use thiserror::Error;

/// Default result type for Arc Screener.
pub type ScreenerResult<T> = Result<T, ScreenerError>;

/// Errors raised by the caches, the store and the service delegates.
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// Transport failure or non-success response from the screening service.
    #[error("Screening fetch failed: {0}")]
    Fetch(String),

    /// Transport failure or non-success response from the analysis service.
    #[error("Analysis of '{symbol}' failed: {message}")]
    Analysis { symbol: String, message: String },

    /// Malformed persisted entry. Recovered inside the result cache as a miss.
    #[error("Persisted cache entry unreadable: {0}")]
    CacheRead(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "cli")]
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

impl ScreenerError {
    /// Creates a generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an analysis error for `symbol`.
    pub fn analysis<S: Into<String>, M: Into<String>>(symbol: S, message: M) -> Self {
        Self::Analysis {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Reclassifies any delegate failure as a screening fetch failure.
    pub fn into_fetch(self) -> Self {
        match self {
            Self::Fetch(_) => self,
            other => Self::Fetch(other.to_string()),
        }
    }

    /// Reclassifies any delegate failure as an analysis failure for `symbol`.
    pub fn into_analysis(self, symbol: &str) -> Self {
        match self {
            Self::Analysis { .. } => self,
            other => Self::analysis(symbol, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_fetch_keeps_fetch() {
        let err = ScreenerError::Fetch("HTTP 500".to_string()).into_fetch();
        assert_eq!(err.to_string(), "Screening fetch failed: HTTP 500");
    }

    #[test]
    fn test_into_fetch_wraps_other() {
        let err = ScreenerError::other("connection reset").into_fetch();
        assert!(matches!(err, ScreenerError::Fetch(ref m) if m == "connection reset"));
    }

    #[test]
    fn test_into_analysis_wraps_with_symbol() {
        let err = ScreenerError::Fetch("boom".to_string()).into_analysis("AAPL");
        match err {
            ScreenerError::Analysis { symbol, message } => {
                assert_eq!(symbol, "AAPL");
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
