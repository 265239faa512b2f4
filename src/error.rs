//! Error types for richnote.
//!
//! Editing commands never fail: degenerate ranges and impossible history
//! moves are silently ignored. Errors only surface where external data
//! enters the engine, i.e. when loading persisted markup.

use std::fmt;

/// Result type alias for richnote operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for richnote operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed markup (unknown tag, unbalanced tags, bad escape).
    InvalidMarkup {
        /// Byte offset into the markup string.
        offset: usize,
        reason: String,
    },
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
}

impl Error {
    pub(crate) fn markup(offset: usize, reason: impl Into<String>) -> Self {
        Self::InvalidMarkup {
            offset,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMarkup { offset, reason } => {
                write!(f, "invalid markup at byte {offset}: {reason}")
            }
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("not-a-color".to_string());
        assert!(err.to_string().contains("invalid color format"));

        let err = Error::markup(12, "unclosed tag <b>");
        assert_eq!(
            err.to_string(),
            "invalid markup at byte 12: unclosed tag <b>"
        );
    }
}
