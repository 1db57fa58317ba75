//! Unified error types for chatpulse.
//!
//! Parsing itself never fails on a line-by-line basis: unrecognized lines are
//! continuations or noise, and a record whose timestamp cannot be resolved is
//! dropped with a `warn!`. The variants here cover the few conditions a caller
//! must be able to tell apart:
//!
//! - **I/O and encoding** problems reading the export
//! - **Empty result**: the text contained no recognizable message
//! - **Archive** problems: unreadable archive, or no chat file inside it
//! - **Invalid filter dates** supplied by the user

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatpulse operations.
///
/// # Example
///
/// ```rust
/// use chatpulse::error::Result;
/// use chatpulse::parser::ParseResult;
///
/// fn load() -> Result<ParseResult> {
///     let parsed = chatpulse::parser::ChatParser::new()
///         .parse_str("[1/15/24, 10:30:00 AM] Alice: Hello");
///     parsed.ensure_not_empty()
/// }
/// # load().unwrap();
/// ```
pub type Result<T> = std::result::Result<T, ChatpulseError>;

/// The error type for all chatpulse operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpulseError {
    /// An I/O error occurred while reading the export or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export contained no line matching any timestamp grammar.
    ///
    /// Raised by [`ParseResult::ensure_not_empty`](crate::parser::ParseResult::ensure_not_empty),
    /// never by the parser itself.
    #[error("No messages recognized. Make sure the file is a WhatsApp chat export (.txt)")]
    NoMessages,

    /// The archive could not be opened or one of its entries could not be read.
    #[error("Could not read archive: {message}")]
    Archive {
        /// Description of what went wrong
        message: String,
    },

    /// The archive was readable but held no chat text file.
    #[error("Archive contains no chat file (.txt); found {} entries", entries.len())]
    NoChatInArchive {
        /// Names of the entries that were present
        entries: Vec<String>,
    },

    /// Invalid date in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatpulseError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatpulseError::Utf8 {
            context: "chat export".to_string(),
            source: err,
        }
    }
}

#[cfg(feature = "archive")]
impl From<zip::result::ZipError> for ChatpulseError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => ChatpulseError::Io(e),
            other => ChatpulseError::archive(other.to_string()),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpulseError {
    /// Creates an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        ChatpulseError::Archive {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatpulseError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpulseError::Io(_))
    }

    /// Returns `true` if the export yielded no records.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatpulseError::NoMessages)
    }

    /// Returns `true` for either archive condition.
    pub fn is_archive(&self) -> bool {
        matches!(
            self,
            ChatpulseError::Archive { .. } | ChatpulseError::NoChatInArchive { .. }
        )
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatpulseError::InvalidDate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatpulseError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_no_messages_is_distinguishable() {
        let err = ChatpulseError::NoMessages;
        assert!(err.is_no_messages());
        assert!(!err.is_archive());
        assert!(err.to_string().contains("No messages recognized"));
    }

    #[test]
    fn test_archive_errors() {
        let err = ChatpulseError::archive("invalid Zip archive");
        assert!(err.is_archive());
        assert!(err.to_string().contains("invalid Zip archive"));

        let err = ChatpulseError::NoChatInArchive {
            entries: vec!["photo.jpg".into(), "voice.opus".into()],
        };
        assert!(err.is_archive());
        assert!(!err.is_no_messages());
        assert!(err.to_string().contains("2 entries"));
    }

    #[test]
    fn test_invalid_date() {
        let err = ChatpulseError::invalid_date("2024/13/45");
        assert!(err.is_invalid_date());
        let display = err.to_string();
        assert!(display.contains("2024/13/45"));
        assert!(display.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_utf8_error() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = ChatpulseError::from(bad);
        assert!(err.to_string().contains("chat export"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatpulseError>();
    }
}
