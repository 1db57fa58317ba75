//! The parser's unit of output.
//!
//! A [`Record`] is one logical chat entry: a header line plus any continuation
//! lines that followed it. System notices (membership changes, encryption
//! banner, ...) are records too, with [`SYSTEM_SENDER`] as their sender.
//!
//! # Example
//!
//! ```
//! use chatpulse::record::{MediaKind, Record};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let record = Record::new("Alice", "Check this https://example.com 🎉", ts);
//!
//! assert!(!record.is_system);
//! assert!(record.metadata.has_url);
//! assert!(record.metadata.has_emoji);
//! assert_eq!(record.metadata.media_kind, MediaKind::None);
//! ```

use std::ops::Range;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parsing::content;

/// Sender recorded for non-authored notices.
pub const SYSTEM_SENDER: &str = "SYSTEM";

/// A single chat entry with derived metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Wall-clock time of the header, in the exporting phone's local time.
    pub timestamp: NaiveDateTime,

    /// Display name of the author, or [`SYSTEM_SENDER`].
    pub sender: String,

    /// Message text. Continuation lines are joined with `\n`.
    pub content: String,

    /// `true` iff `sender` is [`SYSTEM_SENDER`].
    pub is_system: bool,

    /// Classification and calendar fields computed from `content` and `timestamp`.
    pub metadata: RecordMetadata,

    /// Zero-based line span of the record in the source text.
    #[serde(skip)]
    pub source_lines: Range<usize>,
}

impl Record {
    /// Creates an authored record and computes its metadata.
    pub fn new(
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        let sender = sender.into();
        let content = content.into();
        let is_system = sender == SYSTEM_SENDER;
        let metadata = content::classify(&content, timestamp);
        Self {
            timestamp,
            sender,
            content,
            is_system,
            metadata,
            source_lines: 0..0,
        }
    }

    /// Creates a system notice.
    pub fn system(content: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self::new(SYSTEM_SENDER, content, timestamp)
    }

    /// Builder method to set the source line span.
    #[must_use]
    pub fn with_source_lines(mut self, lines: Range<usize>) -> Self {
        self.source_lines = lines;
        self
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Kind of attachment a media placeholder stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Sticker,
    Gif,
    Document,
    Contact,
    Location,
    /// Media placeholder that names no type (Android's `<Media omitted>`).
    Other,
    /// Not a media message.
    #[default]
    None,
}

impl MediaKind {
    /// Every media kind, in classification priority order.
    pub fn all() -> &'static [MediaKind] {
        &[
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::Audio,
            MediaKind::Sticker,
            MediaKind::Gif,
            MediaKind::Document,
            MediaKind::Contact,
            MediaKind::Location,
            MediaKind::Other,
        ]
    }

    /// Lowercase label, as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Sticker => "sticker",
            MediaKind::Gif => "gif",
            MediaKind::Document => "document",
            MediaKind::Contact => "contact",
            MediaKind::Location => "location",
            MediaKind::Other => "other",
            MediaKind::None => "none",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived per-record fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Length of the content in characters
    pub char_count: usize,
    /// Whitespace-separated words in the content
    pub word_count: usize,
    pub is_media: bool,
    pub media_kind: MediaKind,
    pub is_deleted: bool,
    pub has_url: bool,
    pub has_emoji: bool,
    /// Number of `?` characters
    pub question_count: usize,
    /// Number of `!` characters
    pub exclamation_count: usize,
    /// Hour of day, 0–23
    pub hour: u32,
    /// Day of week, 0 = Sunday
    pub day_of_week: u32,
    /// Day of month, 1–31
    pub day_of_month: u32,
    /// Month, 0 = January
    pub month: u32,
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        // A Sunday
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(21, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_record_new() {
        let record = Record::new("Alice", "Hello there, how are you?", ts());
        assert_eq!(record.sender(), "Alice");
        assert!(!record.is_system);
        assert_eq!(record.metadata.word_count, 5);
        assert_eq!(record.metadata.question_count, 1);
        assert_eq!(record.metadata.hour, 21);
        assert_eq!(record.metadata.day_of_week, 0);
        assert_eq!(record.metadata.month, 2);
        assert_eq!(record.metadata.day_of_month, 10);
        assert_eq!(record.metadata.year, 2024);
    }

    #[test]
    fn test_system_record() {
        let record = Record::system("Alice added Bob", ts());
        assert!(record.is_system);
        assert_eq!(record.sender(), SYSTEM_SENDER);
    }

    #[test]
    fn test_serialization_skips_source_lines() {
        let record = Record::new("Alice", "Hello", ts()).with_source_lines(3..5);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"sender\":\"Alice\""));
        assert!(json.contains("\"media_kind\":\"none\""));
        assert!(!json.contains("source_lines"));

        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.content, "Hello");
        assert_eq!(parsed.source_lines, 0..0);
    }

    #[test]
    fn test_media_kind_labels() {
        assert_eq!(MediaKind::Gif.to_string(), "gif");
        assert_eq!(MediaKind::all().len(), 9);
        assert!(!MediaKind::all().contains(&MediaKind::None));
    }
}
