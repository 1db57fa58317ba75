//! Line-level parsing utilities shared by the parser and the filters.
//!
//! - [`timestamp`] - grammar cascade, date-order inference, time resolution
//! - [`content`] - media/deleted/URL/emoji classification of record content

use std::borrow::Cow;

pub mod content;
pub mod timestamp;

pub use timestamp::{
    DateFormat, DateOrder, Header, HeaderKind, TimestampToken, infer_date_format, match_header,
};

/// Removes bidirectional marks and the byte-order mark that iOS exports
/// sprinkle at line starts (notably before media placeholders).
pub fn strip_direction_marks(line: &str) -> Cow<'_, str> {
    let is_mark = |c: char| matches!(c, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{FEFF}');
    if line.contains(is_mark) {
        Cow::Owned(line.chars().filter(|&c| !is_mark(c)).collect())
    } else {
        Cow::Borrowed(line)
    }
}
