//! Filter a parsed export by date range and sender.
//!
//! Filtering never edits a [`ParseResult`] in place. [`refilter`] selects the
//! matching records, rebuilds export text from their source lines and parses
//! that text again, so the filtered view goes through exactly the same code
//! path as the original file. The original date order is forced on the
//! re-parse; a slice of a file may no longer contain the line that made the
//! order unambiguous.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//!
//! # Example
//!
//! ```
//! use chatpulse::core::filter::{FilterConfig, refilter};
//! use chatpulse::parser::ChatParser;
//!
//! # fn main() -> chatpulse::Result<()> {
//! let parsed = ChatParser::new().parse_str("\
//! [3/1/24, 10:00:00 AM] Alice: March
//! [6/15/24, 10:00:00 AM] Bob: June
//! [6/16/24, 9:00:00 AM] Alice: Also June");
//!
//! let config = FilterConfig::new().with_date_from("2024-06-01")?;
//! let june = refilter(&parsed, &config);
//!
//! assert_eq!(june.records.len(), 2);
//! assert_eq!(june.participants, vec!["Bob", "Alice"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive for ASCII characters
//! - System notices pass date filters but are dropped by a sender filter
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::ChatpulseError;
use crate::parser::{ChatParser, ParseResult};
use crate::record::Record;

/// Configuration for filtering records by date and sender.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be kept.
///
/// # Examples
///
/// ```
/// use chatpulse::core::filter::FilterConfig;
///
/// # fn main() -> chatpulse::Result<()> {
/// let by_sender = FilterConfig::new().with_sender("Alice");
///
/// let by_date = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
///
/// assert!(by_sender.is_active());
/// assert!(by_date.has_date_filter());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Keep only records at or after this time.
    pub after: Option<NaiveDateTime>,

    /// Keep only records at or before this time.
    pub before: Option<NaiveDateTime>,

    /// Keep only messages from this sender (case-insensitive).
    pub sender: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive, from 00:00:00).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatpulseError> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive, through 23:59:59).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatpulseError> {
        let end_of_day = parse_date(date_str)?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatpulseError::invalid_date(date_str))?;
        self.before = Some(end_of_day);
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// ```
    /// use chatpulse::core::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_sender("Alice");
    /// ```
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.sender.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the sender filter is active.
    pub fn has_sender_filter(&self) -> bool {
        self.sender.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(ref sender) = self.sender {
            if record.is_system || !record.sender.eq_ignore_ascii_case(sender) {
                return false;
            }
        }
        if self.after.is_some_and(|after| record.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| record.timestamp > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatpulseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatpulseError::invalid_date(date_str))
}

/// Produces a filtered view of `parsed` by re-parsing the source lines of
/// the matching records.
///
/// Returns an unchanged copy when no filter is active.
pub fn refilter(parsed: &ParseResult, config: &FilterConfig) -> ParseResult {
    if !config.is_active() {
        return parsed.clone();
    }

    let text = filtered_text(parsed, config);
    let parser = ChatParser::with_config(
        ParserConfig::new().with_date_order(parsed.date_format.order),
    );
    let result = parser.parse_str(&text);
    debug!(
        before = parsed.records.len(),
        after = result.records.len(),
        "refiltered export"
    );
    result
}

/// Export text made of the source lines of every matching record.
pub fn filtered_text(parsed: &ParseResult, config: &FilterConfig) -> String {
    let lines: Vec<&str> = parsed.raw_content.lines().collect();
    let mut out = String::new();
    for record in parsed.records.iter().filter(|r| config.matches(r)) {
        let end = record.source_lines.end.min(lines.len());
        let start = record.source_lines.start.min(end);
        for line in &lines[start..end] {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    const CHAT: &str = "\
[01/03/24, 10:00:00] Alice: March hello
[15/06/24, 10:00:00] Bob: June hello
with a second line
[15/06/24, 11:00:00] Bob changed the group name
[16/06/24, 09:00:00] alice: lowercase alice";

    fn parsed() -> ParseResult {
        ChatParser::new().parse_str(CHAT)
    }

    #[test]
    fn test_filter_by_sender() {
        let config = FilterConfig::new().with_sender("ALICE");
        let filtered = refilter(&parsed(), &config);
        assert_eq!(filtered.records.len(), 2);
        assert!(filtered.records.iter().all(|r| r.sender.eq_ignore_ascii_case("alice")));
        assert_eq!(filtered.system_count(), 0);
    }

    #[test]
    fn test_filter_by_date_keeps_system_records() {
        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = refilter(&parsed(), &config);
        assert_eq!(filtered.records.len(), 3);
        assert_eq!(filtered.system_count(), 1);
        assert_eq!(filtered.records[0].content, "June hello\nwith a second line");
    }

    #[test]
    fn test_filter_by_date_to_is_inclusive() {
        let config = FilterConfig::new().with_date_to("2024-06-15").unwrap();
        let filtered = refilter(&parsed(), &config);
        assert_eq!(filtered.records.len(), 3);
        assert_eq!(filtered.records.last().unwrap().timestamp.hour(), 11);
    }

    #[test]
    fn test_refilter_forces_original_order() {
        // "3/1/24" alone would be read day-first as 3 January.
        let mdy = ChatParser::new().parse_str(
            "[3/1/24, 10:00:00 AM] Alice: March\n[6/15/24, 10:00:00 AM] Bob: June",
        );
        let config = FilterConfig::new().with_date_to("2024-03-31").unwrap();
        let filtered = refilter(&mdy, &config);
        assert_eq!(filtered.records.len(), 1);
        assert_eq!(filtered.records[0].timestamp.month(), 3);
        assert_eq!(filtered.date_format.order, mdy.date_format.order);
    }

    #[test]
    fn test_inactive_filter_is_identity() {
        let original = parsed();
        assert_eq!(refilter(&original, &FilterConfig::new()), original);
    }

    #[test]
    fn test_combined_filters() {
        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_sender("Bob");
        let filtered = refilter(&parsed(), &config);
        assert_eq!(filtered.records.len(), 1);
        assert_eq!(filtered.participants, vec!["Bob"]);
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatpulseError::InvalidDate { .. })));
    }

    #[test]
    fn test_with_datetime_directly() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let config = FilterConfig::new().with_after(dt);
        assert_eq!(config.after, Some(dt));
        assert!(config.has_date_filter());
        assert!(!config.has_sender_filter());
    }
}
