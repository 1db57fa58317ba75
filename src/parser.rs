//! WhatsApp export parser.
//!
//! Parsing is two passes over the text:
//!
//! 1. every non-empty line is matched against the grammar cascade and the
//!    date order is inferred from all recognized timestamps;
//! 2. a state machine with one open record walks the lines: a header flushes
//!    the open record and opens a new one, anything else is appended to the
//!    open record as a continuation line.
//!
//! The inferred [`DateFormat`] lives only for the duration of one
//! [`ChatParser::parse_str`] call and is returned in the [`ParseResult`].
//!
//! # Example
//!
//! ```rust
//! use chatpulse::parser::ChatParser;
//!
//! let text = "\
//! [15/01/24, 10:30:00] Alice: Hello
//! [15/01/24, 10:31:00] Bob: Hi Alice!
//! How are you?
//! [15/01/24, 10:32:00] Bob left";
//!
//! let result = ChatParser::new().parse_str(text);
//! assert_eq!(result.records.len(), 3);
//! assert_eq!(result.participants, vec!["Alice", "Bob"]);
//! assert_eq!(result.records[1].content, "Hi Alice!\nHow are you?");
//! assert!(result.records[2].is_system);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::ParserConfig;
use crate::error::{ChatpulseError, Result};
use crate::parsing::{DateFormat, Header, HeaderKind, infer_date_format, match_header, strip_direction_marks};
use crate::record::Record;

/// Parser for WhatsApp TXT exports (iOS and Android dialects).
///
/// The parser holds configuration only; all per-file state is local to a
/// parse call, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses an export from disk.
    ///
    /// `.zip` files are opened as archives when the `archive` feature is
    /// enabled; anything else is read as UTF-8 text.
    pub fn parse(&self, path: &Path) -> Result<ParseResult> {
        let text = read_export(path)?;
        info!(path = %path.display(), bytes = text.len(), "read chat export");
        Ok(self.parse_str(&text))
    }

    /// Parses export text. Never fails; an unrecognized text yields an empty
    /// record list (see [`ParseResult::ensure_not_empty`]).
    pub fn parse_str(&self, content: &str) -> ParseResult {
        let lines: Vec<_> = content.lines().map(strip_direction_marks).collect();
        let headers: Vec<Option<Header<'_>>> = lines
            .iter()
            .map(|line| {
                let line = line.trim();
                if line.is_empty() { None } else { match_header(line) }
            })
            .collect();

        let inferred = infer_date_format(headers.iter().flatten().map(|h| h.timestamp));
        let date_format = match self.config.date_order {
            Some(order) => DateFormat { order, ..inferred },
            None => inferred,
        };
        debug!(
            order = %date_format.order,
            separator = %date_format.separator,
            forced = self.config.date_order.is_some(),
            "date format"
        );

        let mut stream = RecordStream::new(&self.config);
        let mut open: Option<OpenRecord> = None;

        for (idx, (line, header)) in lines.iter().zip(&headers).enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match header {
                Some(header) => {
                    if let Some(done) = open.take() {
                        stream.flush(done);
                    }
                    trace!(line = idx + 1, family = header.family, kind = ?header.kind, "header");
                    open = Some(OpenRecord::from_header(header, date_format, idx));
                }
                None => match open.as_mut() {
                    Some(record) => record.append(line.trim_end(), idx),
                    None => trace!(line = idx + 1, "dropping line before first header"),
                },
            }
        }
        if let Some(done) = open.take() {
            stream.flush(done);
        }

        let result = stream.finish(date_format, content);
        debug!(
            records = result.records.len(),
            participants = result.participants.len(),
            "parsed export"
        );
        result
    }
}

/// A record still accepting continuation lines.
struct OpenRecord {
    sender: Option<String>,
    content: String,
    timestamp: Option<NaiveDateTime>,
    first_line: usize,
    last_line: usize,
}

impl OpenRecord {
    fn from_header(header: &Header<'_>, format: DateFormat, idx: usize) -> Self {
        Self {
            sender: match header.kind {
                HeaderKind::Message => header.sender.map(str::to_string),
                HeaderKind::System => None,
            },
            content: header.content.to_string(),
            timestamp: header.timestamp.resolve(format),
            first_line: idx,
            last_line: idx,
        }
    }

    fn append(&mut self, line: &str, idx: usize) {
        self.content.push('\n');
        self.content.push_str(line);
        self.last_line = idx;
    }
}

/// Accumulates flushed records and the ordered participant set.
struct RecordStream<'c> {
    config: &'c ParserConfig,
    records: Vec<Record>,
    participants: Vec<String>,
    seen: HashSet<String>,
}

impl<'c> RecordStream<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            participants: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn flush(&mut self, open: OpenRecord) {
        let Some(timestamp) = open.timestamp else {
            warn!(
                line = open.first_line + 1,
                "dropping record with unresolvable timestamp"
            );
            return;
        };

        let record = match open.sender {
            Some(sender) => Record::new(sender, open.content, timestamp),
            None => Record::system(open.content, timestamp),
        }
        .with_source_lines(open.first_line..open.last_line + 1);

        if record.is_system {
            if self.config.skip_system_records {
                return;
            }
        } else if self.seen.insert(record.sender.clone()) {
            self.participants.push(record.sender.clone());
        }

        self.records.push(record);
    }

    fn finish(self, date_format: DateFormat, raw: &str) -> ParseResult {
        let date_range = DateRange::from_records(&self.records);
        ParseResult {
            records: self.records,
            participants: self.participants,
            date_range,
            date_format,
            raw_content: raw.to_string(),
        }
    }
}

/// Span of time covered by an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Whole days between `start` and `end`, rounded down.
    pub duration_days: i64,
}

impl DateRange {
    /// Min/max over record timestamps; `None` when there are no records.
    pub fn from_records(records: &[Record]) -> Option<Self> {
        let start = records.iter().map(|r| r.timestamp).min()?;
        let end = records.iter().map(|r| r.timestamp).max()?;
        Some(Self {
            start,
            end,
            duration_days: (end - start).num_days(),
        })
    }
}

/// Output of one parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Records in input order (not re-sorted by timestamp).
    pub records: Vec<Record>,

    /// Distinct non-system senders, in order of first appearance.
    pub participants: Vec<String>,

    /// Earliest and latest record timestamps.
    pub date_range: Option<DateRange>,

    /// Date convention the file was read with.
    pub date_format: DateFormat,

    /// The text this result was parsed from.
    #[serde(skip)]
    pub raw_content: String,
}

impl ParseResult {
    /// Returns `true` if no record was recognized.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turns the empty-result condition into [`ChatpulseError::NoMessages`].
    pub fn ensure_not_empty(self) -> Result<Self> {
        if self.is_empty() {
            return Err(ChatpulseError::NoMessages);
        }
        Ok(self)
    }

    /// Authored (non-system) records, in input order.
    pub fn user_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.is_system)
    }

    /// Number of system notices.
    pub fn system_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_system).count()
    }

    /// Message count per participant, in participant order.
    pub fn messages_by_sender(&self) -> Vec<(String, usize)> {
        self.participants
            .iter()
            .map(|p| {
                let count = self.user_records().filter(|r| &r.sender == p).count();
                (p.clone(), count)
            })
            .collect()
    }
}

fn read_export(path: &Path) -> Result<String> {
    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    if is_zip {
        #[cfg(feature = "archive")]
        return crate::archive::read_chat_text(path);

        #[cfg(not(feature = "archive"))]
        return Err(ChatpulseError::archive(
            "reading .zip exports requires the `archive` feature",
        ));
    }

    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}
