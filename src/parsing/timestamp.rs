//! Timestamp grammars and date-order inference.
//!
//! WhatsApp exports come in two device dialects, and each is localized:
//!
//! - iOS: `[15/01/24, 10:30:45] Alice: Hello` (bracketed, colon after the bracket)
//! - Android: `15/01/2024, 10:30 - Alice: Hello` (dash between timestamp and sender)
//!
//! Day and month order depends on the phone's locale and cannot be read off a
//! single line, so it is inferred once per file by [`infer_date_format`] and
//! then passed explicitly to [`TimestampToken::resolve`] for every header.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Whether a header line carries a sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// `timestamp` + `sender:` + content
    Message,
    /// `timestamp` + content (membership changes, encryption notice, ...)
    System,
}

/// Grammar table, tried top to bottom. Message grammars come first, most
/// specific to most permissive, then the system grammars in the same order.
///
/// Every pattern exposes the named groups `date`, `time`, `ampm` (optional)
/// and `content`; message grammars also expose `sender`.
const GRAMMAR_TABLE: &[(&str, HeaderKind, &str)] = &[
    // [15/01/24, 10:30:45 PM] Alice: Hello
    (
        "bracketed",
        HeaderKind::Message,
        r"^\[(?P<date>\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}),\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?\]\s*(?P<sender>[^:]+):\s?(?P<content>.*)$",
    ),
    // 15/01/2024, 10:30 - Alice: Hello
    (
        "dashed",
        HeaderKind::Message,
        r"^(?P<date>\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?\s*[-–—]\s*(?P<sender>[^:]+):\s?(?P<content>.*)$",
    ),
    // 2024-01-15 10:30 - Alice: Hello
    (
        "iso",
        HeaderKind::Message,
        r"^\[?(?P<date>\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?\]?\s*(?:[-–—]\s*)?(?P<sender>[^:]+):\s?(?P<content>.*)$",
    ),
    // (15.1.2024 10.30) Alice: Hello
    (
        "permissive",
        HeaderKind::Message,
        r"^[\[(]?(?P<date>\d{1,4}[/.\-]\s?\d{1,4}[/.\-]\s?\d{1,4})[,.]?\s*(?P<time>\d{1,2}[:.]\d{2}(?:[:.]\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?[\])]?\s*(?:[-–—:]\s*)?(?P<sender>[^:]+):\s?(?P<content>.*)$",
    ),
    // [15/01/24, 10:30:45] Alice added Bob
    (
        "bracketed",
        HeaderKind::System,
        r"^\[(?P<date>\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}),\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?\]\s*(?P<content>.+)$",
    ),
    // 15/01/2024, 10:30 - Alice added Bob
    (
        "dashed",
        HeaderKind::System,
        r"^(?P<date>\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?\s*[-–—]\s*(?P<content>.+)$",
    ),
    // 2024-01-15 10:30 - Alice added Bob
    (
        "iso",
        HeaderKind::System,
        r"^\[?(?P<date>\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?\]?\s*(?:[-–—]\s*)?(?P<content>.+)$",
    ),
    // (15.1.2024 10.30) Alice added Bob
    (
        "permissive",
        HeaderKind::System,
        r"^[\[(]?(?P<date>\d{1,4}[/.\-]\s?\d{1,4}[/.\-]\s?\d{1,4})[,.]?\s*(?P<time>\d{1,2}[:.]\d{2}(?:[:.]\d{2})?)(?:\s?(?P<ampm>[AaPp]\.?\s?[Mm]\.?))?[\])]?\s*(?:[-–—]\s*)?(?P<content>.+)$",
    ),
];

/// A compiled entry of the grammar table.
pub struct Grammar {
    /// Family name, shared by the message and system variant.
    pub family: &'static str,
    /// Which kind of header this grammar recognizes.
    pub kind: HeaderKind,
    regex: Regex,
}

impl Grammar {
    fn captures<'a>(&self, line: &'a str) -> Option<Captures<'a>> {
        self.regex.captures(line)
    }
}

/// All grammars in match order.
pub static GRAMMARS: Lazy<Vec<Grammar>> = Lazy::new(|| {
    GRAMMAR_TABLE
        .iter()
        .map(|&(family, kind, pattern)| Grammar {
            family,
            kind,
            regex: Regex::new(pattern).unwrap(),
        })
        .collect()
});

/// Order of the three numeric date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `DD/MM/YYYY`, also the fallback when a file is ambiguous.
    #[default]
    DayMonthYear,
    /// `MM/DD/YYYY`
    MonthDayYear,
    /// `YYYY-MM-DD`
    YearMonthDay,
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateOrder::DayMonthYear => write!(f, "DD/MM/YYYY"),
            DateOrder::MonthDayYear => write!(f, "MM/DD/YYYY"),
            DateOrder::YearMonthDay => write!(f, "YYYY-MM-DD"),
        }
    }
}

/// Date convention of one export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    /// Field order applied to every timestamp in the file.
    pub order: DateOrder,
    /// Separator taken from the first recognized timestamp.
    pub separator: char,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            order: DateOrder::DayMonthYear,
            separator: '/',
        }
    }
}

impl DateFormat {
    /// Creates a format with the given order and the default `/` separator.
    pub fn new(order: DateOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Returns `true` for largest-unit-first dates.
    pub fn is_iso(&self) -> bool {
        self.order == DateOrder::YearMonthDay
    }
}

/// The unresolved date and time text of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampToken<'a> {
    /// Date text, e.g. `15/01/24`
    pub date: &'a str,
    /// Time text without the meridiem, e.g. `10:30:45`
    pub time: &'a str,
    /// `AM`/`PM` marker in whatever spelling the export used
    pub meridiem: Option<&'a str>,
}

impl TimestampToken<'_> {
    /// The three numeric date fields in written order.
    pub fn date_components(&self) -> Option<[u32; 3]> {
        let mut parts = self
            .date
            .split(['/', '.', '-'])
            .map(|p| p.trim().parse::<u32>());
        let a = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        let c = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some([a, b, c])
    }

    /// The separator character used between date fields.
    pub fn separator(&self) -> Option<char> {
        self.date.chars().find(|c| matches!(c, '/' | '.' | '-'))
    }

    /// Resolves the token to a wall-clock time using the file's date order.
    ///
    /// Returns `None` when a field does not parse or the date/time does not
    /// exist (e.g. month 13 after a wrong order guess).
    pub fn resolve(&self, format: DateFormat) -> Option<NaiveDateTime> {
        let [a, b, c] = self.date_components()?;
        let (day, month, year) = match format.order {
            DateOrder::DayMonthYear => (a, b, c),
            DateOrder::MonthDayYear => (b, a, c),
            DateOrder::YearMonthDay => (c, b, a),
        };
        let year = normalize_year(year);
        let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
        let (hour, minute, second) = parse_time(self.time, self.meridiem)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(date.and_time(time))
    }
}

/// Two-digit years belong to the 2000s.
pub fn normalize_year(year: u32) -> u32 {
    if year < 100 { 2000 + year } else { year }
}

/// Parses `H:MM` or `H:MM:SS` (`.` also accepted as separator) with an
/// optional meridiem, returning 24-hour `(hour, minute, second)`.
///
/// `12 AM` becomes hour 0; `12 PM` stays 12; other PM hours gain 12.
pub fn parse_time(time: &str, meridiem: Option<&str>) -> Option<(u32, u32, u32)> {
    let mut parts = time.split([':', '.']).map(|p| p.trim().parse::<u32>());
    let mut hour = parts.next()?.ok()?;
    let minute = parts.next()?.ok()?;
    let second = match parts.next() {
        Some(s) => s.ok()?,
        None => 0,
    };

    match meridiem.map(normalize_meridiem).as_deref() {
        Some("PM") if hour != 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        _ => {}
    }

    Some((hour, minute, second))
}

/// `a.m.`, `p. m.`, `pm` ... to `AM`/`PM`.
fn normalize_meridiem(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// A recognized header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    /// Message or system header
    pub kind: HeaderKind,
    /// Family of the grammar that matched
    pub family: &'static str,
    /// Unresolved timestamp text
    pub timestamp: TimestampToken<'a>,
    /// Sender, trimmed; `None` for system headers
    pub sender: Option<&'a str>,
    /// Text following the header on the same line
    pub content: &'a str,
}

/// Tries every grammar in order and returns the first acceptable header.
///
/// A system candidate whose content contains a colon is rejected: the colon
/// suggests a `sender:` field that no message grammar could isolate, so the
/// line is left to be treated as a continuation.
pub fn match_header(line: &str) -> Option<Header<'_>> {
    for grammar in GRAMMARS.iter() {
        let Some(caps) = grammar.captures(line) else {
            continue;
        };
        let (Some(date), Some(time)) = (caps.name("date"), caps.name("time")) else {
            continue;
        };
        let content = caps.name("content").map_or("", |m| m.as_str());

        let sender = match grammar.kind {
            HeaderKind::Message => {
                let sender = caps.name("sender").map_or("", |m| m.as_str().trim());
                if sender.is_empty() {
                    continue;
                }
                Some(sender)
            }
            HeaderKind::System => {
                if content.contains(':') {
                    continue;
                }
                None
            }
        };

        return Some(Header {
            kind: grammar.kind,
            family: grammar.family,
            timestamp: TimestampToken {
                date: date.as_str(),
                time: time.as_str(),
                meridiem: caps.name("ampm").map(|m| m.as_str()),
            },
            sender,
            content,
        });
    }
    None
}

/// Infers the date convention from every recognized timestamp in a file.
///
/// - a first field above 31 that looks like a 4-digit year means `YYYY-MM-DD`
/// - a first field above 12 rules out `MM/DD`
/// - a second field above 12 rules out `DD/MM`
/// - nothing conclusive defaults to `DD/MM/YYYY`
///
/// When both of the last two fire (a malformed file), day-first wins.
pub fn infer_date_format<'a, I>(tokens: I) -> DateFormat
where
    I: IntoIterator<Item = TimestampToken<'a>>,
{
    let mut separator = None;
    let mut iso = false;
    let mut first_above_12 = false;
    let mut second_above_12 = false;

    for token in tokens {
        let Some([a, b, _]) = token.date_components() else {
            continue;
        };
        if separator.is_none() {
            separator = token.separator();
        }
        if a > 31 && (1000..=9999).contains(&a) {
            iso = true;
        }
        first_above_12 |= a > 12;
        second_above_12 |= b > 12;
    }

    let order = if iso {
        DateOrder::YearMonthDay
    } else if first_above_12 {
        DateOrder::DayMonthYear
    } else if second_above_12 {
        DateOrder::MonthDayYear
    } else {
        DateOrder::DayMonthYear
    };

    DateFormat {
        order,
        separator: separator.unwrap_or('/'),
    }
}
