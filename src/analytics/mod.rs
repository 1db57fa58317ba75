//! Derived statistics over a parsed export.
//!
//! An [`Analyzer`] borrows one [`ParseResult`] and computes every block of
//! the [`AnalysisSummary`] from its user (non-system) records. Each block is
//! independent and can be computed on its own:
//!
//! - [`overview`] - totals, participants, date range
//! - [`messaging`] - response times, initiators, message share
//! - [`content`] - words, emojis, message length, punctuation, caps lock
//! - [`temporal`] - hourly/daily/monthly activity, personas
//! - [`engagement`] - media, deletions, gaps, streaks, multi-texting,
//!   ghosting, conversation enders
//!
//! # Example
//!
//! ```rust
//! use chatpulse::analytics::Analyzer;
//! use chatpulse::config::AnalysisConfig;
//! use chatpulse::parser::ChatParser;
//!
//! let parsed = ChatParser::new().parse_str("\
//! [15/01/24, 10:30:00] Alice: Morning!
//! [15/01/24, 10:32:00] Bob: Hey
//! [15/01/24, 10:33:00] Bob: Coffee later?");
//!
//! let summary = Analyzer::new(&parsed, AnalysisConfig::default()).summary();
//! assert_eq!(summary.overview.total_messages, 3);
//! assert_eq!(summary.messaging.response_times.count, 1);
//! assert_eq!(summary.engagement.multi_texting.get("Bob").unwrap().double, 1);
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::AnalysisConfig;
use crate::parser::ParseResult;
use crate::record::Record;

pub mod content;
pub mod engagement;
pub mod messaging;
pub mod overview;
pub mod temporal;

pub use content::ContentAnalysis;
pub use engagement::EngagementMetrics;
pub use messaging::MessagingPatterns;
pub use overview::Overview;
pub use temporal::TemporalPatterns;

/// Everything the analyzer computes for one export.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnalysisSummary {
    pub overview: Overview,
    pub messaging: MessagingPatterns,
    pub content: ContentAnalysis,
    pub temporal: TemporalPatterns,
    pub engagement: EngagementMetrics,
}

/// Computes statistics over the user records of one [`ParseResult`].
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    parsed: &'a ParseResult,
    messages: Vec<&'a Record>,
    by_sender: Vec<(&'a str, Vec<&'a Record>)>,
    config: AnalysisConfig,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer over `parsed`.
    pub fn new(parsed: &'a ParseResult, config: AnalysisConfig) -> Self {
        let messages: Vec<&Record> = parsed.user_records().collect();

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut by_sender: Vec<(&str, Vec<&Record>)> = parsed
            .participants
            .iter()
            .enumerate()
            .map(|(i, p)| {
                index.insert(p.as_str(), i);
                (p.as_str(), Vec::new())
            })
            .collect();
        for &record in &messages {
            if let Some(&i) = index.get(record.sender.as_str()) {
                by_sender[i].1.push(record);
            }
        }

        Self {
            parsed,
            messages,
            by_sender,
            config,
        }
    }

    /// Creates an analyzer with default thresholds.
    pub fn with_defaults(parsed: &'a ParseResult) -> Self {
        Self::new(parsed, AnalysisConfig::default())
    }

    /// Returns the analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Computes every block.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            overview: self.overview(),
            messaging: self.messaging(),
            content: self.content(),
            temporal: self.temporal(),
            engagement: self.engagement(),
        }
    }

    /// Builds a per-participant breakdown in participant order.
    fn per_participant<T>(&self, mut f: impl FnMut(&'a str, &[&'a Record]) -> T) -> Breakdown<T> {
        self.by_sender
            .iter()
            .map(|(name, records)| (name.to_string(), f(*name, records)))
            .collect()
    }

    /// Consecutive pairs of user records with the gap between them.
    fn transitions(&self) -> impl Iterator<Item = Transition<'a>> + '_ {
        self.messages.windows(2).map(|pair| Transition {
            prev: pair[0],
            next: pair[1],
            gap_ms: gap_ms(pair[0].timestamp, pair[1].timestamp),
        })
    }

    /// `true` if a gap separates two conversations.
    fn is_boundary(&self, gap_ms: i64) -> bool {
        gap_ms > self.config.conversation_gap_ms()
    }
}

/// Two adjacent user records.
#[derive(Debug, Clone, Copy)]
struct Transition<'a> {
    prev: &'a Record,
    next: &'a Record,
    gap_ms: i64,
}

impl Transition<'_> {
    /// A reply: adjacent records from different senders, in time order.
    fn is_response(&self) -> bool {
        self.prev.sender != self.next.sender && self.gap_ms >= 0
    }
}

fn gap_ms(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_milliseconds()
}

/// Values keyed by name, in a fixed order (participant order, or media kind
/// order). Serializes as a JSON object that preserves that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown<T>(Vec<(String, T)>);

impl<T> Breakdown<T> {
    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for Breakdown<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> FromIterator<(String, T)> for Breakdown<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for Breakdown<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A count and its share of some total, in percent (one decimal).
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Share {
    pub count: usize,
    pub percentage: f64,
}

impl Share {
    pub fn of(count: usize, total: usize) -> Self {
        Self {
            count,
            percentage: crate::stats::percentage(count, total),
        }
    }
}

/// Frequency table that remembers first-seen order for tie-breaking.
#[derive(Debug, Default)]
struct Frequencies {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl Frequencies {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// The `limit` most frequent keys; equal counts keep first-seen order.
    fn top(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ChatParser;

    #[test]
    fn test_frequencies_tie_break() {
        let mut freq = Frequencies::default();
        for key in ["b", "a", "c", "a", "b", "d"] {
            freq.add(key);
        }
        assert_eq!(freq.total(), 6);
        assert_eq!(
            freq.top(3),
            vec![("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn test_breakdown_serializes_in_order() {
        let breakdown: Breakdown<usize> =
            vec![("Zed".to_string(), 1), ("Amy".to_string(), 2)].into_iter().collect();
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"Zed":1,"Amy":2}"#);
        assert_eq!(breakdown.get("Amy"), Some(&2));
        assert_eq!(breakdown.keys().collect::<Vec<_>>(), vec!["Zed", "Amy"]);
    }

    #[test]
    fn test_analyzer_ignores_system_records() {
        let parsed = ChatParser::new().parse_str(
            "[15/01/24, 10:00:00] Alice: Hi\n[15/01/24, 10:01:00] Bob joined\n[15/01/24, 10:02:00] Bob: Hey",
        );
        let analyzer = Analyzer::with_defaults(&parsed);
        assert_eq!(analyzer.messages.len(), 2);
        assert_eq!(analyzer.transitions().count(), 1);
        assert!(analyzer.transitions().all(|t| t.is_response()));
    }

    #[test]
    fn test_summary_on_empty_result() {
        let parsed = ChatParser::new().parse_str("");
        let summary = Analyzer::with_defaults(&parsed).summary();
        assert_eq!(summary.overview.total_messages, 0);
        assert_eq!(summary.messaging.response_times.count, 0);
        assert!(summary.engagement.streaks.longest.is_none());
    }
}
