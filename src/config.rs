//! Configuration types for the parser and the analytics engine.
//!
//! Both structs are plain data with builder methods and no CLI framework
//! dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::{AnalysisConfig, ParserConfig};
//! use chatpulse::parsing::DateOrder;
//! use std::time::Duration;
//!
//! let parser = ParserConfig::new().with_date_order(DateOrder::MonthDayYear);
//! let analysis = AnalysisConfig::new()
//!     .with_remove_stopwords(false)
//!     .with_conversation_gap(Duration::from_secs(4 * 3600));
//!
//! assert_eq!(parser.date_order, Some(DateOrder::MonthDayYear));
//! assert!(!analysis.remove_stopwords);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parsing::DateOrder;

/// Configuration for export parsing.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::ParserConfig;
///
/// let config = ParserConfig::new().with_skip_system_records(true);
/// assert!(config.skip_system_records);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Force a date order instead of inferring it from the file (default: infer)
    pub date_order: Option<DateOrder>,

    /// Drop system notices from the output (default: false)
    pub skip_system_records: bool,
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the given date order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = Some(order);
        self
    }

    /// Sets whether to drop system notices.
    #[must_use]
    pub fn with_skip_system_records(mut self, skip: bool) -> Self {
        self.skip_system_records = skip;
        self
    }
}

/// Thresholds and list sizes used by the [`Analyzer`](crate::analytics::Analyzer).
///
/// Thresholds are strict: a gap must be *greater than* `conversation_gap`
/// to split conversations, and *greater than* `ghost_threshold` to count as
/// ghosting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Remove stopwords before ranking words (default: true)
    pub remove_stopwords: bool,

    /// Silence that separates two conversations (default: 6 hours)
    pub conversation_gap: Duration,

    /// Reply delay that counts as ghosting (default: 24 hours)
    pub ghost_threshold: Duration,

    /// Samples an hour needs before it can be a "best response hour" (default: 3)
    pub min_hour_samples: usize,

    /// Best response hours reported per participant (default: 3)
    pub best_hours_limit: usize,

    /// Overall top words (default: 30)
    pub top_words: usize,

    /// Top words per participant (default: 20)
    pub top_words_per_participant: usize,

    /// Overall top emojis (default: 20)
    pub top_emojis: usize,

    /// Top emojis per participant (default: 15)
    pub top_emojis_per_participant: usize,

    /// Longest conversation gaps listed (default: 10)
    pub top_gaps: usize,

    /// Longest streaks listed (default: 5)
    pub top_streaks: usize,

    /// Longest ghost periods listed per participant (default: 5)
    pub top_ghosts: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            conversation_gap: Duration::from_secs(6 * 3600),
            ghost_threshold: Duration::from_secs(24 * 3600),
            min_hour_samples: 3,
            best_hours_limit: 3,
            top_words: 30,
            top_words_per_participant: 20,
            top_emojis: 20,
            top_emojis_per_participant: 15,
            top_gaps: 10,
            top_streaks: 5,
            top_ghosts: 5,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to remove stopwords from word rankings.
    #[must_use]
    pub fn with_remove_stopwords(mut self, remove: bool) -> Self {
        self.remove_stopwords = remove;
        self
    }

    /// Sets the silence that separates conversations.
    #[must_use]
    pub fn with_conversation_gap(mut self, gap: Duration) -> Self {
        self.conversation_gap = gap;
        self
    }

    /// Sets the reply delay that counts as ghosting.
    #[must_use]
    pub fn with_ghost_threshold(mut self, threshold: Duration) -> Self {
        self.ghost_threshold = threshold;
        self
    }

    /// Sets the minimum samples for a best-response hour.
    #[must_use]
    pub fn with_min_hour_samples(mut self, samples: usize) -> Self {
        self.min_hour_samples = samples;
        self
    }

    /// Sets the overall and per-participant word list sizes.
    #[must_use]
    pub fn with_top_words(mut self, overall: usize, per_participant: usize) -> Self {
        self.top_words = overall;
        self.top_words_per_participant = per_participant;
        self
    }

    /// Sets the overall and per-participant emoji list sizes.
    #[must_use]
    pub fn with_top_emojis(mut self, overall: usize, per_participant: usize) -> Self {
        self.top_emojis = overall;
        self.top_emojis_per_participant = per_participant;
        self
    }

    pub(crate) fn conversation_gap_ms(&self) -> i64 {
        self.conversation_gap.as_millis() as i64
    }

    pub(crate) fn ghost_threshold_ms(&self) -> i64 {
        self.ghost_threshold.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.date_order, None);
        assert!(!config.skip_system_records);
    }

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .with_date_order(DateOrder::YearMonthDay)
            .with_skip_system_records(true);
        assert_eq!(config.date_order, Some(DateOrder::YearMonthDay));
        assert!(config.skip_system_records);
    }

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert!(config.remove_stopwords);
        assert_eq!(config.conversation_gap_ms(), 6 * 3600 * 1000);
        assert_eq!(config.ghost_threshold_ms(), 24 * 3600 * 1000);
        assert_eq!(config.min_hour_samples, 3);
        assert_eq!(config.top_words, 30);
        assert_eq!(config.top_words_per_participant, 20);
        assert_eq!(config.top_emojis, 20);
        assert_eq!(config.top_emojis_per_participant, 15);
    }

    #[test]
    fn test_analysis_config_builder() {
        let config = AnalysisConfig::new()
            .with_top_words(10, 5)
            .with_top_emojis(3, 2)
            .with_min_hour_samples(1)
            .with_ghost_threshold(Duration::from_secs(3600));
        assert_eq!(config.top_words, 10);
        assert_eq!(config.top_words_per_participant, 5);
        assert_eq!(config.top_emojis_per_participant, 2);
        assert_eq!(config.min_hour_samples, 1);
        assert_eq!(config.ghost_threshold_ms(), 3_600_000);
    }

    #[test]
    fn test_config_serde() {
        let config = ParserConfig::new().with_date_order(DateOrder::MonthDayYear);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("month_day_year"));
    }
}
