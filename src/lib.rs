//! # Chatpulse
//!
//! Parses WhatsApp chat exports into a structured record log and computes
//! conversation statistics over it.
//!
//! ## Overview
//!
//! Both export dialects are supported, in any locale:
//! - **iOS**: `[15/01/24, 10:30:45 PM] Alice: Hello`
//! - **Android**: `15/01/2024, 22:30 - Alice: Hello`
//!
//! The date order (`DD/MM`, `MM/DD` or ISO) is inferred once per file from all
//! timestamps in it. Multi-line messages, system notices, media placeholders
//! and deleted messages are recognized.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "\
//! [1/15/24, 9:00:00 AM] Alice: Good morning ☀️
//! [1/15/24, 9:04:00 AM] Bob: Morning!
//! [1/15/24, 9:05:00 AM] Bob: Coffee?";
//!
//!     let parsed = ChatParser::new().parse_str(text).ensure_not_empty()?;
//!     let summary = Analyzer::new(&parsed, AnalysisConfig::default()).summary();
//!
//!     assert_eq!(summary.overview.participants, vec!["Alice", "Bob"]);
//!     assert_eq!(summary.messaging.response_times.count, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Filtering
//!
//! A filtered view is a fresh parse of the matching records' source lines,
//! so analytics over it behave exactly as over a smaller export:
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! # fn main() -> Result<()> {
//! # let parsed = ChatParser::new().parse_str("[1/15/24, 9:00:00 AM] Alice: Hi");
//! let only_alice = refilter(&parsed, &FilterConfig::new().with_sender("Alice"));
//! let summary = Analyzer::with_defaults(&only_alice).summary();
//! # assert_eq!(summary.overview.total_messages, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), [`ParseResult`](parser::ParseResult)
//! - [`parsing`] - timestamp grammars, date-order inference, content classification
//! - [`record`] - [`Record`], [`RecordMetadata`](record::RecordMetadata), [`MediaKind`](record::MediaKind)
//! - [`analytics`] - [`Analyzer`](analytics::Analyzer) and the [`AnalysisSummary`](analytics::AnalysisSummary) blocks
//! - [`stats`] - mean, median, mode, percentile, standard deviation
//! - [`lexicon`] - stopwords, media/deleted phrase lists, emoji and URL patterns
//! - [`core`] - [`FilterConfig`](core::FilterConfig), [`refilter`](core::refilter), JSON/JSONL output
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`error`] - [`ChatpulseError`], [`Result`]
//! - `archive` - reading `.zip` exports (feature `archive`)
//! - `cli` - CLI types (feature `cli`)

pub mod analytics;
#[cfg(feature = "archive")]
pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod lexicon;
pub mod parser;
pub mod parsing;
pub mod record;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpulseError, Result};
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;

    pub use crate::error::{ChatpulseError, Result};

    pub use crate::parser::{ChatParser, DateRange, ParseResult};
    pub use crate::parsing::{DateFormat, DateOrder};
    pub use crate::record::{MediaKind, RecordMetadata};

    pub use crate::config::{AnalysisConfig, ParserConfig};

    pub use crate::analytics::{AnalysisSummary, Analyzer};

    pub use crate::core::filter::{FilterConfig, refilter};

    #[cfg(feature = "json-output")]
    pub use crate::core::output::{records_to_jsonl, to_json, write_json, write_jsonl};
}
