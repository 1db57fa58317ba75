//! Output format writers.
//!
//! - [`write_json`] / [`to_json`] - the full [`AnalysisSummary`](crate::analytics::AnalysisSummary) as one JSON document
//! - [`write_jsonl`] / [`records_to_jsonl`] - parsed records as JSON Lines
//!
//! Both require the `json-output` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatpulse::Result<()> {
//! use chatpulse::analytics::Analyzer;
//! use chatpulse::core::output::{write_json, write_jsonl};
//! use chatpulse::parser::ChatParser;
//!
//! let parsed = ChatParser::new().parse("chat.txt".as_ref())?.ensure_not_empty()?;
//! let summary = Analyzer::with_defaults(&parsed).summary();
//!
//! write_json(&summary, "summary.json", true)?;
//! write_jsonl(&parsed.records, "records.jsonl")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{records_to_jsonl, write_jsonl};
