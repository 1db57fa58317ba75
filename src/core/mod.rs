//! Post-parse processing for chatpulse.
//!
//! This module contains:
//! - [`filter`] - date and sender filters, applied by re-parsing
//! - [`output`] - JSON and JSONL writers
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn example() {
//! use chatpulse::core::{FilterConfig, refilter, to_json, write_jsonl};
//! # }
//! ```

pub mod filter;
pub mod output;

pub use filter::{FilterConfig, refilter};

#[cfg(feature = "json-output")]
pub use output::{records_to_jsonl, to_json, write_json, write_jsonl};
