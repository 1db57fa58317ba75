//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - what the CLI writes
//! - [`DateOrderArg`] - override for date-order inference
//!
//! # Example
//!
//! ```rust
//! use chatpulse::cli::{Args, OutputFormat};
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatpulse", "chat.txt", "-f", "jsonl"]);
//! assert_eq!(args.format, OutputFormat::Records);
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, ParserConfig};
use crate::core::filter::FilterConfig;
use crate::error::Result;
use crate::parsing::DateOrder;

/// Parse a WhatsApp chat export and print conversation statistics as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse _chat.txt
    chatpulse \"WhatsApp Chat with Bob.zip\" -o summary.json
    chatpulse chat.txt --after 2024-01-01 --before 2024-06-30
    chatpulse chat.txt --format records -o records.jsonl
    chatpulse chat.txt --from Alice --keep-stopwords -v")]
pub struct Args {
    /// Path to the export (.txt, or .zip as produced by \"Export chat\")
    pub input: String,

    /// Path to output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Keep records on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep records on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep only messages from this participant
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Read dates in this order instead of detecting it
    #[arg(long, value_enum, value_name = "ORDER")]
    pub date_order: Option<DateOrderArg>,

    /// Keep stopwords in word rankings
    #[arg(long)]
    pub keep_stopwords: bool,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parser configuration selected by the flags.
    pub fn parser_config(&self) -> ParserConfig {
        let config = ParserConfig::new();
        match self.date_order {
            Some(order) => config.with_date_order(order.into()),
            None => config,
        }
    }

    /// Analysis configuration selected by the flags.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new().with_remove_stopwords(!self.keep_stopwords)
    }

    /// Filter configuration selected by the flags.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`](crate::ChatpulseError::InvalidDate)
    /// for a malformed `--after`/`--before`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        Ok(filter)
    }

    /// Tracing filter directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// What the CLI writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full statistics summary as one JSON document (default)
    #[default]
    Summary,

    /// Parsed records as JSON Lines
    #[value(alias = "jsonl")]
    Records,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "Summary (JSON)"),
            OutputFormat::Records => write!(f, "Records (JSONL)"),
        }
    }
}

/// Date order accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateOrderArg {
    /// DD/MM/YYYY
    Dmy,
    /// MM/DD/YYYY
    Mdy,
    /// YYYY-MM-DD
    Ymd,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> DateOrder {
        match arg {
            DateOrderArg::Dmy => DateOrder::DayMonthYear,
            DateOrderArg::Mdy => DateOrder::MonthDayYear,
            DateOrderArg::Ymd => DateOrder::YearMonthDay,
        }
    }
}
