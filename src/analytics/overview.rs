//! Top-level totals.

use std::collections::HashSet;

use serde::Serialize;

use super::Analyzer;
use crate::parser::DateRange;
use crate::parsing::DateFormat;
use crate::stats::round1;

/// Totals for the whole export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// User (non-system) messages
    pub total_messages: usize,
    pub system_messages: usize,
    pub participants: Vec<String>,
    pub date_range: Option<DateRange>,
    pub date_format: DateFormat,
    /// Calendar days with at least one user message
    pub active_days: usize,
    pub messages_per_active_day: f64,
    pub total_words: usize,
    pub total_characters: usize,
    pub media_messages: usize,
}

impl Analyzer<'_> {
    /// Computes the overview block.
    pub fn overview(&self) -> Overview {
        let active_days = self
            .messages
            .iter()
            .map(|r| r.timestamp.date())
            .collect::<HashSet<_>>()
            .len();

        Overview {
            total_messages: self.messages.len(),
            system_messages: self.parsed.system_count(),
            participants: self.parsed.participants.clone(),
            date_range: self.parsed.date_range,
            date_format: self.parsed.date_format,
            active_days,
            messages_per_active_day: if active_days == 0 {
                0.0
            } else {
                round1(self.messages.len() as f64 / active_days as f64)
            },
            total_words: self.messages.iter().map(|r| r.metadata.word_count).sum(),
            total_characters: self.messages.iter().map(|r| r.metadata.char_count).sum(),
            media_messages: self.messages.iter().filter(|r| r.metadata.is_media).count(),
        }
    }
}
