//! What people write: vocabulary, emojis, length, punctuation, shouting.

use serde::Serialize;

use super::{Analyzer, Breakdown, Frequencies, Share};
use crate::lexicon::{extract_emojis, tokenize};
use crate::record::Record;
use crate::stats::{mean, median, round1, standard_deviation};

/// Letters a message needs before it can count as caps lock.
const CAPS_MIN_LETTERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub top_words: Vec<TermCount>,
    pub top_words_by_participant: Breakdown<Vec<TermCount>>,
    pub top_emojis: Vec<TermCount>,
    pub top_emojis_by_participant: Breakdown<Vec<TermCount>>,
    /// Total emojis sent per participant
    pub emoji_totals: Breakdown<usize>,
    pub message_length: MessageLength,
    pub punctuation: Breakdown<Punctuation>,
    pub caps_lock: Breakdown<Share>,
}

/// A word or emoji with its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageLength {
    pub overall: LengthStats,
    /// Population standard deviation of character length
    pub char_std_dev: f64,
    pub by_participant: Breakdown<LengthStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LengthStats {
    pub mean_chars: f64,
    pub median_chars: f64,
    pub mean_words: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Punctuation {
    pub questions: usize,
    pub exclamations: usize,
    pub questions_per_message: f64,
    pub exclamations_per_message: f64,
}

impl Analyzer<'_> {
    /// Computes the content block.
    pub fn content(&self) -> ContentAnalysis {
        let cfg = &self.config;

        let top_words = ranked(&self.word_frequencies(&self.messages), cfg.top_words);
        let top_words_by_participant = self.per_participant(|_, records| {
            ranked(&self.word_frequencies(records), cfg.top_words_per_participant)
        });

        let top_emojis = ranked(&emoji_frequencies(&self.messages), cfg.top_emojis);
        let emoji_stats = self.per_participant(|_, records| {
            let freq = emoji_frequencies(records);
            (freq.total(), ranked(&freq, cfg.top_emojis_per_participant))
        });

        let char_counts = char_counts(&self.messages);

        ContentAnalysis {
            top_words,
            top_words_by_participant,
            top_emojis,
            top_emojis_by_participant: emoji_stats
                .iter()
                .map(|(name, (_, top))| (name.to_string(), top.clone()))
                .collect(),
            emoji_totals: emoji_stats
                .iter()
                .map(|(name, (total, _))| (name.to_string(), *total))
                .collect(),
            message_length: MessageLength {
                overall: length_stats(&self.messages),
                char_std_dev: standard_deviation(&char_counts),
                by_participant: self.per_participant(|_, records| length_stats(records)),
            },
            punctuation: self.per_participant(|_, records| punctuation(records)),
            caps_lock: self.per_participant(|_, records| {
                let shouted = records.iter().filter(|r| is_caps_lock(&r.content)).count();
                Share::of(shouted, records.len())
            }),
        }
    }

    fn word_frequencies(&self, records: &[&Record]) -> Frequencies {
        let mut freq = Frequencies::default();
        for record in records {
            for token in tokenize(&record.content, self.config.remove_stopwords) {
                freq.add(&token);
            }
        }
        freq
    }
}

fn emoji_frequencies(records: &[&Record]) -> Frequencies {
    let mut freq = Frequencies::default();
    for record in records.iter().filter(|r| r.metadata.has_emoji) {
        for emoji in extract_emojis(&record.content) {
            freq.add(emoji);
        }
    }
    freq
}

fn ranked(freq: &Frequencies, limit: usize) -> Vec<TermCount> {
    freq.top(limit)
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect()
}

fn char_counts(records: &[&Record]) -> Vec<f64> {
    records.iter().map(|r| r.metadata.char_count as f64).collect()
}

fn length_stats(records: &[&Record]) -> LengthStats {
    let chars = char_counts(records);
    let words: Vec<f64> = records.iter().map(|r| r.metadata.word_count as f64).collect();
    LengthStats {
        mean_chars: mean(&chars),
        median_chars: median(&chars),
        mean_words: mean(&words),
    }
}

fn punctuation(records: &[&Record]) -> Punctuation {
    let questions: usize = records.iter().map(|r| r.metadata.question_count).sum();
    let exclamations: usize = records.iter().map(|r| r.metadata.exclamation_count).sum();
    let per_message = |count: usize| {
        if records.is_empty() {
            0.0
        } else {
            round1(count as f64 / records.len() as f64)
        }
    };
    Punctuation {
        questions,
        exclamations,
        questions_per_message: per_message(questions),
        exclamations_per_message: per_message(exclamations),
    }
}

/// At least three letters, and more than 70% of them uppercase.
pub fn is_caps_lock(content: &str) -> bool {
    let (letters, upper) = content
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    letters >= CAPS_MIN_LETTERS && upper * 10 > letters * 7
}
