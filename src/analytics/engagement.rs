//! How people engage: media, deletions, silences, streaks, bursts, ghosting.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{Analyzer, Breakdown, Share};
use crate::record::{MediaKind, Record};
use crate::stats::{mean, percentage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementMetrics {
    pub media: MediaStats,
    /// Deleted messages, share of the participant's messages
    pub deleted: Breakdown<Share>,
    pub conversation_gaps: ConversationGaps,
    pub streaks: Streaks,
    /// Messages with a link, share of the participant's messages
    pub urls: Breakdown<Share>,
    pub multi_texting: Breakdown<MultiTexting>,
    pub ghosting: Breakdown<Ghosting>,
    /// Conversations ended, share of all conversation endings
    pub conversation_enders: Breakdown<Share>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaStats {
    pub total: usize,
    pub by_kind: Breakdown<usize>,
    pub by_participant: Breakdown<ParticipantMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantMedia {
    pub total: usize,
    pub by_kind: Breakdown<usize>,
}

/// A silence between two user messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub duration_ms: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationGaps {
    pub count: usize,
    pub longest: Option<Gap>,
    pub mean_ms: f64,
    /// Longest gaps first
    pub top: Vec<Gap>,
}

/// A run of consecutive calendar days with at least one message each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Streaks {
    pub longest: Option<Streak>,
    pub count: usize,
    /// Longest streaks first
    pub top: Vec<Streak>,
}

/// Runs of consecutive messages from the same sender.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MultiTexting {
    /// Runs of exactly two
    pub double: usize,
    /// Runs of exactly three
    pub triple: usize,
    /// Runs of four or more
    pub quad_plus: usize,
    pub longest_run: usize,
    /// Share of the participant's messages that belong to a run of two or more
    pub percentage_in_runs: f64,
}

/// A reply that kept the other side waiting past the ghosting threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GhostPeriod {
    /// Sender of the message that went unanswered
    pub waited_on: String,
    pub duration_ms: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ghosting {
    pub count: usize,
    pub longest_ms: i64,
    pub mean_ms: f64,
    /// Longest periods first
    pub top: Vec<GhostPeriod>,
}

impl Analyzer<'_> {
    /// Computes the engagement block.
    pub fn engagement(&self) -> EngagementMetrics {
        EngagementMetrics {
            media: self.media(),
            deleted: self.per_participant(|_, records| {
                Share::of(records.iter().filter(|r| r.metadata.is_deleted).count(), records.len())
            }),
            conversation_gaps: self.conversation_gaps(),
            streaks: self.streaks(),
            urls: self.per_participant(|_, records| {
                Share::of(records.iter().filter(|r| r.metadata.has_url).count(), records.len())
            }),
            multi_texting: self.multi_texting(),
            ghosting: self.ghosting(),
            conversation_enders: self.conversation_enders(),
        }
    }

    fn media(&self) -> MediaStats {
        let by_participant = self.per_participant(|_, records| ParticipantMedia {
            total: records.iter().filter(|r| r.metadata.is_media).count(),
            by_kind: media_by_kind(records),
        });
        MediaStats {
            total: self.messages.iter().filter(|r| r.metadata.is_media).count(),
            by_kind: media_by_kind(&self.messages),
            by_participant,
        }
    }

    fn conversation_gaps(&self) -> ConversationGaps {
        let mut gaps: Vec<Gap> = self
            .transitions()
            .filter(|t| self.is_boundary(t.gap_ms))
            .map(|t| Gap {
                duration_ms: t.gap_ms,
                start: t.prev.timestamp,
                end: t.next.timestamp,
            })
            .collect();
        gaps.sort_by(|a, b| b.duration_ms.cmp(&a.duration_ms));

        let durations: Vec<f64> = gaps.iter().map(|g| g.duration_ms as f64).collect();
        ConversationGaps {
            count: gaps.len(),
            longest: gaps.first().cloned(),
            mean_ms: mean(&durations),
            top: gaps.iter().take(self.config.top_gaps).cloned().collect(),
        }
    }

    fn streaks(&self) -> Streaks {
        let days: BTreeSet<NaiveDate> = self.messages.iter().map(|r| r.timestamp.date()).collect();
        let mut streaks = consecutive_day_runs(&days);
        streaks.sort_by(|a, b| b.days.cmp(&a.days));

        Streaks {
            longest: streaks.first().cloned(),
            count: streaks.len(),
            top: streaks.iter().take(self.config.top_streaks).cloned().collect(),
        }
    }

    fn multi_texting(&self) -> Breakdown<MultiTexting> {
        let runs = sender_runs(&self.messages);
        self.per_participant(|name, records| {
            let mut stats = MultiTexting::default();
            let mut in_runs = 0;
            for &(_, len) in runs.iter().filter(|(sender, _)| *sender == name) {
                stats.longest_run = stats.longest_run.max(len);
                match len {
                    0 | 1 => continue,
                    2 => stats.double += 1,
                    3 => stats.triple += 1,
                    _ => stats.quad_plus += 1,
                }
                in_runs += len;
            }
            stats.percentage_in_runs = percentage(in_runs, records.len());
            stats
        })
    }

    fn ghosting(&self) -> Breakdown<Ghosting> {
        let threshold = self.config.ghost_threshold_ms();
        let periods: Vec<(&str, GhostPeriod)> = self
            .transitions()
            .filter(|t| t.is_response() && t.gap_ms > threshold)
            .map(|t| {
                (
                    t.next.sender.as_str(),
                    GhostPeriod {
                        waited_on: t.prev.sender.clone(),
                        duration_ms: t.gap_ms,
                        start: t.prev.timestamp,
                        end: t.next.timestamp,
                    },
                )
            })
            .collect();

        self.per_participant(|name, _| {
            let mut own: Vec<&GhostPeriod> = periods
                .iter()
                .filter(|(ghoster, _)| *ghoster == name)
                .map(|(_, period)| period)
                .collect();
            own.sort_by(|a, b| b.duration_ms.cmp(&a.duration_ms));

            let durations: Vec<f64> = own.iter().map(|p| p.duration_ms as f64).collect();
            Ghosting {
                count: own.len(),
                longest_ms: own.first().map_or(0, |p| p.duration_ms),
                mean_ms: mean(&durations),
                top: own
                    .into_iter()
                    .take(self.config.top_ghosts)
                    .cloned()
                    .collect(),
            }
        })
    }

    /// A message ends a conversation when it is the last one, or the next
    /// one comes after a boundary gap.
    fn conversation_enders(&self) -> Breakdown<Share> {
        let mut enders: Vec<&str> = self
            .transitions()
            .filter(|t| self.is_boundary(t.gap_ms))
            .map(|t| t.prev.sender.as_str())
            .collect();
        if let Some(last) = self.messages.last() {
            enders.push(last.sender.as_str());
        }

        let total = enders.len();
        self.per_participant(|name, _| {
            Share::of(enders.iter().filter(|&&e| e == name).count(), total)
        })
    }
}

fn media_by_kind(records: &[&Record]) -> Breakdown<usize> {
    MediaKind::all()
        .iter()
        .map(|kind| {
            let count = records
                .iter()
                .filter(|r| r.metadata.is_media && r.metadata.media_kind == *kind)
                .count();
            (kind.as_str().to_string(), count)
        })
        .collect()
}

/// Maximal runs of consecutive days, keeping only runs of two days or more.
/// Returned in calendar order.
fn consecutive_day_runs(days: &BTreeSet<NaiveDate>) -> Vec<Streak> {
    let mut streaks = Vec::new();
    let mut iter = days.iter().copied();
    let Some(first) = iter.next() else {
        return streaks;
    };

    let mut current = Streak {
        start: first,
        end: first,
        days: 1,
    };
    for day in iter {
        if current.end.succ_opt() == Some(day) {
            current.end = day;
            current.days += 1;
        } else {
            let done = std::mem::replace(
                &mut current,
                Streak {
                    start: day,
                    end: day,
                    days: 1,
                },
            );
            if done.days >= 2 {
                streaks.push(done);
            }
        }
    }
    if current.days >= 2 {
        streaks.push(current);
    }
    streaks
}

/// Collapses the message list into `(sender, run length)` pairs.
fn sender_runs<'a>(records: &[&'a Record]) -> Vec<(&'a str, usize)> {
    let mut runs: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match runs.last_mut() {
            Some((sender, len)) if *sender == record.sender => *len += 1,
            _ => runs.push((record.sender.as_str(), 1)),
        }
    }
    runs
}
