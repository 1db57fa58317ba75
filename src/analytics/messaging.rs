//! Turn-taking: response times, initiators, message share.
//!
//! A *response* is a pair of adjacent user records from different senders;
//! its latency is attributed to the second sender. Same-sender runs are
//! multi-texting and never produce a latency sample. Pairs whose second
//! timestamp precedes the first (out-of-order exports) are skipped.

use serde::Serialize;

use super::{Analyzer, Breakdown, Share};
use crate::stats::{mean, median, percentile};

const MINUTE_MS: f64 = 60_000.0;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;

/// Histogram bucket labels with their exclusive upper bound in milliseconds.
const RESPONSE_BUCKETS: [(&str, f64); 7] = [
    ("<1min", MINUTE_MS),
    ("1-5min", 5.0 * MINUTE_MS),
    ("5-30min", 30.0 * MINUTE_MS),
    ("30min-1hr", HOUR_MS),
    ("1-6hr", 6.0 * HOUR_MS),
    ("6-24hr", 24.0 * HOUR_MS),
    (">24hr", f64::INFINITY),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagingPatterns {
    pub response_times: ResponseTimes,
    /// Mean response time by the hour of the message being answered
    pub response_by_hour: Breakdown<Vec<HourlyResponse>>,
    /// Fastest hours with enough samples, fastest first
    pub best_response_hours: Breakdown<Vec<HourlyResponse>>,
    /// Conversations started, share of all conversations
    pub initiators: Breakdown<Share>,
    /// Messages sent, share of all user messages
    pub message_share: Breakdown<Share>,
    pub conversations: usize,
    pub avg_messages_per_conversation: f64,
}

/// Latency distribution over all responses. All times in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimes {
    pub count: usize,
    pub mean_ms: f64,
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p25_ms: f64,
    pub p75_ms: f64,
    pub p90_ms: f64,
    pub by_participant: Breakdown<ParticipantResponse>,
    pub histogram: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticipantResponse {
    pub count: usize,
    pub mean_ms: f64,
    pub median_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyResponse {
    pub hour: u32,
    pub mean_ms: f64,
    pub samples: usize,
}

/// One response: who replied, at which hour they were being waited on, and
/// how long it took.
struct ResponseSample<'a> {
    responder: &'a str,
    waiting_hour: u32,
    latency_ms: f64,
}

impl Analyzer<'_> {
    /// Computes the messaging block.
    pub fn messaging(&self) -> MessagingPatterns {
        let samples = self.response_samples();
        let (response_by_hour, best_response_hours) = self.response_hours(&samples);
        let (initiators, conversations) = self.initiators();

        MessagingPatterns {
            response_times: self.response_times(&samples),
            response_by_hour,
            best_response_hours,
            initiators,
            message_share: self.per_participant(|_, records| {
                Share::of(records.len(), self.messages.len())
            }),
            conversations,
            avg_messages_per_conversation: if conversations == 0 {
                0.0
            } else {
                self.messages.len() as f64 / conversations as f64
            },
        }
    }

    fn response_samples(&self) -> Vec<ResponseSample<'_>> {
        self.transitions()
            .filter(|t| t.is_response())
            .map(|t| ResponseSample {
                responder: t.next.sender.as_str(),
                waiting_hour: t.prev.metadata.hour,
                latency_ms: t.gap_ms as f64,
            })
            .collect()
    }

    fn response_times(&self, samples: &[ResponseSample<'_>]) -> ResponseTimes {
        let latencies: Vec<f64> = samples.iter().map(|s| s.latency_ms).collect();

        let mut histogram: Vec<HistogramBucket> = RESPONSE_BUCKETS
            .iter()
            .map(|&(label, _)| HistogramBucket { label, count: 0 })
            .collect();
        for &latency in &latencies {
            if let Some(i) = RESPONSE_BUCKETS.iter().position(|&(_, upper)| latency < upper) {
                histogram[i].count += 1;
            }
        }

        ResponseTimes {
            count: latencies.len(),
            mean_ms: mean(&latencies),
            median_ms: median(&latencies),
            min_ms: latencies.iter().copied().reduce(f64::min).unwrap_or(0.0),
            max_ms: latencies.iter().copied().reduce(f64::max).unwrap_or(0.0),
            p25_ms: percentile(&latencies, 25.0),
            p75_ms: percentile(&latencies, 75.0),
            p90_ms: percentile(&latencies, 90.0),
            by_participant: self.per_participant(|name, _| {
                let own: Vec<f64> = samples
                    .iter()
                    .filter(|s| s.responder == name)
                    .map(|s| s.latency_ms)
                    .collect();
                ParticipantResponse {
                    count: own.len(),
                    mean_ms: mean(&own),
                    median_ms: median(&own),
                }
            }),
            histogram,
        }
    }

    fn response_hours(
        &self,
        samples: &[ResponseSample<'_>],
    ) -> (Breakdown<Vec<HourlyResponse>>, Breakdown<Vec<HourlyResponse>>) {
        let by_hour = self.per_participant(|name, _| {
            let mut hours: [Vec<f64>; 24] = std::array::from_fn(|_| Vec::new());
            for sample in samples.iter().filter(|s| s.responder == name) {
                hours[sample.waiting_hour as usize].push(sample.latency_ms);
            }
            hours
                .iter()
                .enumerate()
                .filter(|(_, latencies)| !latencies.is_empty())
                .map(|(hour, latencies)| HourlyResponse {
                    hour: hour as u32,
                    mean_ms: mean(latencies),
                    samples: latencies.len(),
                })
                .collect::<Vec<_>>()
        });

        let best = by_hour
            .iter()
            .map(|(name, hours)| {
                let mut eligible: Vec<HourlyResponse> = hours
                    .iter()
                    .filter(|h| h.samples >= self.config.min_hour_samples)
                    .copied()
                    .collect();
                eligible.sort_by(|a, b| a.mean_ms.total_cmp(&b.mean_ms));
                eligible.truncate(self.config.best_hours_limit);
                (name.to_string(), eligible)
            })
            .collect();

        (by_hour, best)
    }

    /// Initiations per participant and the number of conversations.
    ///
    /// The first user message opens the first conversation; every boundary
    /// gap opens another.
    fn initiators(&self) -> (Breakdown<Share>, usize) {
        let Some(first) = self.messages.first() else {
            return (self.per_participant(|_, _| Share::default()), 0);
        };

        let mut starters: Vec<&str> = vec![first.sender.as_str()];
        starters.extend(
            self.transitions()
                .filter(|t| self.is_boundary(t.gap_ms))
                .map(|t| t.next.sender.as_str()),
        );

        let conversations = starters.len();
        let initiators = self.per_participant(|name, _| {
            let started = starters.iter().filter(|&&s| s == name).count();
            Share::of(started, conversations)
        });
        (initiators, conversations)
    }
}
