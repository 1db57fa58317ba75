//! When people write.
//!
//! All hours are the exporting phone's local wall-clock hours.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Analyzer, Breakdown};
use crate::record::Record;
use crate::stats::percentage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalPatterns {
    /// Messages per hour of day, 0-23
    pub hourly: [usize; 24],
    /// Messages per day of week, 0 = Sunday
    pub daily: [usize; 7],
    pub hourly_by_participant: Breakdown<[usize; 24]>,
    pub daily_by_participant: Breakdown<[usize; 7]>,
    /// Messages per `YYYY-MM`, ascending
    pub monthly: BTreeMap<String, usize>,
    pub peak_hour: usize,
    pub peak_day: usize,
    pub personas: Breakdown<Persona>,
}

/// Share of a participant's messages in each part of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Persona {
    /// 00:00-05:59
    pub night: f64,
    /// 06:00-11:59
    pub morning: f64,
    /// 12:00-17:59
    pub afternoon: f64,
    /// 18:00-23:59
    pub evening: f64,
    pub primary: PersonaKind,
}

/// The part of the day a participant is most active in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaKind {
    NightOwl,
    EarlyBird,
    AfternoonChatter,
    EveningPerson,
}

impl PersonaKind {
    pub fn label(self) -> &'static str {
        match self {
            PersonaKind::NightOwl => "Night Owl",
            PersonaKind::EarlyBird => "Early Bird",
            PersonaKind::AfternoonChatter => "Afternoon Chatter",
            PersonaKind::EveningPerson => "Evening Person",
        }
    }
}

impl std::fmt::Display for PersonaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Analyzer<'_> {
    /// Computes the temporal block.
    pub fn temporal(&self) -> TemporalPatterns {
        let hourly = hourly_counts(&self.messages);
        let daily = daily_counts(&self.messages);

        let mut monthly = BTreeMap::new();
        for record in &self.messages {
            let key = format!("{:04}-{:02}", record.metadata.year, record.metadata.month + 1);
            *monthly.entry(key).or_insert(0) += 1;
        }

        TemporalPatterns {
            peak_hour: argmax(&hourly),
            peak_day: argmax(&daily),
            hourly,
            daily,
            hourly_by_participant: self.per_participant(|_, records| hourly_counts(records)),
            daily_by_participant: self.per_participant(|_, records| daily_counts(records)),
            monthly,
            personas: self.per_participant(|_, records| persona(records)),
        }
    }
}

fn hourly_counts(records: &[&Record]) -> [usize; 24] {
    let mut counts = [0; 24];
    for record in records {
        counts[record.metadata.hour as usize] += 1;
    }
    counts
}

fn daily_counts(records: &[&Record]) -> [usize; 7] {
    let mut counts = [0; 7];
    for record in records {
        counts[record.metadata.day_of_week as usize] += 1;
    }
    counts
}

/// Index of the first maximum.
fn argmax(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

fn persona(records: &[&Record]) -> Persona {
    let mut buckets = [0usize; 4];
    for record in records {
        buckets[(record.metadata.hour / 6) as usize] += 1;
    }

    let primary = match argmax(&buckets) {
        0 => PersonaKind::NightOwl,
        1 => PersonaKind::EarlyBird,
        2 => PersonaKind::AfternoonChatter,
        _ => PersonaKind::EveningPerson,
    };
    let total = records.len();

    Persona {
        night: percentage(buckets[0], total),
        morning: percentage(buckets[1], total),
        afternoon: percentage(buckets[2], total),
        evening: percentage(buckets[3], total),
        primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ChatParser;

    // 2024-01-15 is a Monday
    const CHAT: &str = "\
[15/01/24, 02:00:00] Alice: late
[15/01/24, 02:30:00] Alice: still up
[15/01/24, 09:00:00] Bob: morning
[16/01/24, 21:00:00] Alice: evening
[03/02/24, 21:15:00] Bob: saturday";

    #[test]
    fn test_histograms() {
        let parsed = ChatParser::new().parse_str(CHAT);
        let temporal = Analyzer::with_defaults(&parsed).temporal();
        assert_eq!(temporal.hourly[2], 2);
        assert_eq!(temporal.hourly[21], 2);
        assert_eq!(temporal.daily[1], 3);
        assert_eq!(temporal.daily[2], 1);
        assert_eq!(temporal.daily[6], 1);
        assert_eq!(temporal.hourly_by_participant.get("Bob").unwrap()[9], 1);
        assert_eq!(temporal.daily_by_participant.get("Alice").unwrap()[1], 2);
    }

    #[test]
    fn test_peaks_take_first_maximum() {
        let parsed = ChatParser::new().parse_str(CHAT);
        let temporal = Analyzer::with_defaults(&parsed).temporal();
        assert_eq!(temporal.peak_hour, 2);
        assert_eq!(temporal.peak_day, 1);
        assert_eq!(argmax(&[0, 0, 0]), 0);
    }

    #[test]
    fn test_monthly_keys_sorted() {
        let parsed = ChatParser::new().parse_str(CHAT);
        let temporal = Analyzer::with_defaults(&parsed).temporal();
        let months: Vec<(&str, usize)> =
            temporal.monthly.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(months, vec![("2024-01", 4), ("2024-02", 1)]);
    }

    #[test]
    fn test_personas() {
        let parsed = ChatParser::new().parse_str(CHAT);
        let temporal = Analyzer::with_defaults(&parsed).temporal();

        let alice = temporal.personas.get("Alice").unwrap();
        assert_eq!(alice.primary, PersonaKind::NightOwl);
        assert_eq!(alice.night, 66.7);
        assert_eq!(alice.evening, 33.3);

        // one morning, one evening: the earlier bucket wins the tie
        let bob = temporal.personas.get("Bob").unwrap();
        assert_eq!(bob.primary, PersonaKind::EarlyBird);
        assert_eq!(bob.primary.to_string(), "Early Bird");
    }
}
