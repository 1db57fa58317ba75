//! Integration tests: parse real-looking exports end to end and check the
//! statistics computed over them.

use std::fs;

use chatpulse::analytics::temporal::PersonaKind;
use chatpulse::prelude::*;
use chrono::{Datelike, NaiveDate, Timelike};

const IOS_CHAT: &str = "\
[1/15/24, 8:59:00 AM] Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.
[1/15/24, 9:00:00 AM] Alice: Good morning everyone 😂
[1/15/24, 9:02:00 AM] Bob: Morning! Coffee?
[1/15/24, 9:03:00 AM] Bob: image omitted
[1/15/24, 9:10:00 AM] Alice: Sure, the menu is at https://example.com/menu
[1/16/24, 10:00:00 PM] Bob: This message was deleted
[1/16/24, 10:05:00 PM] Alice: Night!
line two
[1/18/24, 7:00:00 AM] Charlie: WHO IS UP";

const ANDROID_CHAT: &str = "\
25/03/2024, 20:40 - Messages and calls are end-to-end encrypted.
25/03/2024, 20:41 - Ana created group \"Viaje\"
25/03/2024, 20:42 - Ana: Hola a todos
25/03/2024, 20:45 - Luis: <Media omitted>
26/03/2024, 09:15 - Luis: Buenos días ☕
26/03/2024, 09:16 - Ana: IMG-20240326-WA0003.jpg (file attached)";

fn parse(text: &str) -> ParseResult {
    ChatParser::new().parse_str(text)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_ios_export_records() {
    let parsed = parse(IOS_CHAT);

    assert_eq!(parsed.records.len(), 8);
    assert_eq!(parsed.system_count(), 1);
    assert_eq!(parsed.participants, vec!["Alice", "Bob", "Charlie"]);
    assert_eq!(parsed.date_format.order, DateOrder::MonthDayYear);

    let night = &parsed.records[6];
    assert_eq!(night.sender, "Alice");
    assert_eq!(night.content, "Night!\nline two");
    assert_eq!(night.timestamp.hour(), 22);
    assert_eq!(night.source_lines, 6..8);

    let range = parsed.date_range.unwrap();
    assert_eq!(range.start.date(), date(2024, 1, 15));
    assert_eq!(range.end.date(), date(2024, 1, 18));
    assert_eq!(range.duration_days, 2);
}

#[test]
fn test_android_export_records() {
    let parsed = parse(ANDROID_CHAT);

    assert_eq!(parsed.date_format.order, DateOrder::DayMonthYear);
    assert_eq!(parsed.date_format.separator, '/');
    assert_eq!(parsed.records.len(), 6);
    assert_eq!(parsed.system_count(), 2);
    assert_eq!(parsed.participants, vec!["Ana", "Luis"]);

    let media: Vec<_> = parsed
        .records
        .iter()
        .filter(|r| r.metadata.is_media)
        .map(|r| r.metadata.media_kind)
        .collect();
    assert_eq!(media, vec![MediaKind::Other, MediaKind::Image]);

    let first = &parsed.records[2];
    assert_eq!(first.timestamp.month(), 3);
    assert_eq!(first.timestamp.day(), 25);
}

#[test]
fn test_metadata_flags() {
    let parsed = parse(IOS_CHAT);
    let records = &parsed.records;

    assert!(records[1].metadata.has_emoji);
    assert_eq!(records[2].metadata.question_count, 1);
    assert_eq!(records[2].metadata.exclamation_count, 1);
    assert!(records[3].metadata.is_media);
    assert_eq!(records[3].metadata.media_kind, MediaKind::Image);
    assert!(records[4].metadata.has_url);
    assert!(records[5].metadata.is_deleted);
    assert_eq!(records[7].metadata.day_of_week, 4); // Thursday, Sunday = 0
}

#[test]
fn test_location_shares_count_as_media() {
    let text = "\
[15/01/24, 10:30:00] Alice: \u{200E}Location: https://maps.google.com/?q=43.2,76.9
[15/01/24, 10:31:00] Bob: Live location shared
[15/01/24, 10:32:00] Alice: what's your location?";
    let parsed = parse(text);
    assert_eq!(parsed.records[0].metadata.media_kind, MediaKind::Location);
    assert_eq!(parsed.records[1].metadata.media_kind, MediaKind::Location);
    assert!(!parsed.records[2].metadata.is_media);

    let media = Analyzer::with_defaults(&parsed).engagement().media;
    assert_eq!(media.total, 2);
    assert_eq!(*media.by_kind.get("location").unwrap(), 2);
}

#[test]
fn test_parse_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("_chat.txt");
    fs::write(&path, ANDROID_CHAT).unwrap();

    let parsed = ChatParser::new().parse(&path).unwrap();
    assert_eq!(parsed, parse(ANDROID_CHAT));
}

#[test]
fn test_parse_zip_export() {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("WhatsApp Chat with Bob.zip");
    {
        let file = fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("IMG-20240115-WA0001.jpg", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"\xff\xd8\xff").unwrap();
        zip.start_file("_chat.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(IOS_CHAT.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    let parsed = ChatParser::new().parse(&path).unwrap();
    assert_eq!(parsed.records.len(), 8);
    assert_eq!(parsed.participants, vec!["Alice", "Bob", "Charlie"]);
}

#[test]
fn test_non_utf8_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, b"[1/15/24, 9:00:00 AM] Alice: \xff\xfe").unwrap();

    let err = ChatParser::new().parse(&path).unwrap_err();
    assert!(matches!(err, ChatpulseError::Utf8 { .. }));
}

// =========================================================================
// Analytics
// =========================================================================

#[test]
fn test_overview() {
    let parsed = parse(IOS_CHAT);
    let summary = Analyzer::with_defaults(&parsed).summary();
    let overview = &summary.overview;

    assert_eq!(overview.total_messages, 7);
    assert_eq!(overview.system_messages, 1);
    assert_eq!(overview.active_days, 3);
    assert_eq!(overview.media_messages, 1);
    assert_eq!(overview.participants, parsed.participants);
}

#[test]
fn test_messaging_patterns() {
    let parsed = parse(IOS_CHAT);
    let messaging = Analyzer::with_defaults(&parsed).messaging();

    // A->B, B->A, A->B (next day), B->A, A->C (two days later)
    assert_eq!(messaging.response_times.count, 5);
    assert_eq!(messaging.response_times.min_ms, 120_000.0);
    assert_eq!(messaging.response_times.median_ms, 420_000.0);

    let alice = messaging.response_times.by_participant.get("Alice").unwrap();
    assert_eq!(alice.count, 2);
    assert_eq!(alice.mean_ms, 360_000.0);

    assert_eq!(messaging.conversations, 3);
    assert_eq!(messaging.avg_messages_per_conversation, 7.0 / 3.0);
    for name in ["Alice", "Bob", "Charlie"] {
        assert_eq!(messaging.initiators.get(name).unwrap().count, 1);
    }

    assert_eq!(messaging.message_share.get("Alice").unwrap().percentage, 42.9);
    assert_eq!(messaging.message_share.get("Charlie").unwrap().percentage, 14.3);
}

#[test]
fn test_content_analysis() {
    let parsed = parse(IOS_CHAT);
    let content = Analyzer::with_defaults(&parsed).content();

    assert_eq!(content.top_words[0].term, "morning");
    assert_eq!(content.top_words[0].count, 2);
    assert!(content.top_words.iter().all(|w| w.term != "omitted"));

    assert_eq!(content.top_emojis[0].term, "😂");
    assert_eq!(*content.emoji_totals.get("Alice").unwrap(), 1);
    assert_eq!(*content.emoji_totals.get("Bob").unwrap(), 0);

    assert_eq!(content.caps_lock.get("Charlie").unwrap().percentage, 100.0);
    assert_eq!(content.caps_lock.get("Bob").unwrap().count, 0);

    let bob = content.punctuation.get("Bob").unwrap();
    assert_eq!(bob.questions, 1);
    assert_eq!(bob.exclamations, 1);
}

#[test]
fn test_temporal_patterns() {
    let parsed = parse(IOS_CHAT);
    let temporal = Analyzer::with_defaults(&parsed).temporal();

    assert_eq!(temporal.hourly[9], 4);
    assert_eq!(temporal.hourly[22], 2);
    assert_eq!(temporal.hourly.iter().sum::<usize>(), 7);
    assert_eq!(temporal.peak_hour, 9);
    assert_eq!(temporal.monthly.get("2024-01"), Some(&7));

    let charlie = temporal.personas.get("Charlie").unwrap();
    assert_eq!(charlie.primary, PersonaKind::EarlyBird);
}

#[test]
fn test_engagement_metrics() {
    let parsed = parse(IOS_CHAT);
    let engagement = Analyzer::with_defaults(&parsed).engagement();

    assert_eq!(engagement.media.total, 1);
    assert_eq!(*engagement.media.by_kind.get("image").unwrap(), 1);
    assert_eq!(engagement.media.by_kind.len(), MediaKind::all().len());
    assert_eq!(engagement.deleted.get("Bob").unwrap().percentage, 33.3);
    assert_eq!(engagement.urls.get("Alice").unwrap().count, 1);

    assert_eq!(engagement.conversation_gaps.count, 2);
    let streak = engagement.streaks.longest.as_ref().unwrap();
    assert_eq!((streak.start, streak.end, streak.days), (date(2024, 1, 15), date(2024, 1, 16), 2));
    assert_eq!(engagement.streaks.count, 1);

    assert_eq!(engagement.multi_texting.get("Bob").unwrap().double, 1);
    assert_eq!(engagement.multi_texting.get("Alice").unwrap().longest_run, 1);

    let bob = engagement.ghosting.get("Bob").unwrap();
    assert_eq!(bob.count, 1);
    assert_eq!(bob.longest_ms, (36 * 60 + 50) * 60 * 1000);
    assert_eq!(bob.top[0].waited_on, "Alice");
    assert_eq!(engagement.ghosting.get("Charlie").unwrap().count, 1);
    assert_eq!(engagement.ghosting.get("Alice").unwrap().count, 0);

    let enders = &engagement.conversation_enders;
    assert_eq!(enders.get("Alice").unwrap().count, 2);
    assert_eq!(enders.get("Charlie").unwrap().count, 1);
    assert_eq!(enders.get("Alice").unwrap().percentage, 66.7);
}

#[test]
fn test_summary_json_shape() {
    let parsed = parse(IOS_CHAT);
    let summary = Analyzer::with_defaults(&parsed).summary();
    let json = to_json(&summary, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for block in ["overview", "messaging", "content", "temporal", "engagement"] {
        assert!(value.get(block).is_some(), "missing block {block}");
    }
    let share = &value["messaging"]["message_share"];
    let keys: Vec<_> = share.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Alice", "Bob", "Charlie"]);
}

// =========================================================================
// Filtering
// =========================================================================

#[test]
fn test_refilter_by_date() {
    let parsed = parse(IOS_CHAT);
    let filter = FilterConfig::new().with_date_from("2024-01-16").unwrap();
    let filtered = refilter(&parsed, &filter);

    assert_eq!(filtered.records.len(), 3);
    assert_eq!(filtered.participants, vec!["Bob", "Alice", "Charlie"]);
    assert_eq!(filtered.records[1].content, "Night!\nline two");
    assert_eq!(filtered.date_format, parsed.date_format);
}

#[test]
fn test_refilter_by_sender() {
    let parsed = parse(IOS_CHAT);
    let filtered = refilter(&parsed, &FilterConfig::new().with_sender("Bob"));

    assert_eq!(filtered.records.len(), 3);
    assert_eq!(filtered.system_count(), 0);
    assert_eq!(filtered.participants, vec!["Bob"]);

    let summary = Analyzer::with_defaults(&filtered).summary();
    assert_eq!(summary.messaging.response_times.count, 0);
}

#[test]
fn test_refilter_keeps_original_untouched() {
    let parsed = parse(IOS_CHAT);
    let before = parsed.clone();
    let _ = refilter(&parsed, &FilterConfig::new().with_sender("Alice"));
    assert_eq!(parsed, before);
}

#[test]
fn test_refilter_to_nothing() {
    let parsed = parse(IOS_CHAT);
    let filtered = refilter(&parsed, &FilterConfig::new().with_sender("Nobody"));
    assert!(filtered.ensure_not_empty().unwrap_err().is_no_messages());
}

// =========================================================================
// Output
// =========================================================================

#[test]
fn test_write_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let parsed = parse(ANDROID_CHAT);
    let summary = Analyzer::with_defaults(&parsed).summary();

    let json_path = dir.path().join("summary.json");
    write_json(&summary, json_path.to_str().unwrap(), true).unwrap();
    let json = fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\n  \"overview\""));

    let jsonl_path = dir.path().join("records.jsonl");
    write_jsonl(&parsed.records, jsonl_path.to_str().unwrap()).unwrap();
    let jsonl = fs::read_to_string(&jsonl_path).unwrap();
    let lines: Vec<_> = jsonl.lines().collect();
    assert_eq!(lines.len(), 6);

    let media: serde_json::Value = serde_json::from_str(lines[3]).unwrap();
    assert_eq!(media["sender"], "Luis");
    assert_eq!(media["media"], "other");
    assert_eq!(media["timestamp"], "2024-03-25T20:45:00");
}
