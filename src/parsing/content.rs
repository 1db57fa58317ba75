//! Per-record content classification.
//!
//! Media placeholders and deleted-message notices are localized by WhatsApp,
//! so detection runs against the phrase lists in [`lexicon`](crate::lexicon).
//! The media type is a second, ordered keyword pass: the first kind whose
//! keywords appear wins.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::lexicon::{DELETED_PHRASES, EMOJI_PATTERN, MEDIA_PATTERN, MEDIA_PHRASES, URL_PATTERN};
use crate::record::{MediaKind, RecordMetadata};

/// Media kinds with the keywords and file extensions that identify them,
/// in priority order.
const MEDIA_KEYWORDS: &[(MediaKind, &[&str])] = &[
    (
        MediaKind::Image,
        &[
            "image", "imagen", "imagem", "immagine", "bild", "afbeelding", "photo", "foto",
            "img-", ".jpg", ".jpeg", ".png", ".heic",
        ],
    ),
    (
        MediaKind::Video,
        &["video", "vídeo", "vid-", ".mp4", ".mov", ".3gp"],
    ),
    (
        MediaKind::Audio,
        &[
            "audio", "áudio", "voice", "ptt-", "aud-", ".opus", ".ogg", ".mp3", ".m4a", ".aac",
        ],
    ),
    (MediaKind::Sticker, &["sticker", "stk-", ".webp"]),
    (MediaKind::Gif, &["gif"]),
    (
        MediaKind::Document,
        &[
            "document", "documento", "dokument", "doc-", ".pdf", ".doc", ".xls", ".ppt", ".txt",
            ".zip",
        ],
    ),
    (
        MediaKind::Contact,
        &["contact", "contacto", "contato", "kontakt", "contatto", ".vcf"],
    ),
    (
        MediaKind::Location,
        &[
            "location", "ubicación", "standort", "position", "posizione", "localização",
            "locatie", "maps.google", "live location",
        ],
    ),
];

/// Returns `true` if the content is a media placeholder.
pub fn is_media(content: &str) -> bool {
    let lower = content.to_lowercase();
    MEDIA_PHRASES.iter().any(|phrase| lower.contains(phrase))
        || MEDIA_PATTERN.is_match(content.trim())
}

/// Media type of a placeholder; [`MediaKind::Other`] when it names none.
pub fn media_kind(content: &str) -> MediaKind {
    let lower = content.to_lowercase();
    MEDIA_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(MediaKind::Other, |(kind, _)| *kind)
}

/// Returns `true` if the content is a "message deleted" notice.
pub fn is_deleted(content: &str) -> bool {
    let lower = content.to_lowercase();
    DELETED_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Computes the full metadata block for one record.
pub fn classify(content: &str, timestamp: NaiveDateTime) -> RecordMetadata {
    let is_media = is_media(content);
    RecordMetadata {
        char_count: content.chars().count(),
        word_count: content.split_whitespace().count(),
        is_media,
        media_kind: if is_media {
            media_kind(content)
        } else {
            MediaKind::None
        },
        is_deleted: is_deleted(content),
        has_url: URL_PATTERN.is_match(content),
        has_emoji: EMOJI_PATTERN.is_match(content),
        question_count: content.matches('?').count(),
        exclamation_count: content.matches('!').count(),
        hour: timestamp.hour(),
        day_of_week: timestamp.weekday().num_days_from_sunday(),
        day_of_month: timestamp.day(),
        month: timestamp.month0(),
        year: timestamp.year(),
    }
}
