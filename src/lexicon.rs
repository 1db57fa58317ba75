//! Static reference data used by tokenization and content classification.
//!
//! Everything here is immutable: word sets, phrase lists and the compiled
//! emoji/URL patterns. Nothing in this module depends on a particular parse.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Common words dropped from word-frequency rankings when stopword removal
/// is enabled: English, romanized Hindi/Hinglish, and chat filler.
const STOPWORDS: &[&str] = &[
    // English
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does", "doesn",
    "doing", "don", "dont", "down", "during", "each", "even", "ever", "every", "few", "for",
    "from", "further", "get", "gets", "getting", "going", "gonna", "got", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "im", "in", "into", "is", "isn", "it", "its", "itself", "ive",
    "just", "know", "let", "like", "ll", "me", "more", "most", "much", "must", "my", "myself",
    "no", "nor", "not", "now", "of", "off", "on", "once", "one", "only", "or", "other", "ought",
    "our", "ours", "ourselves", "out", "over", "own", "really", "said", "same", "say", "see",
    "shall", "she", "should", "shouldn", "so", "some", "still", "such", "than", "that", "thats",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "thing",
    "think", "this", "those", "through", "to", "too", "under", "until", "up", "us", "very",
    "want", "was", "wasn", "way", "we", "well", "were", "weren", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "won", "would", "wouldn", "yeah",
    "yes", "yet", "you", "youll", "your", "youre", "yours", "yourself", "yourselves", "youve",
    // Hinglish
    "aap", "abhi", "acha", "accha", "achha", "aur", "bhi", "bas", "hai", "hain", "haan", "han",
    "hi", "ho", "hoga", "hota", "hum", "jo", "ka", "kar", "karna", "kaise", "kab", "ke", "ki",
    "kuch", "kya", "ko", "koi", "kyu", "kyun", "mai", "main", "mein", "mera", "meri", "mujhe",
    "na", "nahi", "nahin", "ne", "pe", "par", "raha", "rahi", "rha", "rhi", "se", "tha", "thi",
    "toh", "tu", "tum", "tera", "teri", "tujhe", "wo", "woh", "ye", "yeh", "yaar",
    // Chat filler and export boilerplate
    "haha", "hahaha", "lol", "lmao", "okay", "ok", "oh", "ohh", "hmm", "hmmm", "umm", "yep",
    "yup", "nope", "pls", "plz", "thx", "http", "https", "www", "com",
];

/// Words left behind by media/deleted placeholders. Always excluded from
/// word rankings, independent of stopword removal.
const MEDIA_BOILERPLATE: &[&str] = &[
    "media", "omitted", "image", "video", "audio", "sticker", "gif", "document", "contact",
    "card", "location", "deleted", "message", "this", "was", "attached", "file", "omitido",
    "omitida", "multimedia", "weggelassen", "medien", "ausgeschlossen", "omis", "absente",
    "oculto", "ocultado", "omessi", "omesso", "omessa", "null", "edited",
];

/// Phrases that mark a message as a media placeholder. Compared against the
/// lowercased message content.
pub const MEDIA_PHRASES: &[&str] = &[
    // English
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "gif omitted",
    "document omitted",
    "contact card omitted",
    "<attached:",
    "live location shared",
    // Spanish
    "<multimedia omitido>",
    "imagen omitida",
    "video omitido",
    "audio omitido",
    "sticker omitido",
    "ubicación en tiempo real compartida",
    // German
    "<medien ausgeschlossen>",
    "bild weggelassen",
    "video weggelassen",
    "audio weggelassen",
    "live-standort geteilt",
    // French
    "<médias omis>",
    "image absente",
    "vidéo absente",
    "audio omis",
    "position en direct partagée",
    // Portuguese
    "<mídia oculta>",
    "imagem ocultada",
    "vídeo oculto",
    "áudio ocultado",
    "localização em tempo real compartilhada",
    // Italian
    "<media omessi>",
    "immagine omessa",
    "video omesso",
    "audio omesso",
    "posizione in tempo reale condivisa",
    // Hindi
    "<मीडिया छोड़ा गया>",
    "<मीडिया के बिना>",
    // Dutch
    "<media weggelaten>",
    "afbeelding weggelaten",
    "video weggelaten",
];

/// Phrases WhatsApp substitutes for a deleted message.
pub const DELETED_PHRASES: &[&str] = &[
    "this message was deleted",
    "you deleted this message",
    "se eliminó este mensaje",
    "eliminaste este mensaje",
    "diese nachricht wurde gelöscht",
    "du hast diese nachricht gelöscht",
    "ce message a été supprimé",
    "vous avez supprimé ce message",
    "mensagem apagada",
    "você apagou esta mensagem",
    "questo messaggio è stato eliminato",
    "hai eliminato questo messaggio",
    "यह संदेश हटा दिया गया",
    "आपने यह संदेश हटाया",
    "dit bericht is verwijderd",
    "je hebt dit bericht verwijderd",
];

/// Attachment file names and bracket tags, e.g.
/// `IMG-20240115-WA0001.jpg (file attached)` or `[image]`.
pub static MEDIA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:\b[\w-]+\.(?:jpe?g|png|webp|heic|gif|mp4|mov|3gp|opus|ogg|mp3|m4a|aac|pdf|docx?|xlsx?|pptx?|vcf)\s*\((?:file attached|archivo adjunto|datei angehängt|fichier joint|arquivo anexado|file allegato|bestand bijgevoegd)\)|^\[(?:image|photo|video|audio|voice|sticker|gif|document|file|contact|location)\]$|^(?:IMG|VID|AUD|PTT|STK|DOC)-\d{8}-WA\d{4}|^(?:live )?(?:location|ubicación|standort|position|localização|posizione|locatie): https?://)",
    )
    .unwrap()
});

/// `http(s)://` and bare `www.` links.
pub static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|www\.)[^\s<>]+").unwrap());

/// Code points in the symbol, pictograph and emoji blocks. Each match is a
/// single code point; joiners and variation selectors are not part of it.
pub static EMOJI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F700}-\x{1F77F}",
        r"\x{1F780}-\x{1F7FF}",
        r"\x{1F800}-\x{1F8FF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA00}-\x{1FA6F}",
        r"\x{1FA70}-\x{1FAFF}",
        r"\x{1F1E6}-\x{1F1FF}",
        r"\x{2600}-\x{26FF}",
        r"\x{2700}-\x{27BF}",
        r"\x{2300}-\x{23FF}",
        r"\x{2B50}\x{2B55}\x{2764}]",
    ))
    .unwrap()
});

static NON_WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

static BOILERPLATE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| MEDIA_BOILERPLATE.iter().copied().collect());

/// Returns `true` if `word` (already lowercased) is in the stopword list.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Returns `true` if `word` (already lowercased) is placeholder vocabulary.
pub fn is_media_boilerplate(word: &str) -> bool {
    BOILERPLATE_SET.contains(word)
}

/// Splits text into ranking tokens.
///
/// Lowercases, removes links and emoji, turns every non-word character into a
/// space, splits on whitespace and drops tokens of two characters or fewer.
/// Media placeholder vocabulary is always removed; stopwords only when
/// `remove_stopwords` is set.
pub fn tokenize(text: &str, remove_stopwords: bool) -> Vec<String> {
    let lower = text.to_lowercase();
    let without_urls = URL_PATTERN.replace_all(&lower, " ");
    let without_emoji = EMOJI_PATTERN.replace_all(&without_urls, "");
    let cleaned = NON_WORD_PATTERN.replace_all(&without_emoji, " ");

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !is_media_boilerplate(token))
        .filter(|token| !remove_stopwords || !is_stopword(token))
        .map(str::to_string)
        .collect()
}

/// Extracts every emoji code point from `text`, in order of appearance.
pub fn extract_emojis(text: &str) -> Vec<&str> {
    EMOJI_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}
