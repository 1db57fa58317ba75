//! Reading chat text out of `.zip` exports.
//!
//! "Export chat" on a phone produces a zip holding `_chat.txt` (iOS) or
//! `WhatsApp Chat with <name>.txt` (Android), optionally alongside media
//! files. Only the text entry is read.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::error::{ChatpulseError, Result};

/// Opens `path` as a zip archive and returns the chat text it contains.
pub fn read_chat_text(path: &Path) -> Result<String> {
    read_chat_from(File::open(path)?)
}

/// Returns the chat text from an archive held in any seekable reader.
///
/// When several `.txt` entries exist, one named like a WhatsApp export is
/// preferred; otherwise the first one in archive order is used.
pub fn read_chat_from<R: Read + Seek>(reader: R) -> Result<String> {
    let mut archive = ZipArchive::new(reader)?;
    let entries: Vec<String> = archive.file_names().map(String::from).collect();

    let Some(name) = pick_chat_entry(&entries) else {
        return Err(ChatpulseError::NoChatInArchive { entries });
    };
    debug!(entry = %name, total = entries.len(), "extracting chat entry");

    let mut entry = archive.by_name(&name)?;
    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
    entry.read_to_end(&mut bytes)?;

    String::from_utf8(bytes).map_err(|source| ChatpulseError::Utf8 {
        context: format!("archive entry `{name}`"),
        source,
    })
}

fn pick_chat_entry(entries: &[String]) -> Option<String> {
    let text_entries: Vec<&String> = entries
        .iter()
        .filter(|name| !name.starts_with("__MACOSX/") && !name.ends_with('/'))
        .filter(|name| {
            Path::new(name.as_str())
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();

    text_entries
        .iter()
        .find(|name| {
            let file = name.rsplit('/').next().unwrap_or(name.as_str());
            file.starts_with("_chat") || file.starts_with("WhatsApp Chat")
        })
        .or_else(|| text_entries.first())
        .map(|name| (*name).clone())
}
