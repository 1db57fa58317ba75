//! JSON Lines (JSONL) output of parsed records.
//!
//! One record per line, in input order. Useful for loading an export into
//! other tools without re-implementing the parser.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::error::Result;
use crate::record::Record;

/// Flat record shape for JSONL output.
#[derive(Serialize)]
struct JsonlRecord<'a> {
    timestamp: String,
    sender: &'a str,
    content: &'a str,
    is_system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    deleted: bool,
}

impl<'a> JsonlRecord<'a> {
    fn from_record(record: &'a Record) -> Self {
        Self {
            timestamp: record.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            sender: &record.sender,
            content: &record.content,
            is_system: record.is_system,
            media: record
                .metadata
                .is_media
                .then(|| record.metadata.media_kind.as_str()),
            deleted: record.metadata.is_deleted,
        }
    }
}

/// Writes records to a JSONL file.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2024-01-15T10:30:00","sender":"Alice","content":"Hello","is_system":false}
/// {"timestamp":"2024-01-15T10:31:00","sender":"Bob","content":"image omitted","is_system":false,"media":"image"}
/// ```
pub fn write_jsonl(records: &[Record], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_records(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn records_to_jsonl(records: &[Record]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(records: &[Record], writer: &mut W) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(&JsonlRecord::from_record(record))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ChatParser;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    const CHAT: &str = "\
[15/01/24, 10:30:00] Alice: Hello
second line
[15/01/24, 10:31:00] Bob: image omitted
[15/01/24, 10:32:00] Bob left";

    #[test]
    fn test_write_jsonl_basic() {
        let parsed = ChatParser::new().parse_str(CHAT);

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_jsonl(&parsed.records, path).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 3);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["content"], "Hello\nsecond line");
        assert_eq!(first["timestamp"], "2024-01-15T10:30:00");
        assert!(first.get("media").is_none());

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["media"], "image");

        let third: serde_json::Value = serde_json::from_str(&lines[2]).unwrap();
        assert_eq!(third["is_system"], true);
        assert_eq!(third["sender"], "SYSTEM");
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let parsed = ChatParser::new().parse_str(CHAT);
        let content = records_to_jsonl(&parsed.records).unwrap();
        assert!(!content.starts_with('['));
        assert_eq!(content.lines().count(), 3);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(records_to_jsonl(&[]).unwrap(), "");
    }
}
