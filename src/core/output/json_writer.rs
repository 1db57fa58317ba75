//! JSON document of an [`AnalysisSummary`].

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::analytics::AnalysisSummary;
use crate::error::Result;

/// Writes the summary to a JSON file.
///
/// # Format
/// ```json
/// {
///   "overview": { "total_messages": 1204, ... },
///   "messaging": { ... },
///   "content": { ... },
///   "temporal": { ... },
///   "engagement": { ... }
/// }
/// ```
pub fn write_json(summary: &AnalysisSummary, output_path: &str, pretty: bool) -> Result<()> {
    let json = to_json(summary, pretty)?;
    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Converts the summary to a JSON string.
///
/// Per-participant maps keep participant order, so two runs over the same
/// export produce byte-identical output.
pub fn to_json(summary: &AnalysisSummary, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)?
    } else {
        serde_json::to_string(summary)?
    };
    Ok(json)
}
