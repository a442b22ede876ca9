//! Delimited-text reader for holding sources.

use csv::{ReaderBuilder, Terminator, Trim};
use log::warn;

/// Splits raw CSV content into rows of trimmed fields.
///
/// Quoted fields may contain the separator. A leading UTF-8 BOM is dropped and
/// invalid UTF-8 is replaced rather than rejected. Blank lines produce no row.
pub fn parse_rows(content: &[u8]) -> Vec<Vec<String>> {
    let content = strip_bom(content);
    let text = match std::str::from_utf8(content) {
        Ok(s) => std::borrow::Cow::Borrowed(s),
        Err(e) => {
            warn!(
                "Invalid UTF-8 at byte {}, some characters will be replaced",
                e.valid_up_to()
            );
            String::from_utf8_lossy(content)
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(|s| s.trim().to_string()).collect()),
            Err(e) => warn!("Failed to read row {}: {}", idx + 1, e),
        }
    }
    rows
}

fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(content)
}
