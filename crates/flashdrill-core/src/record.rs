//! Deck line parser and transforms.
//!
//! Turns raw `answer<delimiter>question` lines into [`Record`]s, mirrors them,
//! and writes them back out.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Record;

/// Parse a single raw line.
///
/// Trailing whitespace is trimmed; the line must then split into exactly two
/// parts that are each non-blank.
pub fn parse_line(line: &str, delimiter: &str) -> Option<Record> {
    if delimiter.is_empty() {
        return None;
    }
    let line = line.trim_end();
    let mut parts = line.split(delimiter);
    let answer = parts.next()?;
    let question = parts.next()?;
    if parts.next().is_some() || answer.trim().is_empty() || question.trim().is_empty() {
        return None;
    }
    Some(Record::new(answer, question))
}

/// Parse raw lines into records, silently dropping malformed ones.
pub fn parse<S: AsRef<str>>(lines: &[S], delimiter: &str) -> Vec<Record> {
    lines
        .iter()
        .filter_map(|line| parse_line(line.as_ref(), delimiter))
        .collect()
}

/// Swap answer and question on every record.
pub fn reverse(records: &[Record]) -> Vec<Record> {
    records.iter().map(Record::reversed).collect()
}

/// Render records back into `answer<delimiter>question` lines.
pub fn serialize(records: &[Record], delimiter: &str) -> Vec<String> {
    records.iter().map(|r| r.to_line(delimiter)).collect()
}

/// The inverse dataset: mirrored records first, then the originals.
pub fn compose_inverse(records: &[Record]) -> Vec<Record> {
    let mut composed = reverse(records);
    composed.extend_from_slice(records);
    composed
}

/// A line that [`parse`] would drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWarning {
    /// 1-based line number.
    pub line_number: usize,
    /// The offending line, trailing whitespace trimmed.
    pub line: String,
    /// Why the line is rejected.
    pub message: String,
}

/// Report the non-blank lines of a deck that would be dropped by [`parse`].
pub fn validate<S: AsRef<str>>(lines: &[S], delimiter: &str) -> Vec<LineWarning> {
    let mut warnings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim_end();
        if line.trim().is_empty() || parse_line(line, delimiter).is_some() {
            continue;
        }

        let pieces = if delimiter.is_empty() {
            0
        } else {
            line.split(delimiter).count()
        };
        let message = match pieces {
            0 => "delimiter is empty".to_string(),
            1 => format!("missing delimiter '{delimiter}'"),
            2 => "answer or question is blank".to_string(),
            n => format!("expected 2 parts, found {n}"),
        };
        warnings.push(LineWarning {
            line_number: idx + 1,
            line: line.to_string(),
            message,
        });
    }

    warnings
}

/// Write lines to `dest`, one per line, replacing any existing content.
pub fn write_lines<S: AsRef<str>>(dest: &Path, lines: &[S]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    std::fs::write(dest, content)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    tracing::info!("wrote {} lines to {}", lines.len(), dest.display());
    Ok(())
}

/// Read a file as lines, replacing invalid UTF-8 rather than failing.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}
