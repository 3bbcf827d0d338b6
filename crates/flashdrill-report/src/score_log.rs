//! Append-only score log.
//!
//! One line per quiz: `DD/MM/YYYY HH:MM <label> <correct>/<total> <percent>%`.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

/// `chrono` format of the log timestamp.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Entries at or below this percentage are flagged as weak.
pub const WEAK_PERCENT: u32 = 50;

/// Percentage of `correct` out of `total`, halves rounded to even so older
/// logs keep matching. `total` must be non-zero.
pub fn percent(correct: usize, total: usize) -> u32 {
    ((100.0 / total as f64) * correct as f64).round_ties_even() as u32
}

/// One line of the score log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub timestamp: NaiveDateTime,
    pub label: String,
    pub correct: usize,
    pub total: usize,
}

impl ScoreEntry {
    pub fn percent(&self) -> u32 {
        percent(self.correct, self.total)
    }

    pub fn is_weak(&self) -> bool {
        self.percent() <= WEAK_PERCENT
    }

    /// Parse a log line; `None` for blank or foreign lines.
    pub fn parse(line: &str) -> Option<ScoreEntry> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [date, time, label @ .., score, pct] = tokens.as_slice() else {
            return None;
        };
        if label.is_empty() {
            return None;
        }

        let timestamp =
            NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT).ok()?;
        let (correct, total) = score.split_once('/')?;
        let (correct, total) = (correct.parse::<usize>().ok()?, total.parse::<usize>().ok()?);
        pct.strip_suffix('%')?.parse::<u32>().ok()?;
        if total == 0 {
            return None;
        }

        Some(ScoreEntry {
            timestamp,
            label: label.join(" "),
            correct,
            total,
        })
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{} {}%",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.label,
            self.correct,
            self.total,
            self.percent()
        )
    }
}

/// Append one entry to the log, creating the file if needed.
pub fn append_score(path: &Path, entry: &ScoreEntry) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open score log {}", path.display()))?;
    writeln!(file, "{entry}")
        .with_context(|| format!("failed to append to score log {}", path.display()))?;
    tracing::info!("logged score for {} in {}", entry.label, path.display());
    Ok(())
}

/// All parseable entries of the log, oldest first. A missing log is empty.
pub fn read_score_log(path: &Path) -> Result<Vec<ScoreEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read score log {}", path.display()))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let entry = ScoreEntry::parse(line);
            if entry.is_none() {
                tracing::debug!("skipping unreadable score line: {line}");
            }
            entry
        })
        .collect())
}
