//! flashdrill-report: what happens after a quiz.
//!
//! Prints the score summary, appends it to the score log and persists the
//! failed records to the error file.

pub mod error_file;
pub mod score_log;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDateTime;

use flashdrill_core::config::Settings;
use flashdrill_core::console::{Console, Tone};
use flashdrill_core::SessionResult;

pub use error_file::{write_error_file, MIX_LABEL, SENTINEL_LABEL};
pub use score_log::{append_score, read_score_log, ScoreEntry};

/// Where and whether results are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub log: bool,
    pub log_file: PathBuf,
    pub error_file: PathBuf,
}

impl From<&Settings> for ReportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            log: settings.log,
            log_file: settings.log_file.clone(),
            error_file: settings.error_file.clone(),
        }
    }
}

/// Report a finished session labelled `label`.
///
/// An empty session reports nothing.
pub fn report_session(
    result: &SessionResult,
    label: &str,
    options: &ReportOptions,
    now: NaiveDateTime,
    console: &mut dyn Console,
) -> Result<()> {
    if result.total == 0 {
        tracing::debug!("nothing asked from {label}, skipping report");
        return Ok(());
    }

    let entry = ScoreEntry {
        timestamp: now,
        label: label.to_string(),
        correct: result.score,
        total: result.total,
    };
    print_summary(&entry, console);

    let self_referential = error_file::is_sentinel(label)
        || error_file::is_error_file(label, &options.error_file);
    if options.log && !self_referential {
        append_score(&options.log_file, &entry)?;
    }

    write_failures(label, &options.error_file, &result.failed, console)
}

fn print_summary(entry: &ScoreEntry, console: &mut dyn Console) {
    console.say(
        &format!("You scored {}/{}", entry.correct, entry.total),
        Tone::Accent,
    );
    console.say(&format!("Percent:{}%", entry.percent()), Tone::Notice);
    console.say(&format!("File:{}", entry.label), Tone::Success);
    console.say(
        &format!("Date:{}", entry.timestamp.format(score_log::TIMESTAMP_FORMAT)),
        Tone::Notice,
    );
}

fn write_failures(
    label: &str,
    error_file: &std::path::Path,
    failed: &BTreeSet<String>,
    console: &mut dyn Console,
) -> Result<()> {
    if let Some(count) = write_error_file(label, error_file, failed)? {
        if !failed.is_empty() {
            console.say(
                &format!("Wrote Errors to {} ({count} lines)", error_file.display()),
                Tone::Accent,
            );
        }
    }
    Ok(())
}
