//! Error file persistence.
//!
//! Failed records accumulate in a single file that can itself be drilled.
//! Writes merge with what is already there, except for the two cases where
//! the file is rewritten from scratch: sessions labelled with the
//! [`SENTINEL_LABEL`], and sessions drilling the error file itself. Mixed
//! sessions ([`MIX_LABEL`]) leave the file alone.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use flashdrill_core::record::{read_lines, write_lines};

/// Label of sessions built from randomly chosen files.
pub const SENTINEL_LABEL: &str = "random collection";

/// Label of sessions mixing several randomly chosen files.
pub const MIX_LABEL: &str = "random mix";

/// How failures are combined with an existing error file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep existing lines, append unseen failures.
    Merge,
    /// Replace the file with this session's failures.
    Overwrite,
    /// Leave the file untouched.
    Skip,
}

/// Whether `label` is the sentinel, ignoring case.
pub fn is_sentinel(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(SENTINEL_LABEL)
}

/// Whether the session labelled `label` drilled `error_file` itself.
pub fn is_error_file(label: &str, error_file: &Path) -> bool {
    Path::new(label) == error_file || error_file.file_name() == Some(OsStr::new(label))
}

/// Pick the write mode for a session.
pub fn write_mode(label: &str, error_file: &Path) -> WriteMode {
    if label.trim().eq_ignore_ascii_case(MIX_LABEL) {
        WriteMode::Skip
    } else if is_sentinel(label) || is_error_file(label, error_file) {
        WriteMode::Overwrite
    } else {
        WriteMode::Merge
    }
}

/// Persist `failures` to `error_file`; returns the number of lines written,
/// or `None` when there was nothing to write.
pub fn write_error_file(
    label: &str,
    error_file: &Path,
    failures: &BTreeSet<String>,
) -> Result<Option<usize>> {
    let lines: Vec<String> = match write_mode(label, error_file) {
        WriteMode::Skip => return Ok(None),
        WriteMode::Overwrite => failures.iter().cloned().collect(),
        WriteMode::Merge => {
            if failures.is_empty() && !error_file.exists() {
                return Ok(None);
            }
            let existing = if error_file.exists() {
                read_lines(error_file)?
            } else {
                Vec::new()
            };
            merge(existing, failures)
        }
    };

    write_lines(error_file, &lines)?;
    Ok(Some(lines.len()))
}

/// Existing lines in their order without duplicates, then unseen failures.
fn merge(existing: Vec<String>, failures: &BTreeSet<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    existing
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .chain(failures.iter().cloned())
        .filter(|line| seen.insert(line.clone()))
        .collect()
}
