//! Drill error types.
//!
//! These are the expected, user-facing failures of the flashdrill operations.
//! Operations return `anyhow::Result` so that I/O failures keep their context
//! chain; front-ends downcast to `DrillError` to tell an expected condition
//! (print a short message, carry on) from an unexpected one.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while selecting, transforming or quizzing decks.
#[derive(Debug, Error)]
pub enum DrillError {
    /// The requested file is absent from both eligible lists, or is a directory.
    #[error("{0} not found")]
    NotFound(String),

    /// The user declined to overwrite an existing destination.
    #[error("refusing to overwrite {}", .0.display())]
    RefusedOverwrite(PathBuf),

    /// A translation source lacks a valid `language=<key>` first line.
    #[error("invalid language header: {0}")]
    InvalidHeader(String),

    /// A language override that is not a key of the language map.
    #[error("unknown language key: {0}")]
    UnknownLanguageKey(String),

    /// A configuration key outside the known set.
    #[error("unknown config key: {0}")]
    UnknownConfigKey(String),

    /// A configuration value that cannot be parsed for its key.
    #[error("invalid value for {key}: {value}")]
    InvalidConfigValue { key: String, value: String },
}

impl DrillError {
    /// Returns the `DrillError` at the root of an `anyhow` chain, if any.
    pub fn find(err: &anyhow::Error) -> Option<&DrillError> {
        err.chain().find_map(|cause| cause.downcast_ref::<DrillError>())
    }
}
