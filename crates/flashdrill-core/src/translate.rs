//! Translation pipeline: plain phrase lists into bilingual decks.
//!
//! A source file holds one phrase per line in the base language. Each phrase
//! is translated, tagged with the target language key and written out as an
//! inverse dataset, so the deck drills both directions.

use std::path::PathBuf;

use anyhow::Result;

use crate::console::Console;
use crate::error::DrillError;
use crate::model::{LanguageMap, Record};
use crate::record::{compose_inverse, read_lines, serialize, write_lines};
use crate::traits::Translator;
use crate::transform::confirm_overwrite;

/// Language that source phrases are written in.
pub const BASE_LANGUAGE: &str = "en";

/// Prefix of the header line declaring the target language.
pub const HEADER_PREFIX: &str = "language";

/// Everything needed to translate one file.
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    pub src: PathBuf,
    pub dest: PathBuf,
    pub languages: LanguageMap,
    pub delimiter: String,
    /// Target language key (`R` or `language=R`); overrides the file header.
    pub language: Option<String>,
    /// Replace an existing destination without asking.
    pub force: bool,
}

/// A resolved target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Key in the language map, e.g. `R`.
    pub key: String,
    /// Language code, e.g. `ru`.
    pub code: String,
}

/// Take the key out of `R` or `language=R`.
fn language_key(spec: &str) -> &str {
    spec.trim()
        .rsplit_once('=')
        .map_or(spec.trim(), |(_, key)| key.trim())
}

/// Resolve a language given on the command line.
pub fn resolve_override(spec: &str, languages: &LanguageMap) -> Result<Target> {
    let key = language_key(spec);
    match languages.get(key) {
        Some(code) => Ok(Target {
            key: key.to_string(),
            code: code.to_string(),
        }),
        None => Err(DrillError::UnknownLanguageKey(key.to_string()).into()),
    }
}

/// Resolve a `language=<key>` header line.
pub fn resolve_header(header: Option<&str>, languages: &LanguageMap) -> Result<Target> {
    let header = header.map(str::trim).unwrap_or_default();
    let Some((name, key)) = header.split_once('=') else {
        return Err(
            DrillError::InvalidHeader("no language defined in file header".into()).into(),
        );
    };
    if name.trim() != HEADER_PREFIX {
        return Err(
            DrillError::InvalidHeader(format!("expected language=<key>, got {header}")).into(),
        );
    }
    let key = key.trim();
    match languages.get(key) {
        Some(code) => Ok(Target {
            key: key.to_string(),
            code: code.to_string(),
        }),
        None => Err(DrillError::InvalidHeader(format!("unknown language key {key}")).into()),
    }
}

/// Upper-case the first character, keeping the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Translate every non-blank phrase into a tagged record.
///
/// Stops at the first failed translation.
pub fn make_translation<S: AsRef<str>>(
    phrases: &[S],
    target: &Target,
    translator: &dyn Translator,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for phrase in phrases {
        let phrase = phrase.as_ref().trim();
        if phrase.is_empty() {
            continue;
        }
        let translated = translator.translate(phrase, BASE_LANGUAGE, &target.code)?;
        tracing::debug!(phrase, translated = translated.as_str(), "translated");
        records.push(Record::new(
            format!("{}:{}", capitalize(&target.key), capitalize(phrase)),
            translated.trim().to_string(),
        ));
    }

    Ok(records)
}

/// Translate `request.src` into a bilingual deck at `request.dest`.
///
/// Nothing is written unless every phrase translated. Returns a status message.
pub fn translate_file(
    request: &TranslateRequest,
    translator: &dyn Translator,
    console: &mut dyn Console,
) -> Result<String> {
    if !request.src.is_file() {
        return Err(DrillError::NotFound(request.src.display().to_string()).into());
    }
    confirm_overwrite(&request.dest, request.force, console)?;

    let lines = read_lines(&request.src)?;
    let (target, phrases) = match &request.language {
        Some(spec) => (resolve_override(spec, &request.languages)?, &lines[..]),
        None => (
            resolve_header(lines.first().map(String::as_str), &request.languages)?,
            lines.get(1..).unwrap_or_default(),
        ),
    };

    tracing::info!(
        "translating {} phrases from {} into {}",
        phrases.len(),
        request.src.display(),
        target.code
    );
    let records = make_translation(phrases, &target, translator)?;
    write_lines(
        &request.dest,
        &serialize(&compose_inverse(&records), &request.delimiter),
    )?;

    Ok(format!(
        "Translated {} and exported as {}",
        request.src.display(),
        request.dest.display()
    ))
}
