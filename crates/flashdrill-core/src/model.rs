//! Core data model types for flashdrill.
//!
//! A deck is nothing more than lines of text; these types give those lines
//! structure once they have been parsed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Language code used when a map has no `E` entry.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Key of the default (base) language in a [`LanguageMap`].
pub const DEFAULT_LANGUAGE_KEY: &str = "E";

/// A single flashcard: the expected answer and the question shown to the user.
///
/// Either side may carry a language tag of the form `CODE:text`. Records have
/// no identity beyond their text, so duplicate lines collapse in sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Record {
    /// Expected answer, as written in the deck.
    pub answer: String,
    /// Question prompt, as written in the deck.
    pub question: String,
}

impl Record {
    pub fn new(answer: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            question: question.into(),
        }
    }

    /// The record with answer and question swapped.
    pub fn reversed(&self) -> Self {
        Self {
            answer: self.question.clone(),
            question: self.answer.clone(),
        }
    }

    /// The raw deck line for this record: `answer<delimiter>question`.
    pub fn to_line(&self, delimiter: &str) -> String {
        format!("{}{delimiter}{}", self.answer, self.question)
    }
}

/// Mapping from single-letter codes to language codes, e.g. `R` → `ru`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageMap(BTreeMap<String, String>);

impl LanguageMap {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }

    /// Look up the language code for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The base language: the `E` entry, or `en` when the map has none.
    pub fn default_code(&self) -> &str {
        self.get(DEFAULT_LANGUAGE_KEY).unwrap_or(FALLBACK_LANGUAGE)
    }

    /// A copy of this map with `key` set to `code`.
    pub fn with_entry(&self, key: impl Into<String>, code: impl Into<String>) -> Self {
        let mut entries = self.0.clone();
        entries.insert(key.into(), code.into());
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Split a `CODE:text` tag off `text`.
    ///
    /// Only codes present in the map count as tags; anything else (including
    /// ordinary colons in the text) leaves the text untouched and resolves to
    /// the default language.
    pub fn resolve<'a>(&'a self, text: &'a str) -> Tagged<'a> {
        if let Some((code, rest)) = text.split_once(':') {
            if let Some(language) = self.get(code.trim()) {
                return Tagged {
                    language,
                    text: rest,
                };
            }
        }
        Tagged {
            language: self.default_code(),
            text,
        }
    }
}

impl Default for LanguageMap {
    fn default() -> Self {
        let entries = [("R", "ru"), ("E", "en"), ("U", "uk"), ("Z", "zh-CN")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self(entries)
    }
}

impl fmt::Display for LanguageMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{}", pairs.join(", "))
    }
}

/// Text with its language tag resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tagged<'a> {
    /// Language code to speak the text in.
    pub language: &'a str,
    /// Text without its tag.
    pub text: &'a str,
}
