//! Settings, their TOML file and typed editing.
//!
//! `Settings` is an immutable value: editing a key produces a new value that
//! the caller may save, so no session ever sees settings change under it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::model::LanguageMap;
use crate::session::SessionOptions;

/// Name of the settings file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "flashdrill.toml";

/// flashdrill settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Speak questions and answers.
    #[serde(default)]
    pub audio: bool,
    /// Append a line to the score log after each quiz.
    #[serde(default = "default_true")]
    pub log: bool,
    /// Score log path.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// File collecting wrongly answered records.
    #[serde(default = "default_error_file")]
    pub error_file: PathBuf,
    /// Separator between answer and question.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// File names never offered as decks.
    #[serde(default)]
    pub excludes: Vec<String>,
    /// File name suffixes never offered as decks.
    #[serde(default = "default_excludes_ext")]
    pub excludes_ext: Vec<String>,
    /// Second directory searched for decks, and the source of random picks.
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,
    /// Number of files drawn by a mixed quiz.
    #[serde(default = "default_random_count")]
    pub random_count: usize,
    /// Command (and leading arguments) used to play speech audio.
    #[serde(default = "default_player")]
    pub player: Vec<String>,
    /// Base URL of the translation endpoint.
    #[serde(default = "default_translate_url")]
    pub translate_url: String,
    /// Base URL of the speech endpoint.
    #[serde(default = "default_speech_url")]
    pub speech_url: String,
    /// Language tag table.
    #[serde(default)]
    pub languages: LanguageMap,
}

fn default_true() -> bool {
    true
}
fn default_log_file() -> PathBuf {
    PathBuf::from("scores.log")
}
fn default_error_file() -> PathBuf {
    PathBuf::from("_Errors")
}
fn default_delimiter() -> String {
    "#".to_string()
}
fn default_excludes_ext() -> Vec<String> {
    vec![".py".to_string()]
}
fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_random_count() -> usize {
    3
}
fn default_player() -> Vec<String> {
    vec!["mpg123".to_string(), "-q".to_string()]
}
fn default_translate_url() -> String {
    "https://translate.googleapis.com".to_string()
}
fn default_speech_url() -> String {
    "https://translate.google.com".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio: false,
            log: true,
            log_file: default_log_file(),
            error_file: default_error_file(),
            delimiter: default_delimiter(),
            excludes: Vec::new(),
            excludes_ext: default_excludes_ext(),
            working_dir: default_working_dir(),
            random_count: default_random_count(),
            player: default_player(),
            translate_url: default_translate_url(),
            speech_url: default_speech_url(),
            languages: LanguageMap::default(),
        }
    }
}

/// The editable settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Audio,
    Log,
    LogFile,
    ErrorFile,
    Delimiter,
    Excludes,
    ExcludesExt,
    WorkingDir,
    RandomCount,
    Player,
    TranslateUrl,
    SpeechUrl,
    Languages,
}

impl SettingKey {
    pub const ALL: [SettingKey; 13] = [
        SettingKey::Audio,
        SettingKey::Log,
        SettingKey::LogFile,
        SettingKey::ErrorFile,
        SettingKey::Delimiter,
        SettingKey::Excludes,
        SettingKey::ExcludesExt,
        SettingKey::WorkingDir,
        SettingKey::RandomCount,
        SettingKey::Player,
        SettingKey::TranslateUrl,
        SettingKey::SpeechUrl,
        SettingKey::Languages,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingKey::Audio => "audio",
            SettingKey::Log => "log",
            SettingKey::LogFile => "log_file",
            SettingKey::ErrorFile => "error_file",
            SettingKey::Delimiter => "delimiter",
            SettingKey::Excludes => "excludes",
            SettingKey::ExcludesExt => "excludes_ext",
            SettingKey::WorkingDir => "working_dir",
            SettingKey::RandomCount => "random_count",
            SettingKey::Player => "player",
            SettingKey::TranslateUrl => "translate_url",
            SettingKey::SpeechUrl => "speech_url",
            SettingKey::Languages => "languages",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingKey {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.name() == s.trim().to_lowercase())
            .ok_or_else(|| DrillError::UnknownConfigKey(s.to_string()))
    }
}

fn parse_switch(key: SettingKey, value: &str) -> Result<bool, DrillError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: SettingKey, value: &str) -> DrillError {
    DrillError::InvalidConfigValue {
        key: key.name().to_string(),
        value: value.to_string(),
    }
}

impl Settings {
    /// The read-only view a quiz session needs.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            languages: self.languages.clone(),
            delimiter: self.delimiter.clone(),
            audio: self.audio,
        }
    }

    /// A copy of these settings with one key changed.
    ///
    /// List keys append `value` (and `entry`, when given). `languages` needs
    /// an `entry` naming the tag: `with_value("languages", "fr", Some("F"))`.
    pub fn with_value(&self, key: &str, value: &str, entry: Option<&str>) -> Result<Settings> {
        let key: SettingKey = key.parse()?;
        let mut next = self.clone();

        match key {
            SettingKey::Audio => next.audio = parse_switch(key, value)?,
            SettingKey::Log => next.log = parse_switch(key, value)?,
            SettingKey::LogFile => next.log_file = PathBuf::from(value),
            SettingKey::ErrorFile => next.error_file = PathBuf::from(value),
            SettingKey::WorkingDir => next.working_dir = PathBuf::from(value),
            SettingKey::Delimiter => {
                if value.is_empty() {
                    return Err(invalid(key, value).into());
                }
                next.delimiter = value.to_string();
            }
            SettingKey::Excludes => {
                next.excludes.push(value.to_string());
                next.excludes.extend(entry.map(str::to_string));
            }
            SettingKey::ExcludesExt => {
                next.excludes_ext.push(value.to_string());
                next.excludes_ext.extend(entry.map(str::to_string));
            }
            SettingKey::RandomCount => {
                next.random_count = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or_else(|| invalid(key, value))?;
            }
            SettingKey::Player => {
                let command: Vec<String> = value.split_whitespace().map(str::to_string).collect();
                if command.is_empty() {
                    return Err(invalid(key, value).into());
                }
                next.player = command;
            }
            SettingKey::TranslateUrl => next.translate_url = value.trim_end_matches('/').into(),
            SettingKey::SpeechUrl => next.speech_url = value.trim_end_matches('/').into(),
            SettingKey::Languages => {
                let tag = entry
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .ok_or_else(|| invalid(key, &format!("{value} (missing language key)")))?;
                next.languages = self.languages.with_entry(tag, value);
            }
        }

        Ok(next)
    }

    /// Every key with its current value rendered for display.
    pub fn entries(&self) -> Vec<(SettingKey, String)> {
        SettingKey::ALL
            .into_iter()
            .map(|key| {
                let value = match key {
                    SettingKey::Audio => on_off(self.audio),
                    SettingKey::Log => on_off(self.log),
                    SettingKey::LogFile => self.log_file.display().to_string(),
                    SettingKey::ErrorFile => self.error_file.display().to_string(),
                    SettingKey::Delimiter => self.delimiter.clone(),
                    SettingKey::Excludes => self.excludes.join(" "),
                    SettingKey::ExcludesExt => self.excludes_ext.join(" "),
                    SettingKey::WorkingDir => self.working_dir.display().to_string(),
                    SettingKey::RandomCount => self.random_count.to_string(),
                    SettingKey::Player => self.player.join(" "),
                    SettingKey::TranslateUrl => self.translate_url.clone(),
                    SettingKey::SpeechUrl => self.speech_url.clone(),
                    SettingKey::Languages => self.languages.to_string(),
                };
                (key, value)
            })
            .collect()
    }

    /// Write the settings as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize settings")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        tracing::info!("saved settings to {}", path.display());
        Ok(())
    }
}

fn on_off(flag: bool) -> String {
    let text = if flag { "on" } else { "off" };
    text.to_string()
}

/// Settings together with the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// The file read, or `None` when running on defaults.
    pub source: Option<PathBuf>,
}

impl LoadedSettings {
    /// Where edits should be saved: the file read, else `flashdrill.toml`.
    pub fn save_path(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }
}

/// Load settings from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `flashdrill.toml` in the current directory
/// 2. `~/.config/flashdrill/config.toml`
///
/// Environment overrides: `FLASHDRILL_WORKING_DIR`, `FLASHDRILL_AUDIO`.
pub fn load_settings_from(path: Option<&Path>) -> Result<LoadedSettings> {
    let source = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else {
            global_config_path().filter(|global| global.exists())
        }
    };

    let mut settings = match &source {
        Some(path) => parse_settings(
            &std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?,
        )
        .with_context(|| format!("failed to parse config: {}", path.display()))?,
        None => Settings::default(),
    };

    if let Ok(dir) = std::env::var("FLASHDRILL_WORKING_DIR") {
        settings.working_dir = PathBuf::from(dir);
    }
    if let Ok(audio) = std::env::var("FLASHDRILL_AUDIO") {
        settings.audio = parse_switch(SettingKey::Audio, &audio)?;
    }

    tracing::debug!(source = ?source, "settings loaded");
    Ok(LoadedSettings { settings, source })
}

/// Parse settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(content)?;
    if settings.delimiter.is_empty() {
        return Err(invalid(SettingKey::Delimiter, "").into());
    }
    Ok(settings)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("flashdrill")
            .join("config.toml")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert!(!settings.audio);
        assert!(settings.log);
        assert_eq!(settings.delimiter, "#");
        assert_eq!(settings.excludes_ext, vec![".py"]);
        assert_eq!(settings.random_count, 3);
        assert_eq!(settings.languages.get("R"), Some("ru"));
    }

    #[test]
    fn parse_partial_file_fills_defaults() {
        let settings = parse_settings(
            r#"
audio = true
delimiter = "||"
working_dir = "/tmp/decks"

[languages]
E = "en"
F = "fr"
"#,
        )
        .unwrap();
        assert!(settings.audio);
        assert_eq!(settings.delimiter, "||");
        assert_eq!(settings.log_file, PathBuf::from("scores.log"));
        assert_eq!(settings.languages.get("F"), Some("fr"));
        assert!(!settings.languages.contains_key("R"));
    }

    #[test]
    fn parse_rejects_empty_delimiter() {
        assert!(parse_settings("delimiter = \"\"").is_err());
    }

    #[test]
    fn with_value_returns_new_settings() {
        let settings = Settings::default();
        let updated = settings.with_value("audio", "on", None).unwrap();
        assert!(updated.audio);
        assert!(!settings.audio);
    }

    #[test]
    fn with_value_unknown_key() {
        let err = Settings::default()
            .with_value("colour", "red", None)
            .unwrap_err();
        assert!(matches!(
            DrillError::find(&err),
            Some(DrillError::UnknownConfigKey(key)) if key == "colour"
        ));
    }

    #[test]
    fn with_value_invalid_values() {
        let settings = Settings::default();
        for (key, value) in [
            ("audio", "maybe"),
            ("random_count", "0"),
            ("random_count", "many"),
            ("delimiter", ""),
            ("player", "  "),
        ] {
            let err = settings.with_value(key, value, None).unwrap_err();
            assert!(
                matches!(
                    DrillError::find(&err),
                    Some(DrillError::InvalidConfigValue { .. })
                ),
                "{key}={value:?} should be rejected"
            );
        }
    }

    #[test]
    fn with_value_lists_append() {
        let settings = Settings::default()
            .with_value("excludes", "notes.md", Some("README"))
            .unwrap()
            .with_value("excludes_ext", ".ini", None)
            .unwrap();
        assert_eq!(settings.excludes, vec!["notes.md", "README"]);
        assert_eq!(settings.excludes_ext, vec![".py", ".ini"]);
    }

    #[test]
    fn with_value_languages_needs_entry() {
        let settings = Settings::default();
        assert!(settings.with_value("languages", "fr", None).is_err());
        let updated = settings.with_value("languages", "fr", Some("F")).unwrap();
        assert_eq!(updated.languages.get("F"), Some("fr"));
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("flashdrill.toml");
        let settings = Settings::default()
            .with_value("working_dir", "/srv/decks", None)
            .unwrap()
            .with_value("languages", "fr", Some("F"))
            .unwrap();
        settings.save(&path).unwrap();

        let loaded = load_settings_from(Some(&path)).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.settings.languages, settings.languages);
        assert_eq!(loaded.save_path(), path);
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_settings_from(Some(Path::new("/no/such/flashdrill.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn entries_cover_every_key() {
        let entries = Settings::default().entries();
        assert_eq!(entries.len(), SettingKey::ALL.len());
        assert!(entries
            .iter()
            .any(|(key, value)| *key == SettingKey::Audio && value == "off"));
    }

    #[test]
    fn key_names_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(key.name().parse::<SettingKey>().unwrap(), key);
        }
        assert_eq!("AUDIO".parse::<SettingKey>().unwrap(), SettingKey::Audio);
    }
}
