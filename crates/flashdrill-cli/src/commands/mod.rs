//! Command implementations and the state they share.

pub mod automake;
pub mod check;
pub mod config;
pub mod init;
pub mod ls;
pub mod make;
pub mod quiz;
pub mod shell;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::style::Stylize;

use flashdrill_core::config::{load_settings_from, LoadedSettings, Settings, CONFIG_FILE_NAME};
use flashdrill_core::selector::{list_eligible, Catalog};
use flashdrill_core::DrillError;

/// Settings plus where they live, shared by every command of a run.
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    /// Config file the settings were read from, if any.
    pub source: Option<PathBuf>,
    /// Directory searched for decks besides the working directory.
    pub current_dir: PathBuf,
}

impl Context {
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let LoadedSettings { settings, source } = load_settings_from(config)?;
        Ok(Self {
            settings,
            source,
            current_dir: PathBuf::from("."),
        })
    }

    /// Where settings edits are written.
    pub fn save_path(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| self.current_dir.join(CONFIG_FILE_NAME))
    }

    /// Eligible decks of the current and working directories.
    ///
    /// The config file and score log never count as decks.
    pub fn catalog(&self) -> Result<Catalog> {
        let mut excludes = self.settings.excludes.clone();
        excludes.push(CONFIG_FILE_NAME.to_string());
        excludes.extend(
            self.settings
                .log_file
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string),
        );

        list_eligible(
            &self.current_dir,
            &self.settings.working_dir,
            &excludes,
            &self.settings.excludes_ext,
        )
    }

    /// A path given on the command line, or failing that a listed deck name.
    pub fn resolve(&self, file: &Path) -> Result<PathBuf> {
        if file.is_file() {
            return Ok(file.to_path_buf());
        }
        match file.to_str() {
            Some(name) => self.catalog()?.locate(name),
            None => Err(DrillError::NotFound(file.display().to_string()).into()),
        }
    }

    #[cfg(test)]
    pub fn for_tests(dir: &Path) -> Self {
        let settings = Settings {
            log_file: dir.join("scores.log"),
            error_file: dir.join("_Errors"),
            working_dir: dir.join("working"),
            ..Settings::default()
        };
        Self {
            settings,
            source: None,
            current_dir: dir.to_path_buf(),
        }
    }
}

/// Whether `err` was caused by the console running out of input.
pub fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::UnexpectedEof)
    })
}

/// Print a failed command: expected failures briefly, others with their chain.
pub fn print_error(err: &anyhow::Error) {
    match DrillError::find(err) {
        Some(drill) => eprintln!("{}", drill.to_string().red()),
        None => eprintln!("Error: {err:#}"),
    }
}
