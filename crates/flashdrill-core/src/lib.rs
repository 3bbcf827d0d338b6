//! flashdrill-core: deck parsing, file selection, quiz sessions and transforms.
//!
//! This crate defines the record model, the quiz state machine and the file
//! transforms that the flashdrill front-end builds on. Speech and translation
//! are reached only through the traits in [`traits`].

pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod record;
pub mod selector;
pub mod session;
pub mod traits;
pub mod transform;
pub mod translate;

pub use error::DrillError;
pub use model::{LanguageMap, Record};
pub use session::{QuizSession, SessionOptions, SessionResult};
