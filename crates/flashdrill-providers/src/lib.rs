//! flashdrill-providers: concrete speech and translation backends.
//!
//! Implements the `Translator` and `Speaker` traits of `flashdrill-core` over
//! Google's public translate endpoints, plus in-memory mocks for tests.

pub mod error;
pub mod google;
pub mod mock;
pub mod speech;

use anyhow::Result;

use flashdrill_core::config::Settings;
use flashdrill_core::traits::{Mute, Speaker, Translator};

pub use error::ProviderError;
pub use google::GoogleTranslator;
pub use mock::{MockTranslator, RecordingSpeaker, SpeechEvent};
pub use speech::{AudibleCue, GoogleSpeaker};

/// The translator configured by `settings`.
pub fn create_translator(settings: &Settings) -> Result<Box<dyn Translator>> {
    Ok(Box::new(GoogleTranslator::new(&settings.translate_url)?))
}

/// The speaker configured by `settings`; a mute one when audio is off.
pub fn create_speaker(settings: &Settings) -> Result<Box<dyn Speaker>> {
    if !settings.audio {
        return Ok(Box::new(Mute));
    }
    Ok(Box::new(GoogleSpeaker::new(
        &settings.speech_url,
        settings.player.clone(),
    )?))
}
