//! Capability traits for speech and machine translation.
//!
//! These are implemented by the `flashdrill-providers` crate; the core only
//! ever sees the traits.

/// Something that can be played back to the user.
pub trait Cue {
    /// Play the cue, blocking until playback finishes.
    fn play(&self) -> anyhow::Result<()>;
}

/// A cue that plays nothing, used when audio is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl Cue for SilentCue {
    fn play(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Text-to-speech backend.
pub trait Speaker {
    /// Build a playable rendering of `text` in `language` (e.g. "ru").
    fn speak(&self, text: &str, language: &str) -> Box<dyn Cue>;
}

/// A speaker that only ever produces silent cues.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mute;

impl Speaker for Mute {
    fn speak(&self, _text: &str, _language: &str) -> Box<dyn Cue> {
        Box::new(SilentCue)
    }
}

/// Machine translation backend.
pub trait Translator {
    /// Translate `text` from `source` to `target` language codes.
    fn translate(&self, text: &str, source: &str, target: &str) -> anyhow::Result<String>;
}
