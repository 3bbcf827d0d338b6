//! In-memory providers for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use flashdrill_core::traits::{Cue, Speaker, Translator};

/// A translator answering from a fixed phrase table.
///
/// Phrases missing from the table fail, unless a fallback response is set.
#[derive(Default)]
pub struct MockTranslator {
    responses: HashMap<String, String>,
    fallback: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<(String, String, String)>>,
}

impl MockTranslator {
    /// A translator knowing exactly the `phrase → translation` pairs given.
    pub fn new<I, K, V>(responses: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            responses: responses
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// A translator answering every phrase with `response`.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            fallback: Some(response.to_string()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last `(text, source, target)` translated.
    pub fn last_request(&self) -> Option<(String, String, String)> {
        self.last_request.lock().ok().and_then(|last| last.clone())
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((text.to_string(), source.to_string(), target.to_string()));
        }

        self.responses
            .get(text)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("mock translator has no entry for {text:?}"))
    }
}

/// What a [`RecordingSpeaker`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Spoken { text: String, language: String },
    Played { text: String, language: String },
}

/// A speaker that records every request and playback instead of making sound.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeaker {
    events: Arc<Mutex<Vec<SpeechEvent>>>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SpeechEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Texts played back, in order.
    pub fn played(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SpeechEvent::Played { text, .. } => Some(text),
                SpeechEvent::Spoken { .. } => None,
            })
            .collect()
    }

    fn record(&self, event: SpeechEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

struct RecordedCue {
    text: String,
    language: String,
    speaker: RecordingSpeaker,
}

impl Cue for RecordedCue {
    fn play(&self) -> Result<()> {
        self.speaker.record(SpeechEvent::Played {
            text: self.text.clone(),
            language: self.language.clone(),
        });
        Ok(())
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str, language: &str) -> Box<dyn Cue> {
        self.record(SpeechEvent::Spoken {
            text: text.to_string(),
            language: language.to_string(),
        });
        Box::new(RecordedCue {
            text: text.to_string(),
            language: language.to_string(),
            speaker: self.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use flashdrill_core::console::ScriptedConsole;
    use flashdrill_core::model::Record;
    use flashdrill_core::session::{QuizSession, SessionOptions};

    #[test]
    fn translator_table_and_fallback() {
        let translator = MockTranslator::new([("To speak", "Говорить")]);
        assert_eq!(translator.translate("To speak", "en", "ru").unwrap(), "Говорить");
        assert!(translator.translate("unknown", "en", "ru").is_err());
        assert_eq!(translator.call_count(), 2);
        assert_eq!(
            translator.last_request(),
            Some(("unknown".into(), "en".into(), "ru".into()))
        );

        let fixed = MockTranslator::with_fixed_response("да");
        assert_eq!(fixed.translate("anything", "en", "uk").unwrap(), "да");
    }

    #[test]
    fn speaker_records_session_audio() {
        let speaker = RecordingSpeaker::new();
        let options = SessionOptions {
            audio: true,
            ..SessionOptions::default()
        };
        let mut console = ScriptedConsole::new(["вино"]);
        let mut rng = StdRng::seed_from_u64(0);

        let result = QuizSession::new(&options, &speaker)
            .run(vec![Record::new("R:вино", "E:Wine")], &mut console, &mut rng)
            .unwrap();

        assert_eq!(result.score, 1);
        assert_eq!(speaker.played(), vec!["Wine", "вино"]);
        assert!(speaker.events().contains(&SpeechEvent::Spoken {
            text: "вино".into(),
            language: "ru".into()
        }));
    }
}
