//! Quiz session engine.
//!
//! Runs one pass over a shuffled deck. Each record goes
//! `Pending → Asking → {Correct, Revealed, Exhausted}`; the asking state is
//! left after at most `1 + MAX_RETRIES` answers.

use std::collections::BTreeSet;
use std::io;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::console::{Console, Tone};
use crate::model::{LanguageMap, Record};
use crate::traits::{Cue, SilentCue, Speaker};

/// Wrong answers tolerated after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Input that reveals the answer instead of guessing.
pub const SHOW_COMMAND: &str = "show";

/// Prompt shown when reading an answer.
pub const ANSWER_PROMPT: &str = "YOUR ANSWER: ";

/// Settings a session reads but never changes.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Language tags to resolve on both sides of each record.
    pub languages: LanguageMap,
    /// Delimiter used to render failed records back into deck lines.
    pub delimiter: String,
    /// Whether cues are spoken.
    pub audio: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            languages: LanguageMap::default(),
            delimiter: "#".to_string(),
            audio: false,
        }
    }
}

/// How a record left the asking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Answered correctly; earns a point.
    Correct,
    /// The user asked to see the answer.
    Revealed,
    /// Every attempt was wrong.
    Exhausted,
}

/// The judgement on a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The record is finished.
    Done(Outcome),
    /// Wrong, ask the same question again.
    Retry,
}

/// Score, total and failed lines of a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResult {
    /// Records answered correctly.
    pub score: usize,
    /// Records asked.
    pub total: usize,
    /// Raw deck lines of every record not answered correctly.
    pub failed: BTreeSet<String>,
}

/// A record prepared for asking: tags resolved, cues built.
pub struct Card {
    record: Record,
    question: String,
    answer: String,
    question_cue: Box<dyn Cue>,
    answer_cue: Box<dyn Cue>,
}

impl Card {
    /// Resolve language tags on both sides and build the cues.
    pub fn new(record: Record, languages: &LanguageMap, speaker: Option<&dyn Speaker>) -> Self {
        let question = languages.resolve(&record.question);
        let answer = languages.resolve(&record.answer);

        let (question_cue, answer_cue): (Box<dyn Cue>, Box<dyn Cue>) = match speaker {
            Some(speaker) => (
                speaker.speak(question.text, question.language),
                speaker.speak(answer.text, answer.language),
            ),
            None => (Box::new(SilentCue), Box::new(SilentCue)),
        };

        let (question, answer) = (question.text.to_string(), answer.text.to_string());
        Self {
            record,
            question,
            answer,
            question_cue,
            answer_cue,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// The question text shown to the user, tag removed.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer text revealed to the user, tag removed.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether `input` matches the answer, ignoring whitespace and case.
    ///
    /// Both the displayed answer and the raw tagged answer are accepted.
    pub fn accepts(&self, input: &str) -> bool {
        let input = normalize(input);
        input == normalize(&self.answer) || input == normalize(&self.record.answer)
    }

    /// Judge one answer given the number of retries already used.
    pub fn judge(&self, input: &str, attempt: u32) -> Verdict {
        if self.accepts(input) {
            Verdict::Done(Outcome::Correct)
        } else if input.trim().eq_ignore_ascii_case(SHOW_COMMAND) {
            Verdict::Done(Outcome::Revealed)
        } else if attempt < MAX_RETRIES {
            Verdict::Retry
        } else {
            Verdict::Done(Outcome::Exhausted)
        }
    }
}

/// Strip all whitespace and lower-case.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// One quiz over a deck.
pub struct QuizSession<'a> {
    options: &'a SessionOptions,
    speaker: &'a dyn Speaker,
}

impl<'a> QuizSession<'a> {
    pub fn new(options: &'a SessionOptions, speaker: &'a dyn Speaker) -> Self {
        Self { options, speaker }
    }

    /// Shuffle `records` and ask each one in turn.
    pub fn run<R: Rng + ?Sized>(
        &self,
        mut records: Vec<Record>,
        console: &mut dyn Console,
        rng: &mut R,
    ) -> Result<SessionResult> {
        records.shuffle(rng);

        let total = records.len();
        let mut result = SessionResult {
            total,
            ..SessionResult::default()
        };
        let speaker = self.options.audio.then_some(self.speaker);

        for (idx, record) in records.into_iter().enumerate() {
            let card = Card::new(record, &self.options.languages, speaker);
            play(card.question_cue.as_ref());

            let outcome = ask(idx + 1, total, &card, console)?;
            tracing::debug!(question = card.question(), ?outcome, "record finished");

            if outcome == Outcome::Correct {
                result.score += 1;
            } else {
                result
                    .failed
                    .insert(card.record().to_line(&self.options.delimiter));
            }
        }

        tracing::debug!(score = result.score, total, "session finished");
        Ok(result)
    }
}

/// Ask a single card until it reaches a terminal outcome.
pub fn ask(
    number: usize,
    total: usize,
    card: &Card,
    console: &mut dyn Console,
) -> io::Result<Outcome> {
    let mut attempt = 0;

    loop {
        console.say(&format!("QUESTION ({number} of {total})"), Tone::Info);
        console.say(card.question(), Tone::Info);
        let input = console.read_line(ANSWER_PROMPT)?;

        match card.judge(&input, attempt) {
            Verdict::Done(Outcome::Correct) => {
                play(card.answer_cue.as_ref());
                console.say("Correct", Tone::Success);
                return Ok(Outcome::Correct);
            }
            Verdict::Done(Outcome::Revealed) => {
                console.say(card.answer(), Tone::Failure);
                play(card.answer_cue.as_ref());
                return Ok(Outcome::Revealed);
            }
            Verdict::Retry => {
                console.say("Wrong", Tone::Failure);
                attempt += 1;
            }
            Verdict::Done(Outcome::Exhausted) => {
                console.say("Wrong", Tone::Failure);
                console.say("Too many attempts! Moving to next question", Tone::Notice);
                play(card.answer_cue.as_ref());
                return Ok(Outcome::Exhausted);
            }
        }
    }
}

fn play(cue: &dyn Cue) {
    if let Err(e) = cue.play() {
        tracing::warn!("audio cue failed: {e:#}");
    }
}
