//! The `flashdrill quiz` and `flashdrill mix` commands.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rand::Rng;

use flashdrill_core::console::{Console, Tone};
use flashdrill_core::record::parse;
use flashdrill_core::selector::Catalog;
use flashdrill_core::traits::Speaker;
use flashdrill_core::{QuizSession, SessionResult};
use flashdrill_providers::create_speaker;
use flashdrill_report::{report_session, ReportOptions, MIX_LABEL, SENTINEL_LABEL};

use super::Context;

pub fn execute(ctx: &Context, file: Option<String>, console: &mut dyn Console) -> Result<()> {
    let speaker = create_speaker(&ctx.settings)?;
    let mut rng = rand::thread_rng();

    let (label, lines) = select(&ctx.catalog()?, file.as_deref(), &mut rng, console)?;
    run(ctx, &label, &lines, speaker.as_ref(), console, &mut rng, now())?;
    Ok(())
}

pub fn execute_mix(ctx: &Context, count: Option<usize>, console: &mut dyn Console) -> Result<()> {
    let speaker = create_speaker(&ctx.settings)?;
    let mut rng = rand::thread_rng();

    let count = count.unwrap_or(ctx.settings.random_count);
    let lines = ctx.catalog()?.pick_random_concat(&mut rng, count)?;
    tracing::debug!("mixed {count} decks into {} lines", lines.len());

    run(ctx, MIX_LABEL, &lines, speaker.as_ref(), console, &mut rng, now())?;
    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The label and lines of the deck to quiz.
///
/// Without a name a random working-directory deck is drawn and the session is
/// labelled with the sentinel.
pub fn select<R: Rng + ?Sized>(
    catalog: &Catalog,
    file: Option<&str>,
    rng: &mut R,
    console: &mut dyn Console,
) -> Result<(String, Vec<String>)> {
    match file {
        Some(name) => Ok((name.to_string(), catalog.get_file(name)?)),
        None => {
            let (name, lines) = catalog.pick_random(rng)?;
            console.say(&format!("Random deck: {name}"), Tone::Accent);
            Ok((SENTINEL_LABEL.to_string(), lines))
        }
    }
}

/// Quiz `lines` and report the result under `label`.
pub fn run<R: Rng + ?Sized>(
    ctx: &Context,
    label: &str,
    lines: &[String],
    speaker: &dyn Speaker,
    console: &mut dyn Console,
    rng: &mut R,
    now: NaiveDateTime,
) -> Result<SessionResult> {
    let settings = &ctx.settings;
    let records = parse(lines, &settings.delimiter);
    if records.is_empty() {
        console.say(&format!("No questions in {label}"), Tone::Notice);
    }

    let options = settings.session_options();
    let result = QuizSession::new(&options, speaker).run(records, console, rng)?;
    report_session(&result, label, &ReportOptions::from(settings), now, console)?;
    Ok(result)
}
