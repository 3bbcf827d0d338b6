//! The `flashdrill automake` command.

use std::path::PathBuf;

use anyhow::Result;

use flashdrill_core::console::{Console, Tone};
use flashdrill_core::traits::Translator;
use flashdrill_core::translate::{translate_file, TranslateRequest};
use flashdrill_providers::create_translator;

use super::Context;

pub fn execute(
    ctx: &Context,
    src: PathBuf,
    dst: PathBuf,
    language: Option<String>,
    force: bool,
    console: &mut dyn Console,
) -> Result<()> {
    let translator = create_translator(&ctx.settings)?;
    let request = request(ctx, src, dst, language, force)?;
    run(&request, translator.as_ref(), console)
}

fn request(
    ctx: &Context,
    src: PathBuf,
    dst: PathBuf,
    language: Option<String>,
    force: bool,
) -> Result<TranslateRequest> {
    Ok(TranslateRequest {
        src: ctx.resolve(&src)?,
        dest: dst,
        languages: ctx.settings.languages.clone(),
        delimiter: ctx.settings.delimiter.clone(),
        language,
        force,
    })
}

fn run(
    request: &TranslateRequest,
    translator: &dyn Translator,
    console: &mut dyn Console,
) -> Result<()> {
    let status = translate_file(request, translator, console)?;
    console.say(&status, Tone::Accent);
    Ok(())
}
