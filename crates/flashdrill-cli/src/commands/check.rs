//! The `flashdrill check` command.

use std::path::Path;

use anyhow::Result;

use flashdrill_core::console::{Console, Tone};
use flashdrill_core::record::{parse, read_lines, validate};

use super::Context;

pub fn execute(ctx: &Context, file: &str, console: &mut dyn Console) -> Result<()> {
    let path = ctx.resolve(Path::new(file))?;
    let lines = read_lines(&path)?;
    let delimiter = &ctx.settings.delimiter;

    let records = parse(&lines, delimiter);
    console.say(
        &format!("{}: {} questions", path.display(), records.len()),
        Tone::Info,
    );

    let warnings = validate(&lines, delimiter);
    for w in &warnings {
        console.say(
            &format!("  line {}: {} ({})", w.line_number, w.message, w.line),
            Tone::Notice,
        );
    }

    if warnings.is_empty() {
        console.say("No problems found.", Tone::Success);
    } else {
        console.say(
            &format!("{} line(s) will be skipped.", warnings.len()),
            Tone::Failure,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flashdrill_core::console::ScriptedConsole;

    use super::*;

    #[test]
    fn reports_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        std::fs::write(dir.path().join("deck"), "a#b\nno delimiter\n\nx#y#z\n").unwrap();
        let mut console = ScriptedConsole::default();

        execute(&ctx, "deck", &mut console).unwrap();
        let transcript = console.transcript();
        assert!(transcript.contains("1 questions"));
        assert!(transcript.contains("line 2: missing delimiter '#'"));
        assert!(transcript.contains("line 4: expected 2 parts, found 3"));
        assert!(transcript.contains("2 line(s) will be skipped."));
    }

    #[test]
    fn clean_deck() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        std::fs::write(dir.path().join("deck"), "a#b\n").unwrap();
        let mut console = ScriptedConsole::default();

        execute(&ctx, "deck", &mut console).unwrap();
        assert!(console.transcript().contains("No problems found."));
    }
}
