//! The `flashdrill ls` command.

use anyhow::Result;

use flashdrill_core::console::{Console, Tone};

use super::Context;

pub fn execute(ctx: &Context, working_only: bool, console: &mut dyn Console) -> Result<()> {
    let catalog = ctx.catalog()?;

    if !working_only {
        console.say("Current directory:", Tone::Success);
        list(&catalog.current, console);
    }
    console.say(
        &format!("Working directory ({}):", ctx.settings.working_dir.display()),
        Tone::Success,
    );
    list(&catalog.working, console);
    Ok(())
}

fn list(names: &[String], console: &mut dyn Console) {
    if names.is_empty() {
        console.say("  (no decks)", Tone::Notice);
    }
    for name in names {
        console.say(&format!("  {name}"), Tone::Info);
    }
}

#[cfg(test)]
mod tests {
    use flashdrill_core::console::ScriptedConsole;

    use super::*;

    #[test]
    fn lists_both_directories() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        std::fs::write(dir.path().join("nouns"), "a#b\n").unwrap();
        std::fs::create_dir_all(&ctx.settings.working_dir).unwrap();
        std::fs::write(ctx.settings.working_dir.join("verbs"), "a#b\n").unwrap();

        let mut console = ScriptedConsole::default();
        execute(&ctx, false, &mut console).unwrap();
        let transcript = console.transcript();
        assert!(transcript.contains("  nouns"));
        assert!(transcript.contains("  verbs"));

        let mut console = ScriptedConsole::default();
        execute(&ctx, true, &mut console).unwrap();
        assert!(!console.transcript().contains("nouns"));
    }

    #[test]
    fn empty_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        let mut console = ScriptedConsole::default();
        execute(&ctx, true, &mut console).unwrap();
        assert!(console.transcript().contains("(no decks)"));
    }
}
