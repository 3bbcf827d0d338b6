//! The `flashdrill init` command.

use anyhow::{Context as _, Result};

use flashdrill_core::config::{Settings, CONFIG_FILE_NAME};
use flashdrill_core::console::{Console, Tone};

use super::Context;

const HEADER: &str = "# flashdrill configuration
#
# Decks are plain text files of `answer#question` lines, looked up in the
# current directory and in working_dir. Tag a side with a language key
# (e.g. `R:вино#E:wine`) to have it spoken in that language when audio is on.

";

pub fn execute(ctx: &Context, console: &mut dyn Console) -> Result<()> {
    let path = ctx.current_dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        console.say(
            &format!("{CONFIG_FILE_NAME} already exists, skipping."),
            Tone::Notice,
        );
        return Ok(());
    }

    let body =
        toml::to_string_pretty(&Settings::default()).context("failed to serialize settings")?;
    std::fs::write(&path, format!("{HEADER}{body}"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    console.say(&format!("Created {CONFIG_FILE_NAME}"), Tone::Success);

    console.say("\nNext steps:", Tone::Info);
    console.say("  1. Set working_dir to your deck directory", Tone::Info);
    console.say("  2. Run: flashdrill ls", Tone::Info);
    console.say("  3. Run: flashdrill quiz <deck>", Tone::Info);
    Ok(())
}

#[cfg(test)]
mod tests {
    use flashdrill_core::config::parse_settings;
    use flashdrill_core::console::ScriptedConsole;

    use super::*;

    #[test]
    fn writes_default_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        let mut console = ScriptedConsole::default();

        execute(&ctx, &mut console).unwrap();
        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(content.starts_with("# flashdrill configuration"));
        assert_eq!(parse_settings(&content).unwrap(), Settings::default());

        let mut console = ScriptedConsole::default();
        execute(&ctx, &mut console).unwrap();
        assert!(console.transcript().contains("already exists"));
    }
}
