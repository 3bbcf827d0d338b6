//! The `flashdrill shell` command: an interactive command loop.
//!
//! Each line is parsed like a command line. A bare deck name quizzes that
//! deck and an empty line quizzes a random one.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use flashdrill_core::console::{Console, Tone};
use flashdrill_core::DrillError;

use super::{is_end_of_input, quiz, Context};
use crate::{Commands, ShellLine};

pub const PROMPT: &str = "COMMAND >> ";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub fn execute(ctx: &mut Context, console: &mut dyn Console) -> Result<()> {
    console.say("TYPE HELP TO VIEW COMMANDS", Tone::Accent);

    loop {
        let line = match console.read_line(PROMPT) {
            Ok(line) => line,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match step(ctx, &line, console) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) if is_end_of_input(&e) => return Ok(()),
            Err(e) => match DrillError::find(&e) {
                Some(drill) => console.say(&drill.to_string(), Tone::Failure),
                None => return Err(e),
            },
        }
    }
}

fn is_command(word: &str) -> bool {
    word == "help" || ShellLine::command().find_subcommand(word).is_some()
}

fn step(ctx: &mut Context, line: &str, console: &mut dyn Console) -> Result<Flow> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => quiz::execute(ctx, None, console)?,
        ["exit" | "quit"] => return Ok(Flow::Exit),
        [name] if !is_command(name) => quiz::execute(ctx, Some(name.to_string()), console)?,
        _ => match ShellLine::try_parse_from(words.iter().copied()) {
            Ok(ShellLine {
                command: Commands::Shell,
            }) => console.say("Already in the shell", Tone::Notice),
            Ok(parsed) => crate::execute(parsed.command, ctx, console)?,
            Err(e) => console.say(e.render().to_string().trim_end(), Tone::Notice),
        },
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use flashdrill_core::console::ScriptedConsole;

    use super::*;

    fn fixture() -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        std::fs::write(dir.path().join("capitals"), "Paris#France\n").unwrap();
        (dir, ctx)
    }

    #[test]
    fn recognises_commands() {
        assert!(is_command("ls"));
        assert!(is_command("automake"));
        assert!(is_command("help"));
        assert!(!is_command("capitals"));
    }

    #[test]
    fn bare_name_quizzes_the_deck() {
        let (_dir, mut ctx) = fixture();
        let mut console = ScriptedConsole::new(["capitals", "paris", "exit"]);

        execute(&mut ctx, &mut console).unwrap();
        assert!(console.transcript().contains("You scored 1/1"));
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn expected_errors_keep_the_loop_going() {
        let (_dir, mut ctx) = fixture();
        let mut console = ScriptedConsole::new(["nouns", "config set colour red", "ls"]);

        execute(&mut ctx, &mut console).unwrap();
        let transcript = console.transcript();
        assert!(transcript.contains("nouns not found"));
        assert!(transcript.contains("unknown config key: colour"));
        assert!(transcript.contains("  capitals"));
    }

    #[test]
    fn config_changes_apply_to_later_commands() {
        let (dir, mut ctx) = fixture();
        let mut console =
            ScriptedConsole::new(["config set log off", "capitals", "show", "quit"]);

        execute(&mut ctx, &mut console).unwrap();
        assert!(!ctx.settings.log);
        assert!(!ctx.settings.log_file.exists());
        assert!(dir.path().join("flashdrill.toml").exists());
    }

    #[test]
    fn usage_errors_are_printed() {
        let (_dir, mut ctx) = fixture();
        let mut console = ScriptedConsole::new(["make onlyone", "shell"]);

        execute(&mut ctx, &mut console).unwrap();
        let transcript = console.transcript();
        assert!(transcript.contains("Usage"));
        assert!(transcript.contains("Already in the shell"));
    }
}
