//! The `flashdrill make` command.

use std::path::PathBuf;

use anyhow::Result;

use flashdrill_core::console::{Console, Tone};
use flashdrill_core::transform::make_inverse_file;

use super::Context;

pub fn execute(
    ctx: &Context,
    src: PathBuf,
    dst: PathBuf,
    force: bool,
    console: &mut dyn Console,
) -> Result<()> {
    let src = ctx.resolve(&src)?;
    let status = make_inverse_file(&src, &dst, &ctx.settings.delimiter, force, console)?;
    console.say(&status, Tone::Accent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use flashdrill_core::console::ScriptedConsole;
    use flashdrill_core::DrillError;

    use super::*;

    #[test]
    fn writes_inverse_of_a_listed_deck() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        std::fs::write(dir.path().join("capitals"), "Paris#France\n").unwrap();
        let dst = dir.path().join("capitals2");
        let mut console = ScriptedConsole::default();

        execute(&ctx, "capitals".into(), dst.clone(), false, &mut console).unwrap();
        assert_eq!(
            std::fs::read_to_string(&dst).unwrap(),
            "France#Paris\nParis#France\n"
        );
        assert!(console.transcript().contains("Added inverse data"));
    }

    #[test]
    fn unknown_source() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path());
        let mut console = ScriptedConsole::default();

        let err = execute(
            &ctx,
            "missing".into(),
            dir.path().join("out"),
            false,
            &mut console,
        )
        .unwrap_err();
        assert!(matches!(DrillError::find(&err), Some(DrillError::NotFound(_))));
    }
}
