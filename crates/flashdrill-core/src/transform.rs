//! File-level deck transforms.

use std::path::Path;

use anyhow::Result;

use crate::console::{Console, Tone};
use crate::error::DrillError;
use crate::record::{compose_inverse, parse, read_lines, serialize, write_lines};

/// Ask before replacing an existing `dest`, unless `force` is set.
///
/// Anything other than an answer containing `overwrite` is a refusal.
pub fn confirm_overwrite(dest: &Path, force: bool, console: &mut dyn Console) -> Result<()> {
    if force || !dest.exists() {
        return Ok(());
    }

    console.say(
        &format!("{} already exists, Type 'overwrite' to overwrite", dest.display()),
        Tone::Failure,
    );
    let answer = console.read_line(": ")?;
    if answer.to_lowercase().contains("overwrite") {
        Ok(())
    } else {
        Err(DrillError::RefusedOverwrite(dest.to_path_buf()).into())
    }
}

/// Write the inverse dataset of `src` to `dest`.
///
/// Every valid record of `src` is written mirrored, then as-is; malformed
/// lines are dropped. Returns a status message.
pub fn make_inverse_file(
    src: &Path,
    dest: &Path,
    delimiter: &str,
    force: bool,
    console: &mut dyn Console,
) -> Result<String> {
    if !src.is_file() {
        return Err(DrillError::NotFound(src.display().to_string()).into());
    }
    confirm_overwrite(dest, force, console)?;

    let records = parse(&read_lines(src)?, delimiter);
    write_lines(dest, &serialize(&compose_inverse(&records), delimiter))?;

    Ok(format!(
        "Added inverse data and exported as {}",
        dest.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    #[test]
    fn no_prompt_for_new_destination() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = ScriptedConsole::default();
        confirm_overwrite(&dir.path().join("new"), false, &mut console).unwrap();
        assert_eq!(console.prompts(), 0);
    }

    #[test]
    fn existing_destination_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("existing");
        std::fs::write(&dest, "keep me").unwrap();

        let mut console = ScriptedConsole::new(["no thanks"]);
        let err = confirm_overwrite(&dest, false, &mut console).unwrap_err();
        assert!(matches!(
            DrillError::find(&err),
            Some(DrillError::RefusedOverwrite(path)) if path == &dest
        ));
        assert!(console.transcript().contains("already exists"));

        let mut console = ScriptedConsole::new(["yes, OVERWRITE it"]);
        confirm_overwrite(&dest, false, &mut console).unwrap();

        let mut console = ScriptedConsole::default();
        confirm_overwrite(&dest, true, &mut console).unwrap();
        assert_eq!(console.prompts(), 0);
    }

    #[test]
    fn inverse_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        std::fs::write(&src, "R:Wine#вино\nnot a record\nR:Bread#хлеб\n").unwrap();

        let mut console = ScriptedConsole::default();
        let status = make_inverse_file(&src, &dest, "#", false, &mut console).unwrap();
        assert!(status.contains("exported as"));
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "вино#R:Wine\nхлеб#R:Bread\nR:Wine#вино\nR:Bread#хлеб\n"
        );
    }

    #[test]
    fn refused_overwrite_keeps_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        std::fs::write(&src, "a#b\n").unwrap();
        std::fs::write(&dest, "precious\n").unwrap();

        let mut console = ScriptedConsole::new(["n"]);
        assert!(make_inverse_file(&src, &dest, "#", false, &mut console).is_err());
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "precious\n");
    }

    #[test]
    fn missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = ScriptedConsole::default();
        let err = make_inverse_file(
            &dir.path().join("nope"),
            &dir.path().join("dest"),
            "#",
            false,
            &mut console,
        )
        .unwrap_err();
        assert!(matches!(
            DrillError::find(&err),
            Some(DrillError::NotFound(_))
        ));
    }
}
