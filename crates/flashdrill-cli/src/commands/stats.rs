//! The `flashdrill stats` command.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use flashdrill_core::console::{Console, Tone};
use flashdrill_report::score_log::{ScoreEntry, TIMESTAMP_FORMAT};
use flashdrill_report::read_score_log;

use super::Context;

pub fn execute(ctx: &Context, console: &mut dyn Console) -> Result<()> {
    let log_file = &ctx.settings.log_file;
    let entries = read_score_log(log_file)?;

    if entries.is_empty() {
        console.say(
            &format!("No scores logged yet in {}", log_file.display()),
            Tone::Notice,
        );
        return Ok(());
    }

    println!("{}", score_table(&entries));

    let weak = entries.iter().filter(|e| e.is_weak()).count();
    console.say(
        &format!("{} quizzes, {weak} at or below 50%", entries.len()),
        Tone::Accent,
    );
    Ok(())
}

/// The score log as a table, weak rows in red.
pub fn score_table(entries: &[ScoreEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "File", "Score", "Percent"]);

    for entry in entries {
        let color = if entry.is_weak() {
            Color::Red
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(entry.timestamp.format(TIMESTAMP_FORMAT)),
            Cell::new(&entry.label),
            Cell::new(format!("{}/{}", entry.correct, entry.total)),
            Cell::new(format!("{}%", entry.percent())).fg(color),
        ]);
    }

    table
}
