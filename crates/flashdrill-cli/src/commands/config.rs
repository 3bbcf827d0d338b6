//! The `flashdrill config` command.

use anyhow::Result;
use comfy_table::Table;

use flashdrill_core::config::Settings;
use flashdrill_core::console::{Console, Tone};

use super::Context;
use crate::ConfigAction;

pub fn execute(ctx: &mut Context, action: ConfigAction, console: &mut dyn Console) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", settings_table(&ctx.settings));
            show_source(ctx, console);
        }
        ConfigAction::Set { key, value, entry } => {
            set(ctx, &key, &value, entry.as_deref(), console)?
        }
        ConfigAction::Path => show_source(ctx, console),
    }
    Ok(())
}

/// Every setting and its value.
pub fn settings_table(settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    for (key, value) in settings.entries() {
        table.add_row(vec![key.to_string(), value]);
    }
    table
}

fn show_source(ctx: &Context, console: &mut dyn Console) {
    match &ctx.source {
        Some(path) => console.say(&format!("Settings file: {}", path.display()), Tone::Info),
        None => console.say(
            &format!(
                "Using defaults; edits are saved to {}",
                ctx.save_path().display()
            ),
            Tone::Notice,
        ),
    }
}

/// Change one key, save, and keep using the new settings.
pub fn set(
    ctx: &mut Context,
    key: &str,
    value: &str,
    entry: Option<&str>,
    console: &mut dyn Console,
) -> Result<()> {
    let updated = ctx.settings.with_value(key, value, entry)?;
    let path = ctx.save_path();
    updated.save(&path)?;

    ctx.settings = updated;
    ctx.source = Some(path.clone());
    console.say(
        &format!("Saved {key} to {}", path.display()),
        Tone::Success,
    );
    Ok(())
}
