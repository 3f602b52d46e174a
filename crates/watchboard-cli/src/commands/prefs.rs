use super::context::AppContext;
use crate::output::Output;
use crate::PrefsCommands;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{presets, Cell, Table};
use media_tracker_models::UserPreferences;
use serde_json::json;

pub async fn run_prefs(cmd: PrefsCommands, output: &Output) -> Result<()> {
    let ctx = AppContext::new(output)?;
    ctx.select_active_user().await?;

    match cmd {
        PrefsCommands::Show => show(&ctx.tracker.preferences(), output),
        PrefsCommands::Set {
            card_size,
            default_preference,
        } => {
            if card_size.is_none() && default_preference.is_none() {
                return Err(eyre!("Nothing to change; pass --card-size and/or --default-preference"));
            }
            let current = ctx.tracker.preferences();
            let updated = UserPreferences {
                card_size: card_size.unwrap_or(current.card_size),
                default_watch_preference: default_preference.unwrap_or(current.default_watch_preference),
            };
            ctx.tracker
                .save_preferences(updated)
                .await
                .wrap_err("Failed to save preferences")?;
            if output.is_human() {
                output.success("Preferences saved");
            }
            show(&updated, output)
        }
    }
}

fn show(preferences: &UserPreferences, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&json!({ "preferences": preferences }));
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.add_row(vec![Cell::new("Card size"), Cell::new(preferences.card_size)]);
    table.add_row(vec![
        Cell::new("New titles default to"),
        Cell::new(preferences.default_watch_preference.label()),
    ]);
    output.println(table.to_string());
    Ok(())
}
