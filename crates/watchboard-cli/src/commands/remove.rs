use super::context::AppContext;
use super::progress::is_interactive;
use super::prompts::prompt_yes_no;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_tracker_models::{ItemKey, MediaKind};
use serde_json::json;

pub async fn run_remove(id: u64, kind: MediaKind, yes: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::new(output)?;
    ctx.select_active_user().await?;
    let key = ItemKey::new(id, kind);

    let item = ctx
        .tracker
        .get(key)
        .ok_or_else(|| eyre!("{} is not in your tracker", key))?;

    if !yes {
        if !is_interactive() {
            return Err(eyre!("Refusing to remove without confirmation; pass --yes"));
        }
        let prompt = format!("Remove {} from your tracker?", item.title);
        if !prompt_yes_no(&prompt, false)? {
            output.info("Nothing removed");
            return Ok(());
        }
    }

    ctx.tracker
        .remove(key)
        .await
        .map_err(|_| eyre!("{} was not removed", item.title))?;

    if output.is_human() {
        output.success(format!("Removed {}", item.title));
    } else {
        output.json(&json!({ "removed": key.to_string() }));
    }
    Ok(())
}
