use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_tracker_models::{ItemKey, MediaKind, WatchPreference, WatchStatus};
use serde_json::json;

fn tracked_title(ctx: &AppContext, key: ItemKey) -> Result<String> {
    ctx.tracker
        .get(key)
        .map(|item| item.title)
        .ok_or_else(|| eyre!("{} is not in your tracker", key))
}

fn report(ctx: &AppContext, key: ItemKey, message: String, output: &Output) {
    if output.is_human() {
        output.success(message);
    } else {
        output.json(&json!({ "updated": ctx.tracker.get(key) }));
    }
}

pub async fn run_status(id: u64, kind: MediaKind, status: WatchStatus, output: &Output) -> Result<()> {
    let ctx = AppContext::new(output)?;
    ctx.select_active_user().await?;
    let key = ItemKey::new(id, kind);
    let title = tracked_title(&ctx, key)?;

    // The observer has already reported a failed write
    ctx.tracker
        .update_status(key, status)
        .await
        .map_err(|_| eyre!("{} is still marked as it was", title))?;

    report(&ctx, key, format!("Moved {} to {}", title, status.label()), output);
    Ok(())
}

pub async fn run_prefer(id: u64, kind: MediaKind, preference: WatchPreference, output: &Output) -> Result<()> {
    let ctx = AppContext::new(output)?;
    ctx.select_active_user().await?;
    let key = ItemKey::new(id, kind);
    let title = tracked_title(&ctx, key)?;

    ctx.tracker
        .update_preference(key, preference)
        .await
        .map_err(|_| eyre!("{} is still marked as it was", title))?;

    report(&ctx, key, format!("{}: {}", title, preference.label()), output);
    Ok(())
}
