use super::context::AppContext;
use super::progress::Spinner;
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{presets, Cell, Table};
use media_tracker_models::{format_duration, ItemKey, MediaKind};
use owo_colors::OwoColorize;
use serde_json::json;

const CAST_LIMIT: usize = 10;

pub async fn run_details(id: u64, kind: MediaKind, output: &Output) -> Result<()> {
    let ctx = AppContext::new(output)?;
    let key = ItemKey::new(id, kind);

    // Tracking info is a bonus here; the catalog lookup works without a user
    if ctx.session.active_user_id().is_some() {
        if let Err(e) = ctx.select_active_user().await {
            tracing::warn!("Showing details without tracker info: {:#}", e);
        }
    }
    let tracked = ctx.tracker.get(key);

    let spinner = Spinner::start(format!("Fetching details for {}...", key), output.is_human());
    let result = ctx.catalog.details_with_credits(kind, id).await;
    spinner.finish();
    let (detail, credits) = result.wrap_err_with(|| format!("Failed to fetch details for {}", key))?;

    if !output.is_human() {
        output.json(&json!({
            "id": id,
            "media_type": kind,
            "detail": detail,
            "cast": credits.top_cast(CAST_LIMIT),
            "tracked": tracked,
        }));
        return Ok(());
    }

    let heading = tracked
        .as_ref()
        .map(|item| item.title.clone())
        .unwrap_or_else(|| format!("{} #{}", kind.label(), id));
    output.println(format!("{}", heading.bold().bright_cyan()));

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.add_row(vec![Cell::new("Runtime"), Cell::new(format_duration(detail.runtime_minutes))]);
    if kind == MediaKind::Show {
        table.add_row(vec![Cell::new("Seasons"), Cell::new(detail.season_count)]);
        table.add_row(vec![Cell::new("Episodes"), Cell::new(detail.episode_count)]);
    }
    if let Some(status) = &detail.production_status {
        table.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    }
    if !detail.genres.is_empty() {
        table.add_row(vec![Cell::new("Genres"), Cell::new(detail.genres.join(", "))]);
    }
    let cast = credits.top_cast(CAST_LIMIT);
    if !cast.is_empty() {
        table.add_row(vec![Cell::new("Cast"), Cell::new(cast.join(", "))]);
    }

    if let Some(item) = &tracked {
        if let Some(overview) = &item.overview {
            table.add_row(vec![Cell::new("Overview"), Cell::new(overview)]);
        }
        if let Some(poster) = &item.poster_path {
            table.add_row(vec![Cell::new("Poster"), Cell::new(ctx.config.poster_url(poster))]);
        }
        table.add_row(vec![Cell::new("Tracker"), Cell::new(item.status.label())]);
        table.add_row(vec![Cell::new("Watching"), Cell::new(item.watch_preference.label())]);
        if let Some(added) = &item.added_date {
            table.add_row(vec![Cell::new("Added"), Cell::new(added)]);
        }
    } else {
        table.add_row(vec![Cell::new("Tracker"), Cell::new("Not tracked".bright_black().to_string())]);
    }

    output.println(table.to_string());
    Ok(())
}
