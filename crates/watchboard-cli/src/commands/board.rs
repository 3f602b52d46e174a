use super::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use media_tracker_core::BoardColumn;
use media_tracker_models::{
    FilterState, MediaTypeFilter, RuntimeFilter, TrackedItem, WatchPreferenceFilter,
};
use owo_colors::OwoColorize;
use serde_json::json;

pub struct BoardArgs {
    pub media_type: Option<MediaTypeFilter>,
    pub runtime: Option<RuntimeFilter>,
    pub preference: Option<WatchPreferenceFilter>,
    pub reset: bool,
}

/// Flags given on the command line replace the remembered ones
fn merge_filter(remembered: FilterState, args: &BoardArgs) -> FilterState {
    let base = if args.reset { FilterState::default() } else { remembered };
    FilterState {
        media_type: args.media_type.unwrap_or(base.media_type),
        runtime: args.runtime.unwrap_or(base.runtime),
        watch_preference: args.preference.unwrap_or(base.watch_preference),
    }
}

pub async fn run_board(args: BoardArgs, output: &Output) -> Result<()> {
    let mut ctx = AppContext::new(output)?;
    ctx.select_active_user().await?;

    let filter = merge_filter(ctx.session.filter(), &args);
    if filter != ctx.session.filter() {
        ctx.session.set_filter(filter);
        ctx.save_session()?;
    }
    ctx.tracker.set_filter(filter);

    let columns = ctx.tracker.board(&filter);
    let counts = ctx.tracker.counts(&filter);

    if !output.is_human() {
        output.json(&json!({
            "user": ctx.session.active_user_name(),
            "filter": filter,
            "counts": counts,
            "columns": columns,
        }));
        return Ok(());
    }

    let name = ctx.session.active_user_name().unwrap_or("Tracker").to_string();
    output.println(format!("{} {}", "▶".bright_cyan(), name.bold()));
    output.println(describe_filter(&filter).bright_black().to_string());

    if columns.iter().all(|c| c.items.is_empty()) {
        if ctx.tracker.snapshot().is_empty() {
            output.info("Nothing tracked yet. Add something with 'watchboard add <title>'.");
        } else {
            output.info("No titles match the current filters. Use --reset to clear them.");
        }
        return Ok(());
    }

    output.println(render_board(&columns).to_string());
    Ok(())
}

fn describe_filter(filter: &FilterState) -> String {
    if filter.is_unfiltered() {
        return "Showing everything".to_string();
    }
    format!(
        "Type: {}  Runtime: {}  Watching: {}",
        filter.media_type, filter.runtime, filter.watch_preference
    )
}

fn card(item: &TrackedItem) -> String {
    let mut lines = vec![match item.year() {
        Some(year) => format!("{} ({})", item.title, year),
        None => item.title.clone(),
    }];

    let mut meta = vec![item.kind.label().to_string()];
    if let Some(extra) = item.card_meta() {
        meta.push(extra);
    }
    if let Some(rating) = item.rating.filter(|r| *r > 0.0) {
        meta.push(format!("★ {:.1}", rating));
    }
    lines.push(meta.join(" · "));
    lines.push(format!("#{} {}", item.id, item.watch_preference.label()));
    lines.join("\n")
}

fn render_board(columns: &[BoardColumn]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        columns
            .iter()
            .map(|c| {
                Cell::new(format!("{} ({})", c.status.label(), c.items.len()))
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold)
            })
            .collect::<Vec<_>>(),
    );

    let depth = columns.iter().map(|c| c.items.len()).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            columns
                .iter()
                .map(|c| Cell::new(c.items.get(row).map(card).unwrap_or_default()))
                .collect::<Vec<_>>(),
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BoardArgs {
        BoardArgs {
            media_type: None,
            runtime: None,
            preference: None,
            reset: false,
        }
    }

    #[test]
    fn test_merge_filter_keeps_remembered_values() {
        let remembered = FilterState {
            media_type: MediaTypeFilter::Show,
            runtime: RuntimeFilter::Long,
            watch_preference: WatchPreferenceFilter::Partner,
        };
        let merged = merge_filter(
            remembered,
            &BoardArgs {
                runtime: Some(RuntimeFilter::Short),
                ..args()
            },
        );
        assert_eq!(merged.media_type, MediaTypeFilter::Show);
        assert_eq!(merged.runtime, RuntimeFilter::Short);
        assert_eq!(merged.watch_preference, WatchPreferenceFilter::Partner);
    }

    #[test]
    fn test_merge_filter_reset() {
        let remembered = FilterState {
            media_type: MediaTypeFilter::Movie,
            ..FilterState::default()
        };
        let merged = merge_filter(remembered, &BoardArgs { reset: true, ..args() });
        assert!(merged.is_unfiltered());
    }
}
