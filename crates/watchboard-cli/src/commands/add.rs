use super::context::AppContext;
use super::progress::{is_interactive, Spinner};
use super::prompts::prompt_select;
use super::search::{candidates_table, describe_candidate, find_candidates};
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use media_tracker_models::{format_duration, CatalogCandidate};
use serde_json::json;

/// Resolve which search result to add: an explicit 1-based pick, an
/// interactive choice, or the only result.
fn choose(candidates: &[CatalogCandidate], pick: Option<usize>, output: &Output) -> Result<usize> {
    if let Some(pick) = pick {
        if pick == 0 || pick > candidates.len() {
            return Err(eyre!("--pick must be between 1 and {}", candidates.len()));
        }
        return Ok(pick - 1);
    }
    if candidates.len() == 1 {
        return Ok(0);
    }
    if output.is_human() && is_interactive() {
        let labels: Vec<String> = candidates.iter().map(describe_candidate).collect();
        return prompt_select("Which one?", &labels);
    }

    output.println(candidates_table(candidates).to_string());
    Err(eyre!("Several titles matched; choose one with --pick <#>"))
}

pub async fn run_add(query: String, pick: Option<usize>, output: &Output) -> Result<()> {
    let ctx = AppContext::new(output)?;
    ctx.select_active_user().await?;

    let candidates = find_candidates(&ctx.catalog, &query, output).await?;
    if candidates.is_empty() {
        return Err(eyre!("No movies or shows found for '{}'", query.trim()));
    }
    let candidate = &candidates[choose(&candidates, pick, output)?];

    let spinner = Spinner::start(format!("Adding {}...", candidate.title), output.is_human());
    let result = ctx.tracker.add(candidate).await;
    spinner.finish();
    let item = result.wrap_err_with(|| format!("Could not add {}", describe_candidate(candidate)))?;

    if !output.is_human() {
        output.json(&json!({ "added": item }));
        return Ok(());
    }

    let runtime = if item.runtime_minutes > 0 {
        format!(", {}", format_duration(item.runtime_minutes))
    } else {
        String::new()
    };
    output.success(format!(
        "Added {} to {} ({}{})",
        describe_candidate(candidate),
        item.status.label(),
        item.watch_preference.label(),
        runtime
    ));
    Ok(())
}
