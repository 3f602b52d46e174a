use super::context::load_config;
use super::progress::Spinner;
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{presets, Cell, Table};
use media_tracker_models::CatalogCandidate;
use media_tracker_sources::{CatalogService, TmdbClient};
use serde_json::json;

pub async fn find_candidates(catalog: &TmdbClient, query: &str, output: &Output) -> Result<Vec<CatalogCandidate>> {
    let spinner = Spinner::start(format!("Searching for '{}'...", query.trim()), output.is_human());
    let results = catalog.search(query).await;
    spinner.finish();
    results.wrap_err_with(|| format!("Search for '{}' failed", query.trim()))
}

/// One-line summary used in tables and pick lists
pub fn describe_candidate(candidate: &CatalogCandidate) -> String {
    let year = candidate
        .year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    format!("{}{} [{}]", candidate.title, year, candidate.kind.label())
}

pub fn candidates_table(candidates: &[CatalogCandidate]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["#", "Title", "Year", "Type", "Rating", "ID"]);
    for (index, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&candidate.title),
            Cell::new(candidate.year().map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(candidate.kind.label()),
            Cell::new(
                candidate
                    .rating
                    .filter(|r| *r > 0.0)
                    .map(|r| format!("{:.1}", r))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{} {}", candidate.id, candidate.kind)),
        ]);
    }
    table
}

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let config = load_config()?;
    let catalog = TmdbClient::from_config(&config.catalog);
    let candidates = find_candidates(&catalog, &query, output).await?;

    if !output.is_human() {
        output.json(&json!({ "query": query, "results": candidates }));
        return Ok(());
    }

    if candidates.is_empty() {
        output.info(format!("No movies or shows found for '{}'", query.trim()));
        return Ok(());
    }
    output.println(candidates_table(&candidates).to_string());
    output.info("Add one with 'watchboard add <query> --pick <#>'.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_tracker_models::MediaKind;

    #[test]
    fn test_describe_candidate() {
        let candidate = CatalogCandidate {
            id: 1396,
            kind: MediaKind::Show,
            title: "Breaking Bad".to_string(),
            poster_path: None,
            rating: Some(8.9),
            overview: None,
            release_date: Some("2008-01-20".to_string()),
        };
        assert_eq!(describe_candidate(&candidate), "Breaking Bad (2008) [TV Show]");

        let undated = CatalogCandidate {
            release_date: None,
            ..candidate
        };
        assert_eq!(describe_candidate(&undated), "Breaking Bad [TV Show]");
    }
}
