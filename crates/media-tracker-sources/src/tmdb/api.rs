use anyhow::{Context, Result};
use media_tracker_models::{CatalogCandidate, CatalogDetail, Credits, MediaKind};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::http::ensure_success;

const SERVICE: &str = "tmdb";

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

/// One `/search/multi` hit. Movies carry `title`/`release_date`, shows carry
/// `name`/`first_air_date`, people carry neither.
#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: Option<u64>,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetail {
    runtime: Option<u32>,
    episode_run_time: Option<Vec<u32>>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    status: Option<String>,
    #[serde(default)]
    genres: Vec<TmdbNamed>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbNamed>,
}

#[derive(Debug, Deserialize)]
struct TmdbNamed {
    name: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Normalize raw search hits into candidates, dropping people and nameless entries
fn normalize_search_results(results: Vec<TmdbSearchResult>) -> Vec<CatalogCandidate> {
    results
        .into_iter()
        .filter_map(|r| {
            let kind = match r.media_type.as_deref() {
                Some("movie") => MediaKind::Movie,
                Some("tv") => MediaKind::Show,
                _ => return None,
            };
            let id = r.id?;
            let title = non_empty(r.title).or_else(|| non_empty(r.name))?;
            Some(CatalogCandidate {
                id,
                kind,
                title: title.trim().to_string(),
                poster_path: non_empty(r.poster_path),
                rating: r.vote_average,
                overview: non_empty(r.overview),
                release_date: non_empty(r.release_date).or_else(|| non_empty(r.first_air_date)),
            })
        })
        .collect()
}

/// Movies report `runtime`; shows report a list of episode runtimes
fn normalize_detail(detail: TmdbDetail) -> CatalogDetail {
    let runtime_minutes = detail
        .runtime
        .filter(|r| *r > 0)
        .or_else(|| detail.episode_run_time.as_ref().and_then(|r| r.first().copied()))
        .unwrap_or(0);

    CatalogDetail {
        runtime_minutes,
        season_count: detail.number_of_seasons.unwrap_or(0),
        episode_count: detail.number_of_episodes.unwrap_or(0),
        production_status: non_empty(detail.status),
        genres: detail.genres.into_iter().map(|g| g.name).collect(),
    }
}

pub async fn search_multi(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<CatalogCandidate>> {
    let url = format!(
        "{}/search/multi?api_key={}&query={}",
        base_url,
        urlencoding::encode(api_key),
        urlencoding::encode(query)
    );

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .context("Failed to reach TMDB search")?;
    let response = ensure_success(SERVICE, response).await?;

    let body: TmdbSearchResponse = response
        .json()
        .await
        .context("Failed to parse TMDB search response")?;
    let raw_count = body.results.len();
    let candidates = normalize_search_results(body.results);

    debug!(
        "TMDB search '{}': {} results, {} movie/tv candidates",
        query,
        raw_count,
        candidates.len()
    );
    Ok(candidates)
}

pub async fn get_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    kind: MediaKind,
    id: u64,
) -> Result<CatalogDetail> {
    let url = format!(
        "{}/{}/{}?api_key={}",
        base_url,
        kind.as_wire_str(),
        id,
        urlencoding::encode(api_key)
    );

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .with_context(|| format!("Failed to reach TMDB for {} {}", kind, id))?;
    let response = ensure_success(SERVICE, response).await?;

    let detail: TmdbDetail = response
        .json()
        .await
        .with_context(|| format!("Failed to parse TMDB detail for {} {}", kind, id))?;
    Ok(normalize_detail(detail))
}

pub async fn get_credits(
    client: &Client,
    base_url: &str,
    api_key: &str,
    kind: MediaKind,
    id: u64,
) -> Result<Credits> {
    let url = format!(
        "{}/{}/{}/credits?api_key={}",
        base_url,
        kind.as_wire_str(),
        id,
        urlencoding::encode(api_key)
    );

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .with_context(|| format!("Failed to reach TMDB credits for {} {}", kind, id))?;
    let response = ensure_success(SERVICE, response).await?;

    let credits: TmdbCredits = response
        .json()
        .await
        .with_context(|| format!("Failed to parse TMDB credits for {} {}", kind, id))?;
    Ok(Credits {
        cast: credits.cast.into_iter().map(|c| c.name).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_search_results_filters_and_maps() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 1396, "media_type": "tv", "name": "Breaking Bad", "first_air_date": "2008-01-20",
                 "poster_path": "/ggFHVNu6YYI5L9pCfOacjizRGt.jpg", "vote_average": 8.9, "overview": "A chemist turns cook."},
                {"id": 17419, "media_type": "person", "name": "Bryan Cranston"},
                {"id": 559969, "media_type": "movie", "title": "El Camino", "release_date": "2019-10-11",
                 "poster_path": null, "vote_average": 6.9, "overview": ""},
                {"id": 99999, "media_type": "movie", "title": "   "}
            ]
        }"#;
        let body: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        let candidates = normalize_search_results(body.results);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, MediaKind::Show);
        assert_eq!(candidates[0].title, "Breaking Bad");
        assert_eq!(candidates[0].release_date.as_deref(), Some("2008-01-20"));
        assert_eq!(candidates[1].kind, MediaKind::Movie);
        assert_eq!(candidates[1].title, "El Camino");
        assert_eq!(candidates[1].poster_path, None);
        assert_eq!(candidates[1].overview, None);
    }

    #[test]
    fn test_normalize_search_keeps_service_order() {
        let json = r#"{"results": [
            {"id": 3, "media_type": "movie", "title": "C"},
            {"id": 1, "media_type": "movie", "title": "A"},
            {"id": 2, "media_type": "tv", "name": "B"}
        ]}"#;
        let body: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<u64> = normalize_search_results(body.results).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_normalize_movie_detail() {
        let json = r#"{"runtime": 136, "status": "Released", "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]}"#;
        let detail = normalize_detail(serde_json::from_str(json).unwrap());
        assert_eq!(detail.runtime_minutes, 136);
        assert_eq!(detail.season_count, 0);
        assert_eq!(detail.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(detail.production_status.as_deref(), Some("Released"));
    }

    #[test]
    fn test_normalize_show_detail_uses_episode_runtime() {
        let json = r#"{"episode_run_time": [47, 45], "number_of_seasons": 5, "number_of_episodes": 62, "status": "Ended", "genres": []}"#;
        let detail = normalize_detail(serde_json::from_str(json).unwrap());
        assert_eq!(detail.runtime_minutes, 47);
        assert_eq!(detail.season_count, 5);
        assert_eq!(detail.episode_count, 62);
    }

    #[test]
    fn test_normalize_detail_without_runtime() {
        let json = r#"{"episode_run_time": [], "number_of_seasons": 1}"#;
        let detail = normalize_detail(serde_json::from_str(json).unwrap());
        assert_eq!(detail.runtime_minutes, 0);
        assert_eq!(detail.season_count, 1);
    }

    #[test]
    fn test_credits_parse() {
        let json = r#"{"id": 603, "cast": [{"name": "Keanu Reeves", "character": "Neo"}, {"name": "Carrie-Anne Moss"}]}"#;
        let credits: TmdbCredits = serde_json::from_str(json).unwrap();
        let names: Vec<String> = credits.cast.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Keanu Reeves", "Carrie-Anne Moss"]);
    }
}
