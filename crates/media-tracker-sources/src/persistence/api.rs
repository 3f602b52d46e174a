use anyhow::{Context, Result};
use media_tracker_models::{ItemKey, MediaUpdate, NewTrackedItem, TrackedItem, User, UserPreferences};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::http::ensure_success;

const SERVICE: &str = "persistence";

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    name: &'a str,
}

fn media_url(base_url: &str, user_id: u64) -> String {
    format!("{}/users/{}/media", base_url, user_id)
}

fn item_url(base_url: &str, user_id: u64, key: ItemKey) -> String {
    format!(
        "{}/users/{}/media/{}/{}",
        base_url,
        user_id,
        key.id,
        key.kind.as_wire_str()
    )
}

fn preferences_url(base_url: &str, user_id: u64) -> String {
    format!("{}/users/{}/preferences", base_url, user_id)
}

pub async fn list_users(client: &Client, base_url: &str) -> Result<Vec<User>> {
    let url = format!("{}/users", base_url);
    let response = client.get(&url).send().await.context("Failed to reach persistence service")?;
    let response = ensure_success(SERVICE, response).await?;
    let users: Vec<User> = response.json().await.context("Failed to parse user list")?;
    Ok(users)
}

pub async fn create_user(client: &Client, base_url: &str, name: &str) -> Result<User> {
    let url = format!("{}/users", base_url);
    let response = client
        .post(&url)
        .json(&CreateUserBody { name })
        .send()
        .await
        .context("Failed to reach persistence service")?;
    let response = ensure_success(SERVICE, response).await?;
    let user: User = response.json().await.context("Failed to parse created user")?;
    Ok(user)
}

pub async fn list_media(client: &Client, base_url: &str, user_id: u64) -> Result<Vec<TrackedItem>> {
    let url = media_url(base_url, user_id);
    let response = client.get(&url).send().await.context("Failed to reach persistence service")?;
    let response = ensure_success(SERVICE, response).await?;
    let items: Vec<TrackedItem> = response
        .json()
        .await
        .with_context(|| format!("Failed to parse media list for user {}", user_id))?;
    debug!("Fetched {} tracked items for user {}", items.len(), user_id);
    Ok(items)
}

/// The service answers with a confirmation message rather than the stored
/// item, so only the status is checked.
pub async fn create_media(
    client: &Client,
    base_url: &str,
    user_id: u64,
    item: &NewTrackedItem,
) -> Result<()> {
    let url = media_url(base_url, user_id);
    let response = client
        .post(&url)
        .json(item)
        .send()
        .await
        .context("Failed to reach persistence service")?;
    ensure_success(SERVICE, response).await?;
    Ok(())
}

pub async fn update_media(
    client: &Client,
    base_url: &str,
    user_id: u64,
    key: ItemKey,
    update: &MediaUpdate,
) -> Result<()> {
    let url = item_url(base_url, user_id, key);
    let response = client
        .put(&url)
        .json(update)
        .send()
        .await
        .context("Failed to reach persistence service")?;
    ensure_success(SERVICE, response).await?;
    Ok(())
}

pub async fn delete_media(client: &Client, base_url: &str, user_id: u64, key: ItemKey) -> Result<()> {
    let url = item_url(base_url, user_id, key);
    let response = client
        .delete(&url)
        .send()
        .await
        .context("Failed to reach persistence service")?;
    ensure_success(SERVICE, response).await?;
    Ok(())
}

pub async fn get_preferences(client: &Client, base_url: &str, user_id: u64) -> Result<UserPreferences> {
    let url = preferences_url(base_url, user_id);
    let response = client.get(&url).send().await.context("Failed to reach persistence service")?;
    let response = ensure_success(SERVICE, response).await?;
    let preferences: UserPreferences = response
        .json()
        .await
        .with_context(|| format!("Failed to parse preferences for user {}", user_id))?;
    Ok(preferences)
}

pub async fn set_preferences(
    client: &Client,
    base_url: &str,
    user_id: u64,
    preferences: &UserPreferences,
) -> Result<()> {
    let url = preferences_url(base_url, user_id);
    let response = client
        .put(&url)
        .json(preferences)
        .send()
        .await
        .context("Failed to reach persistence service")?;
    ensure_success(SERVICE, response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_tracker_models::{MediaKind, WatchPreference, WatchStatus};

    #[test]
    fn test_item_url_uses_wire_kind() {
        let url = item_url("http://localhost:3000/api", 3, ItemKey::new(1396, MediaKind::Show));
        assert_eq!(url, "http://localhost:3000/api/users/3/media/1396/tv");
    }

    #[test]
    fn test_update_body_carries_both_fields() {
        let body = serde_json::to_value(MediaUpdate {
            status: WatchStatus::InProgress,
            watch_preference: WatchPreference::Partner,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "in-progress", "watch_preference": "partner"})
        );
    }

    #[test]
    fn test_media_list_parses() {
        let json = r#"[
            {"id": 603, "media_type": "movie", "title": "The Matrix", "poster_path": null,
             "vote_average": 8.2, "overview": "Neo.", "release_date": "1999-03-30",
             "runtime": 136, "seasons": 0, "status": "watched", "watch_preference": "alone",
             "added_date": "2024-01-01 10:00:00"},
            {"id": 1396, "media_type": "tv", "title": "Breaking Bad", "runtime": 47, "seasons": 5,
             "status": "watching", "watch_preference": "all"}
        ]"#;
        let items: Vec<TrackedItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].status, WatchStatus::Watched);
        assert_eq!(items[1].kind, MediaKind::Show);
        assert_eq!(items[1].watch_preference, WatchPreference::Alone);
    }
}
