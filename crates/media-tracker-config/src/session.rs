use anyhow::Result;
use chrono::{DateTime, Utc};
use media_tracker_models::{FilterState, User};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionData {
    #[serde(default)]
    active_user_id: Option<u64>,
    #[serde(default)]
    active_user_name: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    // Tables must follow plain values in TOML
    #[serde(default)]
    filter: FilterState,
}

/// Remembers the selected user and the last board filters between runs.
pub struct SessionStore {
    path: PathBuf,
    data: SessionData,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: SessionData::default(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            self.data = toml::from_str(&content)?;
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.data.updated_at = Some(Utc::now());
        let content = toml::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn active_user_id(&self) -> Option<u64> {
        self.data.active_user_id
    }

    pub fn active_user_name(&self) -> Option<&str> {
        self.data.active_user_name.as_deref()
    }

    pub fn set_active_user(&mut self, user: &User) {
        self.data.active_user_id = Some(user.id);
        self.data.active_user_name = Some(user.name.clone());
    }

    pub fn clear_active_user(&mut self) {
        self.data.active_user_id = None;
        self.data.active_user_name = None;
    }

    pub fn filter(&self) -> FilterState {
        self.data.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.data.filter = filter;
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.data.updated_at
    }
}
