use super::progress::Spinner;
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use media_tracker_config::{Config, PathManager, SessionStore};
use media_tracker_core::{TrackerError, TrackerObserver, TrackerState};
use media_tracker_models::TrackedItem;
use media_tracker_sources::{PersistenceClient, TmdbClient};
use std::sync::Arc;

/// Surfaces tracker failures on the terminal
struct TerminalObserver {
    output: Output,
}

impl TrackerObserver for TerminalObserver {
    fn changed(&self, items: &[TrackedItem]) {
        tracing::debug!(items = items.len(), "Tracker list changed");
    }

    fn failed(&self, error: &TrackerError) {
        self.output.error(error.to_string());
    }
}

pub fn load_config() -> Result<Config> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    if !config_file.exists() {
        return Err(eyre!(
            "Configuration file not found at {}. Run 'watchboard config init' first.",
            config_file.display()
        ));
    }

    let config = Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

pub fn load_session() -> Result<SessionStore> {
    let session_file = PathManager::default().session_file();
    let mut session = SessionStore::new(session_file.clone());
    session
        .load()
        .map_err(|e| eyre!("Failed to read session from {}: {}", session_file.display(), e))?;
    Ok(session)
}

/// Everything a command needs: configured clients, the tracker, and the
/// remembered session.
pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
    pub catalog: Arc<TmdbClient>,
    pub tracker: TrackerState,
    pub output: Output,
}

impl AppContext {
    pub fn new(output: &Output) -> Result<Self> {
        let config = load_config()?;
        let session = load_session()?;

        let persistence = Arc::new(PersistenceClient::from_config(&config.persistence));
        let catalog = Arc::new(TmdbClient::from_config(&config.catalog));
        let tracker = TrackerState::new(persistence, catalog.clone())
            .with_reposition_policy(config.tracker.reposition_on_revert);
        tracker.subscribe(Arc::new(TerminalObserver { output: *output }));
        tracker.set_filter(session.filter());

        Ok(Self {
            config,
            session,
            catalog,
            tracker,
            output: *output,
        })
    }

    /// Load the remembered user's list and preferences into the tracker
    pub async fn select_active_user(&self) -> Result<u64> {
        let user_id = self
            .session
            .active_user_id()
            .ok_or_else(|| eyre!("No user selected. Run 'watchboard users use <id>' first."))?;

        let name = self.session.active_user_name().unwrap_or("user").to_string();
        let spinner = Spinner::start(format!("Loading {}'s tracker...", name), self.output.is_human());
        let result = self.tracker.select_user(user_id).await;
        spinner.finish();

        result.wrap_err_with(|| format!("Could not load the tracker for {}", name))?;
        Ok(user_id)
    }

    pub fn save_session(&mut self) -> Result<()> {
        self.session
            .save()
            .map_err(|e| eyre!("Failed to save session: {}", e))
    }
}
