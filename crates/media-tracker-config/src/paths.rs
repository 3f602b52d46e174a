use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override from `WATCHBOARD_BASE_PATH`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("WATCHBOARD_BASE_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchboard");

        Ok(Self::from_base(base_dir))
    }

    /// Lay out all files under a single directory: config files at the top
    /// level, data and logs in subdirectories.
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("watchboard.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g. ~/.config/watchboard on Linux), falling
        // back to the working directory when no config dir can be determined
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".watchboard")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base(PathBuf::from("/srv/watchboard"));
        assert_eq!(paths.config_file(), PathBuf::from("/srv/watchboard/config.toml"));
        assert_eq!(paths.session_file(), PathBuf::from("/srv/watchboard/data/session.toml"));
        assert_eq!(paths.default_log_file(), PathBuf::from("/srv/watchboard/logs/watchboard.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("wb"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
