use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseValueError;

/// Pipeline stage of a tracked item. Declaration order is board column order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum WatchStatus {
    ToWatch,
    InProgress,
    Watching,
    Waiting,
    Watched,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 5] = [
        Self::ToWatch,
        Self::InProgress,
        Self::Watching,
        Self::Waiting,
        Self::Watched,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToWatch => "to-watch",
            Self::InProgress => "in-progress",
            Self::Watching => "watching",
            Self::Waiting => "waiting",
            Self::Watched => "watched",
        }
    }

    /// Column heading shown on the board
    pub fn label(&self) -> &'static str {
        match self {
            Self::ToWatch => "To Watch",
            Self::InProgress => "Shortlist",
            Self::Watching => "Watching",
            Self::Waiting => "Waiting for Season",
            Self::Watched => "Watched",
        }
    }
}

impl Default for WatchStatus {
    fn default() -> Self {
        Self::ToWatch
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                ParseValueError::new(
                    "status",
                    s,
                    "to-watch, in-progress, watching, waiting, watched",
                )
            })
    }
}

/// Who the user intends to watch a title with.
///
/// Older preference records store `"all"` as the default; it reads as `alone`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WatchPreference {
    #[default]
    #[serde(alias = "all")]
    Alone,
    Partner,
}

impl WatchPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alone => "alone",
            Self::Partner => "partner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Alone => "Watch Alone",
            Self::Partner => "Watch with Partner",
        }
    }
}

impl fmt::Display for WatchPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchPreference {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alone" => Ok(Self::Alone),
            "partner" => Ok(Self::Partner),
            _ => Err(ParseValueError::new("watch preference", s, "alone, partner")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&WatchStatus::ALL).unwrap();
        assert_eq!(
            json,
            r#"["to-watch","in-progress","watching","waiting","watched"]"#
        );
    }

    #[test]
    fn test_status_labels() {
        let labels: Vec<_> = WatchStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["To Watch", "Shortlist", "Watching", "Waiting for Season", "Watched"]
        );
    }

    #[test]
    fn test_status_order_matches_pipeline() {
        let mut shuffled = vec![WatchStatus::Watched, WatchStatus::ToWatch, WatchStatus::Waiting];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![WatchStatus::ToWatch, WatchStatus::Waiting, WatchStatus::Watched]
        );
    }

    #[test]
    fn test_status_from_str_accepts_underscores() {
        assert_eq!("in_progress".parse::<WatchStatus>().unwrap(), WatchStatus::InProgress);
        assert_eq!("Watched".parse::<WatchStatus>().unwrap(), WatchStatus::Watched);
        assert!("finished".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn test_preference_reads_legacy_all_as_alone() {
        let pref: WatchPreference = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(pref, WatchPreference::Alone);
        assert_eq!(serde_json::to_string(&pref).unwrap(), "\"alone\"");
    }
}
