use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseValueError;
use crate::status::WatchPreference;

/// Board filters. Ephemeral per view, never stored on an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FilterState {
    #[serde(default)]
    pub media_type: MediaTypeFilter,
    #[serde(default)]
    pub runtime: RuntimeFilter,
    #[serde(default)]
    pub watch_preference: WatchPreferenceFilter,
}

impl FilterState {
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaTypeFilter {
    #[default]
    All,
    Movie,
    #[serde(alias = "tv")]
    Show,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeFilter {
    #[default]
    All,
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WatchPreferenceFilter {
    #[default]
    All,
    Alone,
    Partner,
}

impl WatchPreferenceFilter {
    /// The concrete preference selected, if any
    pub fn selected(&self) -> Option<WatchPreference> {
        match self {
            Self::All => None,
            Self::Alone => Some(WatchPreference::Alone),
            Self::Partner => Some(WatchPreference::Partner),
        }
    }
}

/// Runtime class of a title: short under 90 minutes, long over 150,
/// medium in between (both ends inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeBucket {
    Short,
    Medium,
    Long,
}

impl RuntimeBucket {
    pub const SHORT_BELOW: u32 = 90;
    pub const LONG_ABOVE: u32 = 150;

    /// Classify a runtime. Zero means unknown and has no bucket.
    pub fn for_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            0 => None,
            m if m < Self::SHORT_BELOW => Some(Self::Short),
            m if m > Self::LONG_ABOVE => Some(Self::Long),
            _ => Some(Self::Medium),
        }
    }
}

impl RuntimeFilter {
    pub fn bucket(&self) -> Option<RuntimeBucket> {
        match self {
            Self::All => None,
            Self::Short => Some(RuntimeBucket::Short),
            Self::Medium => Some(RuntimeBucket::Medium),
            Self::Long => Some(RuntimeBucket::Long),
        }
    }
}

impl MediaTypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movie => "movie",
            Self::Show => "show",
        }
    }
}

impl RuntimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl WatchPreferenceFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Alone => "alone",
            Self::Partner => "partner",
        }
    }
}

impl FromStr for MediaTypeFilter {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "movie" => Ok(Self::Movie),
            "show" | "tv" => Ok(Self::Show),
            _ => Err(ParseValueError::new("media type filter", s, "all, movie, show")),
        }
    }
}

impl FromStr for RuntimeFilter {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(ParseValueError::new("runtime filter", s, "all, short, medium, long")),
        }
    }
}

impl FromStr for WatchPreferenceFilter {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "alone" => Ok(Self::Alone),
            "partner" => Ok(Self::Partner),
            _ => Err(ParseValueError::new("watch preference filter", s, "all, alone, partner")),
        }
    }
}

impl fmt::Display for MediaTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RuntimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WatchPreferenceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_bucket_boundaries() {
        assert_eq!(RuntimeBucket::for_minutes(0), None);
        assert_eq!(RuntimeBucket::for_minutes(89), Some(RuntimeBucket::Short));
        assert_eq!(RuntimeBucket::for_minutes(90), Some(RuntimeBucket::Medium));
        assert_eq!(RuntimeBucket::for_minutes(150), Some(RuntimeBucket::Medium));
        assert_eq!(RuntimeBucket::for_minutes(151), Some(RuntimeBucket::Long));
    }

    #[test]
    fn test_filter_parse_and_display() {
        assert_eq!("tv".parse::<MediaTypeFilter>().unwrap(), MediaTypeFilter::Show);
        assert_eq!(MediaTypeFilter::Show.to_string(), "show");
        assert_eq!("Long".parse::<RuntimeFilter>().unwrap(), RuntimeFilter::Long);
        assert!("huge".parse::<RuntimeFilter>().is_err());
        assert_eq!(WatchPreferenceFilter::Partner.to_string(), "partner");
    }

    #[test]
    fn test_filter_state_defaults_to_all() {
        let state: FilterState = serde_json::from_str("{}").unwrap();
        assert!(state.is_unfiltered());
        assert_eq!(WatchPreferenceFilter::All.selected(), None);
        assert_eq!(
            WatchPreferenceFilter::Partner.selected(),
            Some(WatchPreference::Partner)
        );
    }
}
