use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseValueError;

/// Kind of catalog title.
///
/// Both services spell a show as `"tv"` on the wire; `"show"` is accepted
/// when parsing user input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv", alias = "show")]
    Show,
}

impl MediaKind {
    /// Path segment / `media_type` value used by the catalog and persistence APIs
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Show => "TV Show",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for MediaKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" | "show" => Ok(Self::Show),
            _ => Err(ParseValueError::new("media kind", s, "movie, show")),
        }
    }
}

/// Identity of a tracked item within one user's list.
///
/// Catalog ids are only unique per kind: movie 1396 and show 1396 are
/// different titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub id: u64,
    pub kind: MediaKind,
}

impl ItemKey {
    pub fn new(id: u64, kind: MediaKind) -> Self {
        Self { id, kind }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Render a runtime for display: `"2h 5m"`, `"45m"`, or `"N/A"` when unknown.
pub fn format_duration(minutes: u32) -> String {
    if minutes == 0 {
        return "N/A".to_string();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_wire_format() {
        assert_eq!(serde_json::to_string(&MediaKind::Show).unwrap(), "\"tv\"");
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"movie\"");
        let kind: MediaKind = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(kind, MediaKind::Show);
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!("show".parse::<MediaKind>().unwrap(), MediaKind::Show);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Show);
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert!("episode".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_item_key_distinguishes_kinds() {
        assert_ne!(ItemKey::new(1396, MediaKind::Movie), ItemKey::new(1396, MediaKind::Show));
        assert_eq!(ItemKey::new(42, MediaKind::Movie).to_string(), "movie/42");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "N/A");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(60), "1h 0m");
        assert_eq!(format_duration(125), "2h 5m");
    }
}
