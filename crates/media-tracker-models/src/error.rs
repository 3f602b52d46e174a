use thiserror::Error;

/// Returned when a user-supplied value does not name a known variant
/// (e.g. `--status finished` or `media_type = "episode"`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseValueError {
    pub fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
