use thiserror::Error;

/// Failure talking to the catalog or persistence service
#[derive(Debug, Error)]
pub enum SourceError {
    /// Rejected before any request was made
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// The service answered 409 (duplicate user or item)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx answer
    #[error("{service} returned HTTP {status}: {message}")]
    Rejected {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Network failure, timeout, or an unreadable response body
    #[error("request failed: {0}")]
    Request(String),
}

impl SourceError {
    pub fn rejected(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        if status == 409 {
            return Self::Conflict(message.into());
        }
        Self::Rejected {
            service,
            status,
            message: message.into(),
        }
    }

    /// Recover a typed error raised inside an `anyhow` chain, or wrap the
    /// chain as a request failure.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<SourceError>() {
            Ok(typed) => typed,
            Err(other) => Self::Request(format!("{:#}", other)),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
