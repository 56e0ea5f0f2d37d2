//! Error types for the news service

use std::fmt;
use std::time::Duration;

/// How a failed news fetch is classified for logs and callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// 401 or 403 from the API, almost always a bad or revoked key
    Unauthorized,
    /// 429 from the API
    RateLimited,
    /// Any other non-success status
    Http(u16),
    /// No status available (connection, TLS, body parse, missing articles)
    Transport,
}

/// The remote fetch failed on both the client and the raw HTTP path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsFetchError {
    pub kind: FetchErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl NewsFetchError {
    pub fn from_status(status: u16) -> Self {
        let (kind, message) = match status {
            401 | 403 => (
                FetchErrorKind::Unauthorized,
                format!("News API authentication failed (HTTP {status}), check GNEWS_API_KEY"),
            ),
            429 => (
                FetchErrorKind::RateLimited,
                "News API rate limit exceeded (HTTP 429), try again later".to_string(),
            ),
            other => (
                FetchErrorKind::Http(other),
                format!("News API request failed with HTTP {other}"),
            ),
        };
        Self {
            kind,
            status: Some(status),
            message,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for NewsFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NewsFetchError {}

impl From<reqwest::Error> for NewsFetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::from_status(status.as_u16()),
            None => Self::transport(e.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum NewsError {
    /// Missing API key or unusable settings
    Configuration(String),
    /// Remote fetch failed after exhausting both transports
    Fetch(NewsFetchError),
    /// The refresh did not finish within the configured window
    Timeout(Duration),
    Io(Box<std::io::Error>),
}

impl fmt::Display for NewsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Self::Fetch(e) => write!(f, "{}", e),
            Self::Timeout(after) => write!(f, "News refresh timed out after {:?}", after),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for NewsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Io(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<NewsFetchError> for NewsError {
    fn from(e: NewsFetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<std::io::Error> for NewsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Box::new(e))
    }
}

impl From<tracing_subscriber::filter::ParseError> for NewsError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Configuration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_classified() {
        for status in [401, 403] {
            let err = NewsFetchError::from_status(status);
            assert_eq!(err.kind, FetchErrorKind::Unauthorized);
            assert_eq!(err.status, Some(status));
            assert!(err.message.contains("authentication failed"));
        }
    }

    #[test]
    fn test_rate_limit_classified() {
        let err = NewsFetchError::from_status(429);
        assert_eq!(err.kind, FetchErrorKind::RateLimited);
        assert_eq!(err.status, Some(429));
        assert!(err.to_string().contains("rate limit"));
    }

    #[test]
    fn test_generic_status_keeps_code() {
        let err = NewsFetchError::from_status(502);
        assert_eq!(err.kind, FetchErrorKind::Http(502));
        assert_eq!(err.to_string(), "News API request failed with HTTP 502");
    }

    #[test]
    fn test_config_error_display() {
        let err = NewsError::Configuration("GNEWS_API_KEY is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: GNEWS_API_KEY is not set");
    }

    #[test]
    fn test_fetch_error_display_is_classified_message() {
        let err = NewsError::from(NewsFetchError::transport("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}
