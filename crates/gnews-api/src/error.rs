//! Error types for GNews API client

use std::fmt;

/// Errors that can occur when interacting with the GNews API
#[derive(Debug)]
pub enum GnewsError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// The API answered with a non-success status code
    Status(u16),
    /// The configured base URL could not be turned into a request URL
    Url(url::ParseError),
}

impl GnewsError {
    /// HTTP status code carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) | Self::Url(_) => None,
        }
    }
}

impl fmt::Display for GnewsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "GNews HTTP error: {}", e),
            Self::Json(e) => write!(f, "GNews JSON parse error: {}", e),
            Self::Status(code) => write!(f, "GNews returned status {}", code),
            Self::Url(e) => write!(f, "GNews URL error: {}", e),
        }
    }
}

impl std::error::Error for GnewsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Url(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for GnewsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for GnewsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<url::ParseError> for GnewsError {
    fn from(e: url::ParseError) -> Self {
        Self::Url(e)
    }
}

/// Result type for GNews API operations
pub type Result<T> = std::result::Result<T, GnewsError>;
