//! Error taxonomy.
//!
//! Failures fall in three groups: configuration errors (missing
//! credentials), local validation errors (bad argument, unknown device) and
//! remote errors. Remote errors carry the action that was attempted and an
//! [`ApiError`] classified from the HTTP status.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Missing credentials. Set CLIENT_ID and CLIENT_SECRET.\n    You can use a .env file ({}) or export shell variables.",
        config::env_file_path().display()
    )]
    MissingCredentials,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("No device matching '{0}' found. Use `devices` to list.")]
    DeviceNotFound(String),

    #[error("{}", describe_remote(.action, .source))]
    Remote {
        action: &'static str,
        source: ApiError,
    },

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Token cache error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single Web API call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("forbidden (403)")]
    Forbidden,

    #[error("unauthorized (401)")]
    Unauthorized,

    #[error("resource not found (404)")]
    NotFound,

    #[error("{message} (HTTP {code})")]
    Status { code: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Classifies a non-2xx response.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        match status {
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Status {
                code: status.as_u16(),
                message: message.into(),
            },
        }
    }
}

fn describe_remote(action: &str, source: &ApiError) -> String {
    match source {
        ApiError::Forbidden => format!(
            "Spotify API rejected the request (403) while trying to {action}.\n    Playback control via Web API requires Spotify Premium."
        ),
        ApiError::Unauthorized => format!(
            "Unauthorized (401). Your token may be expired. Delete the cache at {} and re-authenticate.",
            config::token_cache_path().display()
        ),
        ApiError::NotFound => format!("Resource not found while trying to {action}."),
        other => format!("Spotify API error during {action}: {other}"),
    }
}

/// Attaches the attempted action to a failed Web API call.
pub trait During<T> {
    fn during(self, action: &'static str) -> Result<T, Error>;
}

impl<T> During<T> for Result<T, ApiError> {
    fn during(self, action: &'static str) -> Result<T, Error> {
        self.map_err(|source| Error::Remote { action, source })
    }
}
