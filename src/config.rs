//! Configuration management for the Spotify Terminal Controller.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files, and knows where the token cache
//! lives.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current directory, then `.env` in the configuration directory
//! 3. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf};

use reqwest::Url;

use crate::{error::Error, types::Credentials};

pub const APP_DIR: &str = "spotify-cli";

pub const SCOPES: [&str; 3] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
];

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` in the current directory first and then in the
/// platform-specific configuration directory under `spotify-cli/.env`:
/// - Linux: `~/.config/spotify-cli/.env`
/// - macOS: `~/Library/Application Support/spotify-cli/.env`
/// - Windows: `%APPDATA%/spotify-cli/.env`
///
/// Variables that are already set are never overridden. Missing files are
/// not an error; missing credentials are reported later by [`credentials`].
///
/// # Example
///
/// ```
/// use spotify_cli::config;
///
/// #[tokio::main]
/// async fn main() {
///     config::load_env().await;
/// }
/// ```
pub async fn load_env() {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let path = env_file_path();
    if async_fs::metadata(&path).await.is_ok() {
        match dotenv::from_path(&path) {
            Ok(()) => tracing::debug!("loaded environment from {}", path.display()),
            Err(e) => tracing::warn!("cannot parse {}: {}", path.display(), e),
        }
    }
}

/// Resolves the client identity from `CLIENT_ID`, `CLIENT_SECRET` and
/// `REDIRECT_URI`.
///
/// # Errors
///
/// Returns [`Error::MissingCredentials`] if the id or the secret is unset or
/// empty.
pub fn credentials() -> Result<Credentials, Error> {
    let client_id = non_empty_var("CLIENT_ID").ok_or(Error::MissingCredentials)?;
    let client_secret = non_empty_var("CLIENT_SECRET").ok_or(Error::MissingCredentials)?;
    let redirect_uri =
        non_empty_var("REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());

    Ok(Credentials {
        client_id,
        client_secret,
        redirect_uri,
    })
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth authorization URL.
///
/// Reads `SPOTIFY_AUTH_URL`, falling back to
/// `https://accounts.spotify.com/authorize`.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Reads `SPOTIFY_TOKEN_URL`, falling back to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the scope string requested during authorization.
pub fn spotify_scope() -> String {
    SCOPES.join(" ")
}

/// Directory holding the token cache and the optional `.env` file.
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Location of the persisted OAuth token.
pub fn token_cache_path() -> PathBuf {
    config_dir().join("token.json")
}

pub fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}

/// Socket address and request path the OAuth callback server must serve,
/// derived from the redirect URI.
///
/// # Errors
///
/// Returns [`Error::Auth`] if the URI cannot be parsed or does not name a
/// host and port reachable on this machine.
///
/// # Example
///
/// ```
/// use spotify_cli::config::callback_target;
///
/// let (addr, path) = callback_target("http://127.0.0.1:8080/callback")?;
/// assert_eq!(addr.port(), 8080);
/// assert_eq!(path, "/callback");
/// ```
pub fn callback_target(redirect_uri: &str) -> Result<(SocketAddr, String), Error> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| Error::Auth(format!("invalid redirect URI '{}': {}", redirect_uri, e)))?;

    let host = match url.host_str() {
        Some("localhost") => "127.0.0.1",
        Some(host) => host.trim_start_matches('[').trim_end_matches(']'),
        None => {
            return Err(Error::Auth(format!(
                "redirect URI '{}' has no host",
                redirect_uri
            )));
        }
    };
    let port = url.port_or_known_default().unwrap_or(80);

    let addr = format!("{}:{}", host, port)
        .parse::<SocketAddr>()
        .or_else(|_| format!("[{}]:{}", host, port).parse::<SocketAddr>())
        .map_err(|_| {
            Error::Auth(format!(
                "redirect URI '{}' must point to a local IP address",
                redirect_uri
            ))
        })?;

    Ok((addr, url.path().to_string()))
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
