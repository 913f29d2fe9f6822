//! Spotify Terminal Controller Library
//!
//! This library drives Spotify playback from a terminal. It authenticates
//! against the Spotify accounts service, then maps each user command (play,
//! pause, skip, queue, volume, shuffle, repeat, device transfer, search) onto
//! one or a few Web API calls and renders the answers as text.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command dispatcher, device resolver and the interactive menu
//! - `config` - Environment variables, `.env` loading and well-known paths
//! - `error` - Error taxonomy shared by both entry points
//! - `management` - Token cache management
//! - `presenter` - Text formatting of devices, playback and search results
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API session and authorization flow
//! - `types` - Data structures and type definitions
//! - `utils` - Argument validation and small helpers
//!
//! # Example
//!
//! ```
//! use spotify_cli::{cli, config, spotify};
//!
//! #[tokio::main]
//! async fn main() -> spotify_cli::Res<()> {
//!     config::load_env().await;
//!     let credentials = config::credentials()?;
//!     let session = spotify::auth::connect(&credentials).await?;
//!     cli::status(&session).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod presenter;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{ApiError, Error};

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation of the crate reports one of the [`Error`]
/// variants, so both entry points (one-shot and interactive) can decide
/// whether to exit or to keep going from a single type.
///
/// # Example
///
/// ```
/// use spotify_cli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Open the following URL to authorize: {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to confirm that a playback command was accepted by Spotify.
///
/// # Example
///
/// ```
/// success!("Volume set to {}%", 40);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr and exits
/// the program with status 1.
///
/// Only the one-shot entry point and fatal pre-flight checks use this macro;
/// the interactive menu reports failures with [`warning!`] and keeps going.
///
/// # Example
///
/// ```
/// error!("No device matching '{}' found.", query);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to stderr.
///
/// # Example
///
/// ```
/// warning!("Use on/off/toggle.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
