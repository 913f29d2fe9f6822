//! # API Module
//!
//! HTTP handlers served by the temporary local server that receives the
//! OAuth redirect during authorization.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify's
//!   authorization server, checks the `state` parameter and exchanges the
//!   code for a token. The outcome is written to the shared [`PkceToken`]
//!   slot the authorization flow is polling.
//!
//! [`PkceToken`]: crate::types::PkceToken

mod callback;

pub use callback::callback;
