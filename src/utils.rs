use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    error::Error,
    types::{PlayTarget, RepeatMode, SearchKind, ShuffleChoice},
};

pub const MAX_SEARCH_LIMIT: u32 = 50;

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    random_alphanumeric(16)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn parse_volume(percent: i64) -> Result<u8, Error> {
    if !(0..=100).contains(&percent) {
        return Err(Error::InvalidArgument(
            "volume percent must be between 0 and 100".to_string(),
        ));
    }
    Ok(percent as u8)
}

pub fn parse_shuffle(state: &str) -> Result<ShuffleChoice, Error> {
    state.parse().map_err(Error::InvalidArgument)
}

pub fn parse_repeat(state: &str) -> Result<RepeatMode, Error> {
    state.parse().map_err(Error::InvalidArgument)
}

pub fn parse_search_kind(kind: &str) -> Result<SearchKind, Error> {
    kind.parse().map_err(Error::InvalidArgument)
}

pub fn parse_search_limit(limit: u32) -> Result<u32, Error> {
    if limit == 0 || limit > MAX_SEARCH_LIMIT {
        return Err(Error::InvalidArgument(format!(
            "search --limit must be between 1 and {}",
            MAX_SEARCH_LIMIT
        )));
    }
    Ok(limit)
}

/// Guesses how to play a free-form identifier typed into the menu: anything
/// containing `track` is played as a single item, everything else as a
/// context.
///
/// Known limitation: an artist or playlist whose identifier happens to
/// contain `track` is misclassified, and malformed input is passed through
/// untouched for Spotify to reject.
pub fn guess_play_target(uri: &str) -> PlayTarget {
    if uri.contains("track") {
        PlayTarget::Track(uri.to_string())
    } else {
        PlayTarget::Context(uri.to_string())
    }
}
