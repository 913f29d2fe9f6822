use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// `None` for restricted devices, which cannot be targeted.
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    pub device: Option<Device>,
    pub progress_ms: Option<u64>,
    pub item: Option<Track>,
    #[serde(default)]
    pub shuffle_state: bool,
    #[serde(default = "default_repeat_state")]
    pub repeat_state: String,
}

fn default_repeat_state() -> String {
    RepeatMode::Off.as_str().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub duration_ms: Option<u64>,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// One entry of a search result page. Albums, playlists and artists share
/// the same shape; only tracks carry artists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    // the playlist index may contain null entries
    #[serde(default)]
    pub items: Vec<Option<SearchItem>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<SearchPage>,
    pub albums: Option<SearchPage>,
    pub playlists: Option<SearchPage>,
    pub artists: Option<SearchPage>,
}

impl SearchResponse {
    /// Items of the page matching `kind`, skipping null entries.
    pub fn into_items(self, kind: SearchKind) -> Vec<SearchItem> {
        let page = match kind {
            SearchKind::Track => self.tracks,
            SearchKind::Album => self.albums,
            SearchKind::Playlist => self.playlists,
            SearchKind::Artist => self.artists,
        };
        page.map(|p| p.items.into_iter().flatten().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferPlaybackRequest {
    pub device_ids: Vec<String>,
    pub play: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartPlaybackRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
}

/// What to start playing: a single item goes through `uris`, a container
/// (album, playlist, artist) through `context_uri`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayTarget {
    Track(String),
    Context(String),
}

impl PlayTarget {
    pub fn uri(&self) -> &str {
        match self {
            PlayTarget::Track(uri) | PlayTarget::Context(uri) => uri,
        }
    }

    pub fn for_search_result(kind: SearchKind, uri: impl Into<String>) -> Self {
        match kind {
            SearchKind::Track => PlayTarget::Track(uri.into()),
            _ => PlayTarget::Context(uri.into()),
        }
    }
}

impl From<&PlayTarget> for StartPlaybackRequest {
    fn from(target: &PlayTarget) -> Self {
        match target {
            PlayTarget::Track(uri) => StartPlaybackRequest {
                uris: Some(vec![uri.clone()]),
                context_uri: None,
            },
            PlayTarget::Context(uri) => StartPlaybackRequest {
                uris: None,
                context_uri: Some(uri.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleChoice {
    On,
    Off,
    Toggle,
}

impl FromStr for ShuffleChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" => Ok(ShuffleChoice::On),
            "off" => Ok(ShuffleChoice::Off),
            "toggle" => Ok(ShuffleChoice::Toggle),
            _ => Err("shuffle expects: on | off | toggle".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    Off,
    Context,
    Track,
}

impl RepeatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Context => "context",
            RepeatMode::Track => "track",
        }
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(RepeatMode::Off),
            "context" => Ok(RepeatMode::Context),
            "track" => Ok(RepeatMode::Track),
            _ => Err("repeat expects: off | context | track".to_string()),
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Track,
    Album,
    Playlist,
    Artist,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Playlist => "playlist",
            SearchKind::Artist => "artist",
        }
    }
}

impl FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "track" => Ok(SearchKind::Track),
            "album" => Ok(SearchKind::Album),
            "playlist" => Ok(SearchKind::Playlist),
            "artist" => Ok(SearchKind::Artist),
            _ => Err("search --type must be one of: track, album, playlist, artist".to_string()),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
