#![allow(dead_code)]

use std::sync::Mutex;

use reqwest::StatusCode;
use spotify_cli::{
    ApiError,
    spotify::PlaybackApi,
    types::{
        ArtistRef, Device, PlayTarget, PlaybackState, RepeatMode, SearchItem, SearchKind, Track,
    },
};

/// Every request the dispatcher issued, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Devices,
    Transfer {
        device_id: String,
        play: bool,
    },
    Start {
        device_id: Option<String>,
        target: Option<PlayTarget>,
    },
    Pause,
    Next,
    Previous,
    Queue {
        uri: String,
        device_id: Option<String>,
    },
    Shuffle(bool),
    Repeat(RepeatMode),
    Volume(u8),
    CurrentPlayback,
    Search {
        query: String,
        kind: SearchKind,
        limit: u32,
    },
}

/// In-memory stand-in for the Web API.
#[derive(Default)]
pub struct FakeApi {
    pub devices: Vec<Device>,
    pub playback: Option<PlaybackState>,
    pub search_results: Vec<SearchItem>,
    /// When set, every call fails with this HTTP status.
    pub fail_with: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_playback(mut self, playback: PlaybackState) -> Self {
        self.playback = Some(playback);
        self
    }

    pub fn with_search_results(mut self, items: Vec<SearchItem>) -> Self {
        self.search_results = items;
        self
    }

    pub fn failing_with(mut self, status: u16) -> Self {
        self.fail_with = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(code) => Err(ApiError::from_status(
                StatusCode::from_u16(code).unwrap(),
                "Player command failed",
            )),
            None => Ok(()),
        }
    }
}

impl PlaybackApi for FakeApi {
    async fn devices(&self) -> Result<Vec<Device>, ApiError> {
        self.record(Call::Devices)?;
        Ok(self.devices.clone())
    }

    async fn transfer_playback(&self, device_id: &str, play: bool) -> Result<(), ApiError> {
        self.record(Call::Transfer {
            device_id: device_id.to_string(),
            play,
        })
    }

    async fn start_playback(
        &self,
        device_id: Option<&str>,
        target: Option<&PlayTarget>,
    ) -> Result<(), ApiError> {
        self.record(Call::Start {
            device_id: device_id.map(str::to_string),
            target: target.cloned(),
        })
    }

    async fn pause_playback(&self) -> Result<(), ApiError> {
        self.record(Call::Pause)
    }

    async fn next_track(&self) -> Result<(), ApiError> {
        self.record(Call::Next)
    }

    async fn previous_track(&self) -> Result<(), ApiError> {
        self.record(Call::Previous)
    }

    async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<(), ApiError> {
        self.record(Call::Queue {
            uri: uri.to_string(),
            device_id: device_id.map(str::to_string),
        })
    }

    async fn set_shuffle(&self, state: bool) -> Result<(), ApiError> {
        self.record(Call::Shuffle(state))
    }

    async fn set_repeat(&self, mode: RepeatMode) -> Result<(), ApiError> {
        self.record(Call::Repeat(mode))
    }

    async fn set_volume(&self, percent: u8) -> Result<(), ApiError> {
        self.record(Call::Volume(percent))
    }

    async fn current_playback(&self) -> Result<Option<PlaybackState>, ApiError> {
        self.record(Call::CurrentPlayback)?;
        Ok(self.playback.clone())
    }

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<Vec<SearchItem>, ApiError> {
        self.record(Call::Search {
            query: query.to_string(),
            kind,
            limit,
        })?;
        Ok(self.search_results.clone())
    }
}

pub fn device(id: &str, name: &str, is_active: bool) -> Device {
    Device {
        id: Some(id.to_string()),
        name: name.to_string(),
        kind: "Computer".to_string(),
        is_active,
        volume_percent: None,
    }
}

/// A device Spotify lists without an id.
pub fn restricted_device(name: &str, is_active: bool) -> Device {
    Device {
        id: None,
        ..device("", name, is_active)
    }
}

pub fn track(name: &str, uri: &str, artists: &[&str], duration_ms: Option<u64>) -> Track {
    Track {
        name: name.to_string(),
        artists: artist_refs(artists),
        duration_ms,
        uri: uri.to_string(),
    }
}

pub fn playback(is_playing: bool, shuffle_state: bool, item: Option<Track>) -> PlaybackState {
    PlaybackState {
        is_playing,
        device: Some(device("dev-1", "Kitchen Speaker", true)),
        progress_ms: Some(65_000),
        item,
        shuffle_state,
        repeat_state: "off".to_string(),
    }
}

pub fn search_item(name: &str, uri: &str, artists: &[&str]) -> SearchItem {
    SearchItem {
        name: name.to_string(),
        uri: uri.to_string(),
        artists: artist_refs(artists),
    }
}

fn artist_refs(names: &[&str]) -> Vec<ArtistRef> {
    names
        .iter()
        .map(|n| ArtistRef {
            name: n.to_string(),
        })
        .collect()
}
