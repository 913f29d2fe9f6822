//! Text rendering of Web API snapshots.
//!
//! Every function here is pure and returns the lines to print, so the
//! dispatcher decides where they go.

use crate::types::{ArtistRef, Device, PlaybackState, SearchItem, SearchKind};

pub const NOTHING_PLAYING: &str = "Nothing is playing.";
pub const NO_DEVICES: &str =
    "No available devices. Open Spotify on at least one device, then try again.";
pub const NO_RESULTS: &str = "No results.";

const PLACEHOLDER: &str = "—";

/// Formats milliseconds as `MM:SS`. Missing values render as `--:--`, never
/// as `00:00`.
pub fn ms_to_mmss(ms: Option<u64>) -> String {
    match ms {
        Some(ms) => {
            let s = ms / 1000;
            format!("{:02}:{:02}", s / 60, s % 60)
        }
        None => "--:--".to_string(),
    }
}

pub fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_status(state: Option<&PlaybackState>) -> String {
    let Some(state) = state else {
        return NOTHING_PLAYING.to_string();
    };

    let glyph = if state.is_playing { "▶️" } else { "⏸️" };
    let (name, artists, duration) = match &state.item {
        Some(item) => (
            item.name.clone(),
            join_artists(&item.artists),
            item.duration_ms,
        ),
        None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string(), None),
    };
    let device = state
        .device
        .as_ref()
        .map(|d| d.name.as_str())
        .unwrap_or("?");
    let shuffle = if state.shuffle_state { "on" } else { "off" };

    format!(
        "{} {} — {}\nDevice: {}  |  {} / {}\nShuffle: {}  |  Repeat: {}",
        glyph,
        name,
        artists,
        device,
        ms_to_mmss(Some(state.progress_ms.unwrap_or(0))),
        ms_to_mmss(duration),
        shuffle,
        state.repeat_state
    )
}

pub fn format_devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return NO_DEVICES.to_string();
    }

    let mut lines = vec!["Devices:".to_string()];
    for (i, dev) in devices.iter().enumerate() {
        let active = if dev.is_active { " (active)" } else { "" };
        let volume = dev
            .volume_percent
            .map(|v| format!(" vol={}%", v))
            .unwrap_or_default();
        lines.push(format!(
            " {:2}. {} [{}] id={}{}{}",
            i + 1,
            dev.name,
            dev.kind,
            dev.id.as_deref().unwrap_or("-"),
            active,
            volume
        ));
    }
    lines.join("\n")
}

/// Numbers the first `limit` results starting at 1. Tracks show their
/// artists, other kinds only name and URI.
pub fn format_search_results(items: &[SearchItem], kind: SearchKind, limit: usize) -> String {
    if items.is_empty() {
        return NO_RESULTS.to_string();
    }

    items
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, item)| match kind {
            SearchKind::Track => format!(
                "{:2}. {} — {}  ({})",
                i + 1,
                item.name,
                join_artists(&item.artists),
                item.uri
            ),
            _ => format!("{:2}. {}  ({})", i + 1, item.name, item.uri),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
