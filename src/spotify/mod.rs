//! # Spotify Integration Module
//!
//! This module is the boundary to the Spotify Web API. It owns the HTTP
//! client, decodes every response into the typed structures of
//! [`crate::types`] and classifies every failure into an [`ApiError`].
//!
//! ## Architecture
//!
//! ```text
//! Command Dispatcher (cli)
//!          ↓
//! PlaybackApi (trait)
//!          ↓
//! Session (reqwest, bearer token)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The [`PlaybackApi`] trait is the seam between the dispatcher and the
//! network: [`Session`] implements it against the real service, tests
//! implement it in memory.
//!
//! ## API Coverage
//!
//! - `GET /me/player/devices` - Available devices
//! - `PUT /me/player` - Transfer playback
//! - `PUT /me/player/play` - Start or resume playback
//! - `PUT /me/player/pause` - Pause playback
//! - `POST /me/player/next`, `POST /me/player/previous` - Skip
//! - `POST /me/player/queue` - Append to the queue
//! - `PUT /me/player/shuffle`, `PUT /me/player/repeat`, `PUT /me/player/volume`
//! - `GET /me/player` - Current playback snapshot (204 when nothing plays)
//! - `GET /search` - Catalog search
//!
//! ## Error Handling
//!
//! Every call issues exactly one request. There are no retries: a non-2xx
//! answer becomes an [`ApiError`] immediately, with 401, 403 and 404 given
//! their own variants and anything else carrying Spotify's message.
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 authorization-code flow (with PKCE)
//! and token refresh, and builds a ready [`Session`] from the cached token.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, header::CONTENT_LENGTH};
use serde::Deserialize;

use crate::{
    config,
    error::{ApiError, During, Error},
    types::{
        Device, DevicesResponse, PlayTarget, PlaybackState, RepeatMode, SearchItem, SearchKind,
        SearchResponse, StartPlaybackRequest, TransferPlaybackRequest,
    },
};

pub mod auth;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote operations the dispatcher needs, one Web API request each.
#[allow(async_fn_in_trait)]
pub trait PlaybackApi {
    async fn devices(&self) -> Result<Vec<Device>, ApiError>;

    async fn transfer_playback(&self, device_id: &str, play: bool) -> Result<(), ApiError>;

    /// Resumes playback when `target` is `None`.
    async fn start_playback(
        &self,
        device_id: Option<&str>,
        target: Option<&PlayTarget>,
    ) -> Result<(), ApiError>;

    async fn pause_playback(&self) -> Result<(), ApiError>;

    async fn next_track(&self) -> Result<(), ApiError>;

    async fn previous_track(&self) -> Result<(), ApiError>;

    async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<(), ApiError>;

    async fn set_shuffle(&self, state: bool) -> Result<(), ApiError>;

    async fn set_repeat(&self, mode: RepeatMode) -> Result<(), ApiError>;

    async fn set_volume(&self, percent: u8) -> Result<(), ApiError>;

    /// `None` when nothing is playing.
    async fn current_playback(&self) -> Result<Option<PlaybackState>, ApiError>;

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<Vec<SearchItem>, ApiError>;
}

/// Authenticated handle on the Web API.
pub struct Session {
    client: Client,
    api_url: String,
    access_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Result<Self, Error> {
        Self::with_api_url(access_token, config::spotify_apiurl())
    }

    pub fn with_api_url(
        access_token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::from)
            .during("create the HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.bearer_auth(&self.access_token).build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "spotify request");

        let response = self.client.execute(request).await?;
        tracing::debug!(status = %response.status(), "spotify response");
        check(response).await
    }

    /// Sends a request without payload; Spotify insists on a length header.
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request.header(CONTENT_LENGTH, 0)).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body,
    };
    Err(ApiError::from_status(status, message))
}

fn device_query(device_id: Option<&str>) -> Vec<(&'static str, String)> {
    device_id
        .map(|id| vec![("device_id", id.to_string())])
        .unwrap_or_default()
}

impl PlaybackApi for Session {
    async fn devices(&self) -> Result<Vec<Device>, ApiError> {
        let response = self
            .send(self.client.get(self.url("/me/player/devices")))
            .await?;
        let body = response.json::<DevicesResponse>().await?;
        Ok(body.devices)
    }

    async fn transfer_playback(&self, device_id: &str, play: bool) -> Result<(), ApiError> {
        let body = TransferPlaybackRequest {
            device_ids: vec![device_id.to_string()],
            play,
        };
        self.send(self.client.put(self.url("/me/player")).json(&body))
            .await?;
        Ok(())
    }

    async fn start_playback(
        &self,
        device_id: Option<&str>,
        target: Option<&PlayTarget>,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url("/me/player/play"))
            .query(&device_query(device_id));

        match target {
            Some(target) => {
                self.send(request.json(&StartPlaybackRequest::from(target)))
                    .await?;
                Ok(())
            }
            None => self.send_empty(request).await,
        }
    }

    async fn pause_playback(&self) -> Result<(), ApiError> {
        self.send_empty(self.client.put(self.url("/me/player/pause")))
            .await
    }

    async fn next_track(&self) -> Result<(), ApiError> {
        self.send_empty(self.client.post(self.url("/me/player/next")))
            .await
    }

    async fn previous_track(&self) -> Result<(), ApiError> {
        self.send_empty(self.client.post(self.url("/me/player/previous")))
            .await
    }

    async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<(), ApiError> {
        let mut query = vec![("uri", uri.to_string())];
        query.extend(device_query(device_id));
        self.send_empty(
            self.client
                .post(self.url("/me/player/queue"))
                .query(&query),
        )
        .await
    }

    async fn set_shuffle(&self, state: bool) -> Result<(), ApiError> {
        self.send_empty(
            self.client
                .put(self.url("/me/player/shuffle"))
                .query(&[("state", state)]),
        )
        .await
    }

    async fn set_repeat(&self, mode: RepeatMode) -> Result<(), ApiError> {
        self.send_empty(
            self.client
                .put(self.url("/me/player/repeat"))
                .query(&[("state", mode.as_str())]),
        )
        .await
    }

    async fn set_volume(&self, percent: u8) -> Result<(), ApiError> {
        self.send_empty(
            self.client
                .put(self.url("/me/player/volume"))
                .query(&[("volume_percent", percent)]),
        )
        .await
    }

    async fn current_playback(&self) -> Result<Option<PlaybackState>, ApiError> {
        let response = self.send(self.client.get(self.url("/me/player"))).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<Vec<SearchItem>, ApiError> {
        let response = self
            .send(self.client.get(self.url("/search")).query(&[
                ("q", query.to_string()),
                ("type", kind.as_str().to_string()),
                ("limit", limit.to_string()),
            ]))
            .await?;
        let body = response.json::<SearchResponse>().await?;
        Ok(body.into_items(kind))
    }
}
