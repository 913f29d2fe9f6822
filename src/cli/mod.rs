//! # CLI Module
//!
//! The command dispatcher: every user-facing command of the terminal
//! controller maps onto one function here, generic over
//! [`PlaybackApi`](crate::spotify::PlaybackApi) so the same code runs
//! against the real [`Session`](crate::spotify::Session) and against test
//! doubles.
//!
//! ## Command Categories
//!
//! ### Devices
//!
//! - [`devices`] - Lists available devices
//! - [`set_device`] - Transfers playback to a device found by id or name
//! - [`find_device`] / [`ensure_device`] - Device resolution shared by the
//!   commands that accept `--device`
//!
//! ### Playback
//!
//! - [`play`], [`pause`], [`next`], [`previous`] - Transport control
//! - [`queue_add`] - Appends an item to the queue
//! - [`shuffle`], [`repeat`], [`volume`] - Playback settings
//! - [`status`] - Prints the current playback snapshot
//!
//! ### Search
//!
//! - [`search_and_play`] - Prints search results and optionally plays the top one
//!
//! ### Interactive
//!
//! - [`run_menu`] - Numbered menu driving the same functions
//!
//! ## Error Handling
//!
//! Commands never exit the process. They return [`Res`](crate::Res) and the
//! entry point decides: the one-shot binary prints the error and exits with
//! status 1, the menu prints a warning and shows the menu again.
//!
//! ## Validation
//!
//! Arguments are validated into an [`Intent`] before a session exists, so a
//! malformed argument never triggers authorization or a remote call.

mod device;
mod menu;
mod playback;
mod search;

pub use device::devices;
pub use device::ensure_device;
pub use device::find_device;
pub use device::set_device;
pub use device::switch_to;
pub use menu::FAREWELL;
pub use menu::MENU_PACING;
pub use menu::run_menu;
pub use playback::next;
pub use playback::pause;
pub use playback::play;
pub use playback::play_target;
pub use playback::previous;
pub use playback::queue_add;
pub use playback::repeat;
pub use playback::shuffle;
pub use playback::status;
pub use playback::volume;
pub use search::play_result;
pub use search::search;
pub use search::search_and_play;

use crate::{
    Res,
    spotify::PlaybackApi,
    types::{RepeatMode, SearchKind, ShuffleChoice},
};

/// A validated one-shot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Devices,
    DeviceSet {
        device: String,
        play: bool,
    },
    Play {
        uri: Option<String>,
        device: Option<String>,
    },
    Pause,
    Next,
    Prev,
    QueueAdd {
        uri: String,
        device: Option<String>,
    },
    Shuffle(ShuffleChoice),
    Repeat(RepeatMode),
    Volume(u8),
    Status,
    Search {
        query: String,
        kind: SearchKind,
        limit: u32,
        play: bool,
        device: Option<String>,
    },
}

/// Executes a one-shot command against the session.
pub async fn dispatch<A: PlaybackApi>(api: &A, intent: &Intent) -> Res<()> {
    match intent {
        Intent::Devices => devices(api).await.map(|_| ()),
        Intent::DeviceSet { device, play } => set_device(api, device, *play).await,
        Intent::Play { uri, device } => play(api, uri.as_deref(), device.as_deref()).await,
        Intent::Pause => pause(api).await,
        Intent::Next => next(api).await,
        Intent::Prev => previous(api).await,
        Intent::QueueAdd { uri, device } => queue_add(api, uri, device.as_deref()).await,
        Intent::Shuffle(choice) => shuffle(api, *choice).await.map(|_| ()),
        Intent::Repeat(mode) => repeat(api, *mode).await,
        Intent::Volume(percent) => volume(api, *percent).await,
        Intent::Status => status(api).await,
        Intent::Search {
            query,
            kind,
            limit,
            play,
            device,
        } => search_and_play(api, query, *kind, *limit, *play, device.as_deref()).await,
    }
}
