use crate::{
    Res,
    cli::device::ensure_device,
    error::During,
    presenter,
    spotify::PlaybackApi,
    success,
    types::{PlayTarget, RepeatMode, ShuffleChoice},
};

/// Resumes playback, or plays `uri` as a single item, on the resolved device.
pub async fn play<A: PlaybackApi>(api: &A, uri: Option<&str>, device: Option<&str>) -> Res<()> {
    let device_id = ensure_device(api, device, true).await?;

    match uri {
        Some(uri) => {
            let target = PlayTarget::Track(uri.to_string());
            api.start_playback(device_id.as_deref(), Some(&target))
                .await
                .during("start playback (uri)")?;
            success!("Playing: {}", uri);
        }
        None => {
            api.start_playback(device_id.as_deref(), None)
                .await
                .during("resume playback")?;
            success!("Resumed playback.");
        }
    }
    Ok(())
}

/// Starts `target` on whatever device Spotify considers current.
pub async fn play_target<A: PlaybackApi>(api: &A, target: &PlayTarget) -> Res<()> {
    api.start_playback(None, Some(target))
        .await
        .during("start playback")?;
    success!("Started playback.");
    Ok(())
}

pub async fn pause<A: PlaybackApi>(api: &A) -> Res<()> {
    api.pause_playback().await.during("pause")?;
    success!("Paused.");
    Ok(())
}

pub async fn next<A: PlaybackApi>(api: &A) -> Res<()> {
    api.next_track().await.during("next track")?;
    success!("Skipped to next track.");
    Ok(())
}

pub async fn previous<A: PlaybackApi>(api: &A) -> Res<()> {
    api.previous_track().await.during("previous track")?;
    success!("Went to previous track.");
    Ok(())
}

pub async fn queue_add<A: PlaybackApi>(api: &A, uri: &str, device: Option<&str>) -> Res<()> {
    let device_id = ensure_device(api, device, false).await?;
    api.add_to_queue(uri, device_id.as_deref())
        .await
        .during("add to queue")?;
    success!("Added to queue: {}", uri);
    Ok(())
}

/// Applies a shuffle choice and returns the state that was set. `Toggle`
/// reads a fresh snapshot first; no snapshot counts as shuffle off.
pub async fn shuffle<A: PlaybackApi>(api: &A, choice: ShuffleChoice) -> Res<bool> {
    let state = match choice {
        ShuffleChoice::On => true,
        ShuffleChoice::Off => false,
        ShuffleChoice::Toggle => {
            let current = api
                .current_playback()
                .await
                .during("read shuffle state")?
                .map(|pb| pb.shuffle_state)
                .unwrap_or(false);
            !current
        }
    };

    api.set_shuffle(state).await.during("set shuffle")?;
    success!("Shuffle {}.", if state { "on" } else { "off" });
    Ok(state)
}

pub async fn repeat<A: PlaybackApi>(api: &A, mode: RepeatMode) -> Res<()> {
    api.set_repeat(mode).await.during("set repeat")?;
    success!("Repeat set to: {}", mode);
    Ok(())
}

pub async fn volume<A: PlaybackApi>(api: &A, percent: u8) -> Res<()> {
    api.set_volume(percent).await.during("set volume")?;
    success!("Volume set to {}%", percent);
    Ok(())
}

pub async fn status<A: PlaybackApi>(api: &A) -> Res<()> {
    let playback = api
        .current_playback()
        .await
        .during("get current playback")?;
    println!("{}", presenter::format_status(playback.as_ref()));
    Ok(())
}
