use crate::{
    Res,
    error::{During, Error},
    presenter,
    spotify::PlaybackApi,
    success,
    types::Device,
};

/// Looks a device up by exact id first, then by case-insensitive name
/// substring. The first match in listing order wins. Devices without an id
/// cannot receive playback and are never returned.
pub fn find_device<'a>(devices: &'a [Device], query: &str) -> Option<&'a Device> {
    let targetable = || devices.iter().filter(|d| d.id.is_some());

    if let Some(device) = targetable().find(|d| d.id.as_deref() == Some(query)) {
        return Some(device);
    }

    let needle = query.to_lowercase();
    targetable().find(|d| d.name.to_lowercase().contains(&needle))
}

fn target_id(device: &Device) -> Res<&str> {
    device
        .id
        .as_deref()
        .ok_or_else(|| Error::InvalidArgument(format!("Device '{}' has no id.", device.name)))
}

/// Picks the device a command should target.
///
/// With an explicit query the device is resolved and playback is transferred
/// to it. Without one, the active device is preferred, then the first listed
/// one; `None` (nothing listed, or the pick has no id) lets Spotify choose.
pub async fn ensure_device<A: PlaybackApi>(
    api: &A,
    explicit: Option<&str>,
    force_play: bool,
) -> Res<Option<String>> {
    let devices = api.devices().await.during("list devices")?;

    if let Some(query) = explicit {
        let device = find_device(&devices, query)
            .ok_or_else(|| Error::DeviceNotFound(query.to_string()))?;
        let target = target_id(device)?.to_string();
        api.transfer_playback(&target, force_play)
            .await
            .during("transfer playback")?;
        return Ok(Some(target));
    }

    // a restricted active device yields no id, Spotify then picks the target
    let chosen = devices
        .iter()
        .find(|d| d.is_active)
        .or_else(|| devices.first())
        .and_then(|d| d.id.clone());
    Ok(chosen)
}

pub async fn devices<A: PlaybackApi>(api: &A) -> Res<Vec<Device>> {
    let devices = api.devices().await.during("list devices")?;
    println!("{}", presenter::format_devices(&devices));
    Ok(devices)
}

pub async fn set_device<A: PlaybackApi>(api: &A, query: &str, play: bool) -> Res<()> {
    let devices = api.devices().await.during("list devices")?;
    let target = find_device(&devices, query)
        .ok_or_else(|| Error::DeviceNotFound(query.to_string()))?;

    api.transfer_playback(target_id(target)?, play)
        .await
        .during("transfer playback")?;
    success!("Transferred playback to device: {}", query);
    Ok(())
}

/// Transfers playback to the 1-indexed entry of a listing without forcing
/// playback to start.
pub async fn switch_to<A: PlaybackApi>(api: &A, devices: &[Device], choice: usize) -> Res<()> {
    let device = choice
        .checked_sub(1)
        .and_then(|idx| devices.get(idx))
        .ok_or_else(|| Error::InvalidArgument("Invalid selection.".to_string()))?;

    api.transfer_playback(target_id(device)?, false)
        .await
        .during("transfer playback")?;
    success!("Transferred playback to: {}", device.name);
    Ok(())
}
