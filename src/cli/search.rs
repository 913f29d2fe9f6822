use crate::{
    Res,
    cli::device::ensure_device,
    error::During,
    presenter,
    spotify::PlaybackApi,
    success,
    types::{PlayTarget, SearchItem, SearchKind},
};

/// Runs a catalog search and prints the numbered results.
pub async fn search<A: PlaybackApi>(
    api: &A,
    query: &str,
    kind: SearchKind,
    limit: u32,
) -> Res<Vec<SearchItem>> {
    let mut items = api.search(query, kind, limit).await.during("search")?;
    items.truncate(limit as usize);
    println!(
        "{}",
        presenter::format_search_results(&items, kind, limit as usize)
    );
    Ok(items)
}

/// Plays a search result on the resolved device: tracks as a single item,
/// albums, playlists and artists as a context.
pub async fn play_result<A: PlaybackApi>(
    api: &A,
    item: &SearchItem,
    kind: SearchKind,
    device: Option<&str>,
) -> Res<()> {
    let device_id = ensure_device(api, device, true).await?;
    let target = PlayTarget::for_search_result(kind, item.uri.clone());

    api.start_playback(device_id.as_deref(), Some(&target))
        .await
        .during("start playback (search result)")?;
    success!("Playing {}: {}", kind, item.uri);
    Ok(())
}

/// One-shot search: print the results and optionally play the top one.
pub async fn search_and_play<A: PlaybackApi>(
    api: &A,
    query: &str,
    kind: SearchKind,
    limit: u32,
    play: bool,
    device: Option<&str>,
) -> Res<()> {
    let items = search(api, query, kind, limit).await?;

    if play && let Some(top) = items.first() {
        play_result(api, top, kind, device).await?;
    }
    Ok(())
}
