use std::{io::Write, time::Duration};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    Res,
    cli::{device, playback, search},
    error::Error,
    spotify::PlaybackApi,
    utils, warning,
};

/// Pause after each command so the output can be read before the menu is
/// printed again.
pub const MENU_PACING: Duration = Duration::from_millis(300);

pub const FAREWELL: &str = "Goodbye!";

const MENU_SEARCH_LIMIT: u32 = 10;

const MENU: &str = "\n=== Spotify Terminal Controller ===
 1) Status (now playing)
 2) Play / Resume
 3) Pause
 4) Next track
 5) Previous track
 6) Add to queue
 7) Volume 0–100
 8) Shuffle on/off/toggle
 9) Repeat off/context/track
10) Devices (list)
11) Switch device
12) Play a specific URI/URL
13) Search & (optionally) play
14) Refresh
15) Quit";

/// Runs the interactive menu until the user quits or the input ends.
///
/// Every selection goes through the same functions as the one-shot
/// commands; failures are printed as warnings and the menu comes back.
pub async fn run_menu<A, R>(api: &A, input: R)
where
    A: PlaybackApi,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        println!("{}", MENU);
        let Some(choice) = prompt(&mut lines, "\nSelect option #: ").await else {
            println!("\n{}", FAREWELL);
            return;
        };

        let outcome = match choice.trim() {
            "1" | "14" => playback::status(api).await,
            "2" => playback::play(api, None, None).await,
            "3" => playback::pause(api).await,
            "4" => playback::next(api).await,
            "5" => playback::previous(api).await,
            "6" => match prompt(&mut lines, "Track URI/URL to add to queue: ").await {
                Some(uri) if !uri.trim().is_empty() => {
                    playback::queue_add(api, uri.trim(), None).await
                }
                Some(_) => Ok(()),
                None => break,
            },
            "7" => match prompt(&mut lines, "Volume (0–100): ").await {
                Some(value) => match value.trim().parse::<i64>() {
                    Ok(pct) => match utils::parse_volume(pct) {
                        Ok(pct) => playback::volume(api, pct).await,
                        Err(e) => Err(e),
                    },
                    Err(_) => Err(Error::InvalidArgument("Enter a number.".to_string())),
                },
                None => break,
            },
            "8" => match prompt(&mut lines, "Shuffle (on/off/toggle): ").await {
                Some(state) => match utils::parse_shuffle(&state) {
                    Ok(choice) => playback::shuffle(api, choice).await.map(|_| ()),
                    Err(e) => Err(e),
                },
                None => break,
            },
            "9" => match prompt(&mut lines, "Repeat (off/context/track): ").await {
                Some(state) => match utils::parse_repeat(&state) {
                    Ok(mode) => playback::repeat(api, mode).await,
                    Err(e) => Err(e),
                },
                None => break,
            },
            "10" => device::devices(api).await.map(|_| ()),
            "11" => match switch_device(api, &mut lines).await {
                Some(result) => result,
                None => break,
            },
            "12" => match prompt(&mut lines, "Enter track/album/playlist URI or URL: ").await {
                Some(uri) if !uri.trim().is_empty() => {
                    let target = utils::guess_play_target(uri.trim());
                    playback::play_target(api, &target).await
                }
                Some(_) => continue,
                None => break,
            },
            "13" => match search_and_pick(api, &mut lines).await {
                Some(result) => result,
                None => break,
            },
            "15" => {
                println!("{}", FAREWELL);
                return;
            }
            _ => Err(Error::InvalidArgument("Unknown option.".to_string())),
        };

        if let Err(e) = outcome {
            warning!("{}", e);
        }

        tokio::time::sleep(MENU_PACING).await;
    }

    println!("\n{}", FAREWELL);
}

/// Prints `text` and reads one line. `None` on end of input.
async fn prompt<R>(lines: &mut Lines<R>, text: &str) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", text);
    if let Err(e) = std::io::stdout().flush() {
        tracing::debug!("cannot flush prompt: {}", e);
    }

    match lines.next_line().await {
        Ok(line) => line,
        Err(e) => {
            tracing::debug!("cannot read input: {}", e);
            None
        }
    }
}

/// `None` when the input ended while prompting.
async fn switch_device<A, R>(api: &A, lines: &mut Lines<R>) -> Option<Res<()>>
where
    A: PlaybackApi,
    R: AsyncBufRead + Unpin,
{
    let devices = match device::devices(api).await {
        Ok(devices) if devices.is_empty() => return Some(Ok(())),
        Ok(devices) => devices,
        Err(e) => return Some(Err(e)),
    };

    let selection = prompt(lines, "\nSelect device # (or press Enter to cancel): ").await?;
    let selection = selection.trim();
    if selection.is_empty() {
        return Some(Ok(()));
    }

    Some(match selection.parse::<usize>() {
        Ok(choice) => device::switch_to(api, &devices, choice).await,
        Err(_) => Err(Error::InvalidArgument(
            "Please enter a number.".to_string(),
        )),
    })
}

/// `None` when the input ended while prompting.
async fn search_and_pick<A, R>(api: &A, lines: &mut Lines<R>) -> Option<Res<()>>
where
    A: PlaybackApi,
    R: AsyncBufRead + Unpin,
{
    let query = prompt(lines, "Search query: ").await?;
    let kind = prompt(
        lines,
        "Type (track/album/playlist/artist) [default: track]: ",
    )
    .await?;
    let kind = if kind.trim().is_empty() {
        "track"
    } else {
        kind.trim()
    };

    let kind = match utils::parse_search_kind(kind) {
        Ok(kind) => kind,
        Err(e) => return Some(Err(e)),
    };

    let items = match search::search(api, query.trim(), kind, MENU_SEARCH_LIMIT).await {
        Ok(items) if items.is_empty() => return Some(Ok(())),
        Ok(items) => items,
        Err(e) => return Some(Err(e)),
    };

    let pick = prompt(lines, "Play # (or Enter to skip): ").await?;
    let pick = pick.trim();
    if pick.is_empty() {
        return Some(Ok(()));
    }

    Some(match pick.parse::<usize>() {
        Ok(n) => match n.checked_sub(1).and_then(|idx| items.get(idx)) {
            Some(item) => search::play_result(api, item, kind, None).await,
            None => Err(Error::InvalidArgument("Invalid selection.".to_string())),
        },
        Err(_) => Err(Error::InvalidArgument("Enter a number.".to_string())),
    })
}
