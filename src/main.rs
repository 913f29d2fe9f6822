use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use spotify_cli::{
    Res,
    cli::{self, Intent},
    config, error, spotify, utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Print diagnostic logs (requests, token refresh) to stderr
    #[clap(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List available devices
    Devices,

    /// Manage devices
    Device(DeviceOptions),

    /// Resume playback or play a specific URI/URL
    Play(PlayOptions),

    /// Pause playback
    Pause,

    /// Skip to next track
    Next,

    /// Go to previous track
    Prev,

    /// Manage queue
    Queue(QueueOptions),

    /// Turn shuffle on/off or toggle
    Shuffle(StateOption),

    /// Set repeat mode
    Repeat(StateOption),

    /// Set volume percent (0–100)
    Volume(VolumeOption),

    /// Show now playing and device
    Status,

    /// Search for tracks/albums/playlists/artists
    Search(SearchOptions),

    /// Interactive menu
    Menu,

    /// Authorize with Spotify again, replacing the cached token
    Auth,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DeviceOptions {
    #[command(subcommand)]
    pub command: DeviceSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeviceSubcommand {
    /// Transfer playback to a device (by name or id)
    Set(DeviceSetOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct DeviceSetOpts {
    /// Device name or id (substring match on name allowed)
    pub device: String,

    /// Start playback after transfer
    #[clap(long)]
    pub play: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Track URI or open.spotify.com URL
    #[clap(long)]
    pub uri: Option<String>,

    /// Device name or id
    #[clap(long)]
    pub device: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct QueueOptions {
    #[command(subcommand)]
    pub command: QueueSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QueueSubcommand {
    /// Add a track to the queue by URI/URL
    Add(QueueAddOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct QueueAddOpts {
    /// Track URI/URL to queue
    pub uri: String,

    /// Device name or id (optional)
    #[clap(long)]
    pub device: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct StateOption {
    /// on | off | toggle (shuffle), off | context | track (repeat)
    pub state: String,
}

#[derive(Parser, Debug, Clone)]
#[command(allow_negative_numbers = true)]
pub struct VolumeOption {
    pub percent: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query (quotes recommended)
    pub query: String,

    /// track | album | playlist | artist
    #[clap(long = "type", default_value = "track")]
    pub kind: String,

    /// Max number of results to print
    #[clap(long, default_value_t = 5)]
    pub limit: u32,

    /// Play the top result immediately
    #[clap(long)]
    pub play: bool,

    /// Device name or id (optional)
    #[clap(long)]
    pub device: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spotify_cli=debug")
    } else {
        EnvFilter::try_from_env("SPOTIFY_CLI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validates the arguments of a one-shot command. `None` for the commands
/// that are not dispatched (`menu`, `auth`, `completions`).
fn intent(command: Command) -> Res<Option<Intent>> {
    let intent = match command {
        Command::Devices => Intent::Devices,
        Command::Device(opt) => match opt.command {
            DeviceSubcommand::Set(s) => Intent::DeviceSet {
                device: s.device,
                play: s.play,
            },
        },
        Command::Play(opt) => Intent::Play {
            uri: opt.uri,
            device: opt.device,
        },
        Command::Pause => Intent::Pause,
        Command::Next => Intent::Next,
        Command::Prev => Intent::Prev,
        Command::Queue(opt) => match opt.command {
            QueueSubcommand::Add(a) => Intent::QueueAdd {
                uri: a.uri,
                device: a.device,
            },
        },
        Command::Shuffle(opt) => Intent::Shuffle(utils::parse_shuffle(&opt.state)?),
        Command::Repeat(opt) => Intent::Repeat(utils::parse_repeat(&opt.state)?),
        Command::Volume(opt) => Intent::Volume(utils::parse_volume(opt.percent)?),
        Command::Status => Intent::Status,
        Command::Search(opt) => Intent::Search {
            query: opt.query,
            kind: utils::parse_search_kind(&opt.kind)?,
            limit: utils::parse_search_limit(opt.limit)?,
            play: opt.play,
            device: opt.device,
        },
        Command::Menu | Command::Auth | Command::Completions(_) => return Ok(None),
    };
    Ok(Some(intent))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let intent = match intent(cli.command.clone()) {
        Ok(intent) => intent,
        Err(e) => error!("{}", e),
    };

    config::load_env().await;
    let credentials = match config::credentials() {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };

    if let Command::Auth = cli.command {
        if let Err(e) = spotify::auth::authorize(&credentials).await {
            error!("{}", e);
        }
        return;
    }

    let session = match spotify::auth::connect(&credentials).await {
        Ok(session) => session,
        Err(e) => error!("{}", e),
    };

    match intent {
        Some(intent) => {
            if let Err(e) = cli::dispatch(&session, &intent).await {
                error!("{}", e);
            }
        }
        None => {
            tokio::select! {
                _ = cli::run_menu(&session, BufReader::new(tokio::io::stdin())) => {}
                _ = tokio::signal::ctrl_c() => println!("\n{}", cli::FAREWELL),
            }
            // stdin is read on a blocking thread the runtime would wait for
            std::process::exit(0);
        }
    }
}
