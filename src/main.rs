use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use toptracks::{
    cli,
    config::{self, Config},
    types::{TimeRange, TrackQuery},
    warning,
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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify through the backend
    Login(TrackOptions),

    /// Complete a sign-in from the URL the browser landed on
    Callback(CallbackOptions),

    /// Show your top tracks
    Show(TrackOptions),

    /// Keep the page open and refresh or sign out interactively
    Session(TrackOptions),

    /// Forget the stored session
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct TrackOptions {
    /// Number of tracks to request
    #[clap(long, default_value_t = 20)]
    pub limit: u32,

    /// Listening period the ranking covers
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub time_range: TimeRange,
}

impl From<TrackOptions> for TrackQuery {
    fn from(opt: TrackOptions) -> Self {
        TrackQuery {
            limit: opt.limit,
            time_range: opt.time_range,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CallbackOptions {
    /// Landing URL containing `code` and `state`
    pub url: String,

    #[clap(flatten)]
    pub tracks: TrackOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Login(opt) => cli::login(config, opt.into()).await,
        Command::Callback(opt) => cli::callback(config, opt.tracks.into(), opt.url).await,
        Command::Show(opt) => cli::show(config, opt.into()).await,
        Command::Session(opt) => cli::session(config, opt.into()).await,
        Command::Logout => cli::logout(config).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
