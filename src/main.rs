use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_years::{
    cli,
    config::{self, Config, Overrides},
    error,
    error::Error,
    info, warning,
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
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chart the release years of a playlist (default)
    Analyze(AnalyzeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Playlist URL, URI or id (overrides PLAYLIST_URL)
    #[clap(long)]
    url: Option<String>,

    /// Where to write the chart
    #[clap(long)]
    output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[clap(long)]
    timeout: Option<u64>,

    /// Give up after this many pages
    #[clap(long)]
    max_pages: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        Some(Command::Analyze(opt)) => run_analyze(opt).await,
        None => run_analyze(AnalyzeOptions::default()).await,
    }
}

async fn run_analyze(opt: AnalyzeOptions) {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match build_config(opt) {
        Ok(config) => config,
        Err(Error::MissingCredentials) => {
            warning!("Error: {}", Error::MissingCredentials);
            info!("Please set them directly or create a .env file in the working directory");
            info!("or at {}.", config::env_file_path().display());
            info!("You can get credentials at https://developer.spotify.com/dashboard");
            std::process::exit(1);
        }
        Err(e) => error!("{}", e),
    };

    if let Err(e) = cli::analyze(&config).await {
        error!("{}", e);
    }
}

fn build_config(opt: AnalyzeOptions) -> Result<Config, Error> {
    Config::from_env()?.with_overrides(Overrides {
        playlist_url: opt.url,
        output_path: opt.output,
        timeout_secs: opt.timeout,
        max_pages: opt.max_pages,
    })
}
