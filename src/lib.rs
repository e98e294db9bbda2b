//! Spotify Playlist Release Year Analysis
//!
//! This library fetches the items of a Spotify playlist, derives the release
//! year of every track and charts the distribution by year and by decade.
//!
//! # Modules
//!
//! - `chart` - Two-panel PNG histogram rendering
//! - `cli` - Command-line command implementations
//! - `config` - Configuration from environment variables and `.env` files
//! - `error` - Error taxonomy shared by every stage
//! - `management` - Access token lifecycle
//! - `normalize` - Raw playlist items to year records
//! - `spotify` - Spotify Web API client and paginated fetcher
//! - `types` - Data structures and type definitions
//! - `utils` - Year parsing, histograms and console helpers
//!
//! # Example
//!
//! ```
//! use playlist_years::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> playlist_years::error::Result<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::analyze(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod normalize;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}...", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Plot saved to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is
/// only used for fatal errors at the top level of a command.
///
/// # Example
///
/// ```
/// error!("Error fetching playlist: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as dropped playlist items or retried
/// requests.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
