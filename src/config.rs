//! Configuration management for the playlist analysis.
//!
//! Values are read from the process environment, optionally populated from
//! `.env` files beforehand. The hierarchy is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/playlist-years/.env`)
//! 4. Application defaults (where applicable)
//!
//! Everything the run needs is collected into a [`Config`] value. Command line
//! [`Overrides`] are applied on top, then the result is validated once and
//! handed to the fetcher and renderer explicitly.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::{Error, Result};

pub const CLIENT_ID_VAR: &str = "SPOTIPY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIPY_CLIENT_SECRET";
pub const PLAYLIST_URL_VAR: &str = "PLAYLIST_URL";
pub const API_URL_VAR: &str = "SPOTIFY_API_URL";
pub const TOKEN_URL_VAR: &str = "SPOTIFY_API_TOKEN_URL";
pub const TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";
pub const MAX_PAGES_VAR: &str = "MAX_PAGES";

pub const DEFAULT_PLAYLIST_URL: &str = "https://open.spotify.com/playlist/56afGpmssmu4sR9Pz92jfE";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_OUTPUT_PATH: &str = "playlist_years.png";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_PAGES: usize = 500;

const APP_DIR: &str = "playlist-years";

/// Loads `.env` files into the process environment.
///
/// The working directory is consulted first, then the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/playlist-years/.env`
/// - macOS: `~/Library/Application Support/playlist-years/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-years/.env`
///
/// Variables that are already set are never overwritten. A missing file is not
/// an error; an unreadable or malformed one is.
///
/// # Example
///
/// ```
/// use playlist_years::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<()> {
    load_env_file(Path::new(".env"))?;

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }
    load_env_file(&path)
}

fn load_env_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }
    dotenv::from_path(path)
        .map_err(|e| Error::Config(format!("Cannot load {}: {}", path.display(), e)))
}

/// Location of the user-level `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(".env");
    path
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub playlist_url: String,
    pub api_url: String,
    pub token_url: String,
    pub output_path: PathBuf,
    pub request_timeout: Duration,
    pub max_pages: usize,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as absent ones. Missing credentials
    /// produce [`Error::MissingCredentials`]; malformed numbers an [`Error::Config`].
    /// Range checks are left to [`Config::validate`] so overrides can still fix them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (client_id, client_secret) = match (get(CLIENT_ID_VAR), get(CLIENT_SECRET_VAR)) {
            (Some(id), Some(secret)) => (id, secret),
            _ => return Err(Error::MissingCredentials),
        };

        let request_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(parse_number(TIMEOUT_VAR, &raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let max_pages = match get(MAX_PAGES_VAR) {
            Some(raw) => parse_number(MAX_PAGES_VAR, &raw)?,
            None => DEFAULT_MAX_PAGES,
        };

        Ok(Config {
            client_id,
            client_secret,
            playlist_url: get(PLAYLIST_URL_VAR).unwrap_or_else(|| DEFAULT_PLAYLIST_URL.to_string()),
            api_url: get(API_URL_VAR)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token_url: get(TOKEN_URL_VAR).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            request_timeout,
            max_pages,
        })
    }

    /// Applies command line overrides and validates the result.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(url) = overrides.playlist_url {
            self.playlist_url = url;
        }
        if let Some(path) = overrides.output_path {
            self.output_path = path;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max_pages) = overrides.max_pages {
            self.max_pages = max_pages;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks the invariants that overrides could break.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(Error::Config(format!("{} must be greater than zero", TIMEOUT_VAR)));
        }
        if self.max_pages == 0 {
            return Err(Error::Config(format!("{} must be greater than zero", MAX_PAGES_VAR)));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Config("output path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Values given on the command line; `None` keeps the environment's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub playlist_url: Option<String>,
    pub output_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_pages: Option<usize>,
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::Config(format!("{} must be a positive integer, got '{}'", key, raw)))
}
