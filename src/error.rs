//! Error types shared by every stage of the analysis run.
//!
//! All variants are terminal: the binary reports the message and exits with
//! status 1. There is no retry or partial-results mode above the HTTP layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The application credentials are not set.
    #[error("SPOTIPY_CLIENT_ID and SPOTIPY_CLIENT_SECRET environment variables are required.")]
    MissingCredentials,

    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication or a playlist request failed against the remote service.
    #[error("Spotify API error: {0}")]
    Api(String),

    /// The chart could not be drawn or written.
    #[error("Render error: {0}")]
    Render(String),

    /// The playlist yielded no track with a usable release date.
    #[error("No tracks with a release date were found in the playlist")]
    NoData,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Error::Api(format!("request timed out: {err}"));
        }
        Error::Api(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
