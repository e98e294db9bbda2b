use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Error;

const PLAYLIST_URI_PREFIX: &str = "spotify:playlist:";

/// Opaque playlist identifier as used in Web API paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Extracts the identifier from a share URL, a `spotify:playlist:` URI or a bare id.
    ///
    /// For URLs the trailing path segment is taken and any `?` query string is
    /// dropped, so `https://open.spotify.com/playlist/abc?si=xyz` yields `abc`.
    pub fn from_url(url: &str) -> Result<Self, Error> {
        let url = url.trim();
        let id = match url.strip_prefix(PLAYLIST_URI_PREFIX) {
            Some(rest) => rest,
            None => {
                let path = url.split('?').next().unwrap_or_default();
                path.trim_end_matches('/')
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
            }
        };

        if id.is_empty() {
            return Err(Error::Config(format!(
                "Cannot extract a playlist id from '{}'",
                url
            )));
        }

        Ok(PlaylistId(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlaylistId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlaylistId::from_url(s)
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    pub items: Vec<RawItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_date_precision: Option<String>,
}

/// Flattened view of one playlist entry with a known release year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub track: String,
    pub artist: String,
    pub year: i32,
    pub decade: i32,
}

#[derive(Tabled)]
pub struct DecadeTableRow {
    pub decade: String,
    pub songs: u32,
}

/// Error payload of the Web API, e.g. `{"error": {"status": 404, "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: Option<u16>,
    pub message: Option<String>,
}

/// Error payload of the accounts service, e.g. `{"error": "invalid_client", ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}
