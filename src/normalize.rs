//! Record normalization: raw playlist items to `(track, artist, year, decade)`.
//!
//! Items without a track, an album, a release date or an artist are dropped
//! silently; callers that want to report the gap use [`normalize_with_stats`].

use crate::{
    types::{NormalizedRecord, RawItem},
    utils,
};

/// Result of a normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalization {
    pub records: Vec<NormalizedRecord>,
    pub skipped: usize,
}

/// Flattens raw items into records, preserving their relative order.
pub fn normalize(items: &[RawItem]) -> Vec<NormalizedRecord> {
    normalize_with_stats(items).records
}

/// Like [`normalize`], also counting the items that were dropped.
pub fn normalize_with_stats(items: &[RawItem]) -> Normalization {
    let mut out = Normalization::default();

    for item in items {
        match normalize_item(item) {
            Some(record) => out.records.push(record),
            None => out.skipped += 1,
        }
    }

    out
}

fn normalize_item(item: &RawItem) -> Option<NormalizedRecord> {
    let track = item.track.as_ref()?;
    let release_date = track.album.as_ref()?.release_date.as_deref()?;
    if release_date.is_empty() {
        return None;
    }
    // zero-artist entries are treated like any other missing field
    let artist = track.artists.first()?;
    let year = utils::parse_release_year(release_date)?;

    Some(NormalizedRecord {
        track: track.name.clone(),
        artist: artist.name.clone(),
        year,
        decade: utils::decade_of(year),
    })
}

/// Stable ascending sort by year; ties keep playlist order.
pub fn sort_by_year(records: &mut [NormalizedRecord]) {
    records.sort_by_key(|r| r.year);
}
