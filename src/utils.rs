use std::{collections::BTreeMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{DecadeTableRow, NormalizedRecord};

/// Parses the year from a release date of any precision.
///
/// Only the first four characters are looked at (`"1975"`, `"1975-03"` and
/// `"1975-03-01"` all give 1975). No calendar validation is done, so `"0000"`
/// is accepted. Returns `None` when the prefix is not four ASCII digits.
pub fn parse_release_year(release_date: &str) -> Option<i32> {
    let prefix = release_date.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

pub fn decade_of(year: i32) -> i32 {
    (year / 10) * 10
}

/// Song count for every year between the oldest and newest record, inclusive.
///
/// Years without songs are present with a count of zero so they show up as
/// gaps on the chart.
pub fn year_histogram(records: &[NormalizedRecord]) -> Vec<(i32, u32)> {
    let counts = count_by(records, |r| r.year);
    let (Some(min), Some(max)) = (
        counts.keys().next().copied(),
        counts.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    (min..=max)
        .map(|year| (year, counts.get(&year).copied().unwrap_or(0)))
        .collect()
}

/// Song count per decade, ascending, for decades that have at least one song.
pub fn decade_histogram(records: &[NormalizedRecord]) -> Vec<(i32, u32)> {
    count_by(records, |r| r.decade).into_iter().collect()
}

fn count_by<F>(records: &[NormalizedRecord], key: F) -> BTreeMap<i32, u32>
where
    F: Fn(&NormalizedRecord) -> i32,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

pub fn decade_table_rows(histogram: &[(i32, u32)]) -> Vec<DecadeTableRow> {
    histogram
        .iter()
        .map(|(decade, songs)| DecadeTableRow {
            decade: format!("{}s", decade),
            songs: *songs,
        })
        .collect()
}

pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
