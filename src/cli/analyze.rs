use tabled::Table;

use crate::{
    chart,
    config::Config,
    error::Result,
    info,
    normalize::{self, Normalization},
    spotify::{self, PlaylistSource, SpotifyClient},
    success,
    types::PlaylistId,
    utils, warning,
};

/// Fetches, normalizes and charts the configured playlist.
///
/// The steps run strictly in sequence and the first failure ends the run:
/// 1. **Playlist id**: extracted from the configured URL
/// 2. **Authentication**: client-credentials token exchange
/// 3. **Fetch**: every page of playlist items, with a spinner while waiting
/// 4. **Normalize**: records sorted by release year, dropped items reported
/// 5. **Render**: the chart written to the configured output path
/// 6. **Summary**: per-decade table printed to stdout
pub async fn analyze(config: &Config) -> Result<()> {
    let playlist_id = PlaylistId::from_url(&config.playlist_url)?;
    let mut client = SpotifyClient::from_config(config)?;

    info!("Fetching playlist {}...", playlist_id);
    let pb = utils::new_spinner("Fetching playlist items...");
    let collected = async {
        client.authorize().await?;
        collect_records(&playlist_id, &mut client, config.max_pages).await
    }
    .await;
    pb.finish_and_clear();
    let Normalization { records, skipped } = collected?;

    success!("Found {} tracks with a release date", records.len());
    if skipped > 0 {
        warning!(
            "Skipped {} playlist items without track, artist or release date",
            skipped
        );
    }

    chart::render(&records, records.len(), &config.output_path)?;

    let decades = utils::decade_histogram(&records);
    println!("{}", Table::new(utils::decade_table_rows(&decades)));
    success!("Plot saved to {}", config.output_path.display());

    Ok(())
}

/// Fetches every page from `source` and turns the items into year-sorted records.
pub async fn collect_records<S>(
    playlist_id: &PlaylistId,
    source: &mut S,
    max_pages: usize,
) -> Result<Normalization>
where
    S: PlaylistSource,
{
    let items = spotify::fetch_all_items_bounded(playlist_id, source, max_pages).await?;
    let mut normalization = normalize::normalize_with_stats(&items);
    normalize::sort_by_year(&mut normalization.records);
    Ok(normalization)
}
