use playlist_years::cli::collect_records;
use playlist_years::error::{Error, Result};
use playlist_years::spotify::{PlaylistSource, fetch_all_items, fetch_all_items_bounded};
use playlist_years::types::{Album, PlaylistId, PlaylistItemsPage, RawItem, Track, TrackArtist};

/// Serves canned pages and records every request it receives.
struct MockSource {
    pages: Vec<PlaylistItemsPage>,
    requests: Vec<String>,
    fail_first: bool,
}

impl MockSource {
    fn new(pages: Vec<PlaylistItemsPage>) -> Self {
        Self {
            pages,
            requests: Vec::new(),
            fail_first: false,
        }
    }

    fn serve(&mut self, index: usize) -> Result<PlaylistItemsPage> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Api(format!("no page {}", index)))
    }
}

impl PlaylistSource for MockSource {
    async fn first_page(&mut self, playlist_id: &PlaylistId) -> Result<PlaylistItemsPage> {
        self.requests.push(format!("first:{}", playlist_id));
        if self.fail_first {
            return Err(Error::Api("Resource not found (404 Not Found)".to_string()));
        }
        self.serve(0)
    }

    async fn next_page(&mut self, next: &str) -> Result<PlaylistItemsPage> {
        self.requests.push(next.to_string());
        let index = next
            .rsplit("offset=")
            .next()
            .and_then(|offset| offset.parse::<usize>().ok())
            .map(|offset| offset / 100)
            .unwrap_or(usize::MAX);
        self.serve(index)
    }
}

fn item(n: usize, year: i32) -> RawItem {
    RawItem {
        track: Some(Track {
            name: format!("track-{}", n),
            artists: vec![TrackArtist {
                name: format!("artist-{}", n),
            }],
            album: Some(Album {
                name: None,
                release_date: Some(format!("{}-06-01", year)),
                release_date_precision: Some("day".to_string()),
            }),
        }),
    }
}

// Builds pages of the given sizes, linked through `next` URLs.
fn pages(sizes: &[usize]) -> Vec<PlaylistItemsPage> {
    let mut counter = 0;
    let total: usize = sizes.iter().sum();

    sizes
        .iter()
        .enumerate()
        .map(|(idx, size)| {
            let items = (0..*size)
                .map(|_| {
                    counter += 1;
                    item(counter, 2020 - (counter % 40) as i32)
                })
                .collect();
            let next = (idx + 1 < sizes.len()).then(|| {
                format!(
                    "https://api.spotify.com/v1/playlists/pl/tracks?limit=100&offset={}",
                    (idx + 1) * 100
                )
            });
            PlaylistItemsPage {
                items,
                next,
                total: Some(total as u64),
            }
        })
        .collect()
}

fn playlist_id() -> PlaylistId {
    PlaylistId::from_url("https://open.spotify.com/playlist/pl?si=x").unwrap()
}

#[tokio::test]
async fn test_three_pages_are_concatenated() {
    let mut source = MockSource::new(pages(&[100, 100, 37]));

    let items = fetch_all_items(&playlist_id(), &mut source).await.unwrap();

    assert_eq!(items.len(), 237);
    assert_eq!(source.requests.len(), 3);
    assert_eq!(source.requests[0], "first:pl");

    // Playlist order is preserved across page boundaries
    let names: Vec<String> = items
        .iter()
        .filter_map(|i| i.track.as_ref().map(|t| t.name.clone()))
        .collect();
    assert_eq!(names[0], "track-1");
    assert_eq!(names[100], "track-101");
    assert_eq!(names[236], "track-237");
}

#[tokio::test]
async fn test_single_page_issues_one_request() {
    let mut source = MockSource::new(pages(&[42]));

    let items = fetch_all_items(&playlist_id(), &mut source).await.unwrap();

    assert_eq!(items.len(), 42);
    assert_eq!(source.requests.len(), 1);
}

#[tokio::test]
async fn test_empty_playlist() {
    let mut source = MockSource::new(pages(&[0]));

    let items = fetch_all_items(&playlist_id(), &mut source).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(source.requests.len(), 1);
}

#[tokio::test]
async fn test_initial_failure_is_api_error() {
    let mut source = MockSource::new(pages(&[10]));
    source.fail_first = true;

    let result = fetch_all_items(&playlist_id(), &mut source).await;

    match result {
        Err(Error::Api(msg)) => assert!(msg.contains("Resource not found")),
        other => panic!("expected Api error, got {:?}", other.map(|i| i.len())),
    }
    assert_eq!(source.requests.len(), 1);
}

#[tokio::test]
async fn test_later_page_failure_aborts_fetch() {
    let mut broken = pages(&[100, 100]);
    broken[1].next = Some("https://api.spotify.com/v1/gone?offset=900".to_string());
    let mut source = MockSource::new(broken);

    let result = fetch_all_items(&playlist_id(), &mut source).await;

    assert!(matches!(result, Err(Error::Api(_))));
    assert_eq!(source.requests.len(), 3);
}

#[tokio::test]
async fn test_page_cap_stops_endless_pagination() {
    let mut looping = pages(&[5]);
    looping[0].next = Some("https://api.spotify.com/v1/playlists/pl/tracks?offset=0".to_string());
    let mut source = MockSource::new(looping);

    let result = fetch_all_items_bounded(&playlist_id(), &mut source, 4).await;

    assert!(matches!(result, Err(Error::Api(_))));
    assert_eq!(source.requests.len(), 4);
}

#[tokio::test]
async fn test_collect_records_sorts_by_year() {
    let mut source = MockSource::new(pages(&[100, 20]));

    let result = collect_records(&playlist_id(), &mut source, 10).await.unwrap();

    assert_eq!(result.records.len(), 120);
    assert_eq!(result.skipped, 0);
    assert!(result.records.windows(2).all(|w| w[0].year <= w[1].year));
    assert!(result.records.iter().all(|r| r.decade == r.year - r.year % 10));
}
