use reqwest::Client;

use crate::{
    config::{Config, DEFAULT_MAX_PAGES},
    error::{Error, Result},
    management::TokenManager,
    types::{PlaylistId, PlaylistItemsPage, RawItem},
};

/// Largest page size the playlist items endpoint accepts.
pub const PAGE_LIMIT: u32 = 100;

/// A paginated source of playlist items.
///
/// The first page is addressed by playlist id; every following page by the
/// opaque `next` value the previous page returned.
pub trait PlaylistSource {
    async fn first_page(&mut self, playlist_id: &PlaylistId) -> Result<PlaylistItemsPage>;

    async fn next_page(&mut self, next: &str) -> Result<PlaylistItemsPage>;
}

/// Retrieves every item of a playlist, following `next` until it is null.
///
/// Pages are requested strictly one after another since each request depends
/// on the cursor of the previous response. Items keep the playlist order.
/// Any failed request aborts the whole fetch.
pub async fn fetch_all_items<S>(playlist_id: &PlaylistId, source: &mut S) -> Result<Vec<RawItem>>
where
    S: PlaylistSource,
{
    fetch_all_items_bounded(playlist_id, source, DEFAULT_MAX_PAGES).await
}

/// Same as [`fetch_all_items`] but gives up after `max_pages` pages.
///
/// Well-formed playlists stay far below the default cap; hitting it means the
/// API kept returning a `next` cursor and is reported as [`Error::Api`].
pub async fn fetch_all_items_bounded<S>(
    playlist_id: &PlaylistId,
    source: &mut S,
    max_pages: usize,
) -> Result<Vec<RawItem>>
where
    S: PlaylistSource,
{
    let page = source.first_page(playlist_id).await?;
    let mut items = page.items;
    let mut next = page.next;
    let mut pages = 1;

    while let Some(cursor) = next {
        if pages >= max_pages {
            return Err(Error::Api(format!(
                "playlist {} still reports more items after {} pages",
                playlist_id, max_pages
            )));
        }
        let page = source.next_page(&cursor).await?;
        items.extend(page.items);
        next = page.next;
        pages += 1;
    }

    Ok(items)
}

/// Web API backed [`PlaylistSource`].
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: String, tokens: TokenManager) -> Self {
        SpotifyClient {
            http,
            api_url,
            tokens,
        }
    }

    /// Builds a client with the configured timeout and credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let tokens = TokenManager::new(
            config.client_id.clone(),
            config.client_secret.clone(),
            config.token_url.clone(),
        );
        Ok(Self::new(http, config.api_url.clone(), tokens))
    }

    /// Obtains a token up front so credential problems surface before any fetch.
    pub async fn authorize(&mut self) -> Result<()> {
        self.tokens.get_valid_token(&self.http).await?;
        Ok(())
    }

    pub fn first_page_url(&self, playlist_id: &PlaylistId) -> String {
        format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            limit = PAGE_LIMIT
        )
    }

    async fn get_page(&mut self, url: &str) -> Result<PlaylistItemsPage> {
        let token = self.tokens.get_valid_token(&self.http).await?;
        let http = &self.http;
        let response = super::send_with_retry(|| http.get(url).bearer_auth(&token)).await?;
        Ok(response.json::<PlaylistItemsPage>().await?)
    }
}

impl PlaylistSource for SpotifyClient {
    async fn first_page(&mut self, playlist_id: &PlaylistId) -> Result<PlaylistItemsPage> {
        let url = self.first_page_url(playlist_id);
        self.get_page(&url).await
    }

    async fn next_page(&mut self, next: &str) -> Result<PlaylistItemsPage> {
        self.get_page(next).await
    }
}
