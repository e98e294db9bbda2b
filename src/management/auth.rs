use chrono::Utc;
use reqwest::Client;

use crate::{error::Result, spotify, types::Token};

/// Seconds before expiry at which a token is treated as stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Keeps a client-credentials token alive for the duration of a run.
///
/// The token lives in memory only; every process starts with a fresh exchange.
pub struct TokenManager {
    client_id: String,
    client_secret: String,
    token_url: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(client_id: String, client_secret: String, token_url: String) -> Self {
        TokenManager {
            client_id,
            client_secret,
            token_url,
            token: None,
        }
    }

    /// Returns an access token, exchanging credentials first when none is held
    /// or the current one is about to expire.
    pub async fn get_valid_token(&mut self, http: &Client) -> Result<String> {
        match &self.token {
            Some(token) if !Self::is_expired(token, Utc::now().timestamp() as u64) => {
                Ok(token.access_token.clone())
            }
            _ => {
                let token = spotify::auth::request_client_token(
                    http,
                    &self.token_url,
                    &self.client_id,
                    &self.client_secret,
                )
                .await?;
                let access_token = token.access_token.clone();
                self.token = Some(token);
                Ok(access_token)
            }
        }
    }

    fn is_expired(token: &Token, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
    }
}
