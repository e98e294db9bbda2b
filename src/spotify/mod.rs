//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API: the client-credentials token
//! exchange and the paginated "list playlist items" endpoint.
//!
//! ```text
//! CLI (analyze)
//!      ↓
//! playlist::fetch_all_items ── PlaylistSource trait
//!      ↓                           ↑
//! SpotifyClient ───────────────────┘
//!      ↓
//! TokenManager → auth::request_client_token
//!      ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as [`crate::error::Error::Api`] carrying the
//! provider's message where one is available. Two transient conditions are
//! retried before giving up:
//! - **502 Bad Gateway**: retried after a short pause
//! - **429 Too Many Requests**: retried after the `Retry-After` delay when it
//!   is at most two minutes
//!
//! A request is attempted at most [`MAX_ATTEMPTS`] times.

pub mod auth;
pub mod playlist;

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    types::ApiErrorResponse,
    warning,
};

pub use playlist::{PlaylistSource, SpotifyClient, fetch_all_items, fetch_all_items_bounded};

pub const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Sends a request built by `build`, retrying 502 and 429 responses.
///
/// The builder closure is called once per attempt since a sent request cannot
/// be reused. Non-success responses that are not retried are converted into
/// [`Error::Api`] with the provider's error message.
pub(crate) async fn send_with_retry<F>(build: F) -> Result<Response>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 1;

    loop {
        let response = build().send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if attempt < MAX_ATTEMPTS {
            if let Some(delay) = retry_delay(&response) {
                warning!(
                    "Spotify answered {} (attempt {}/{}), retrying in {}s",
                    status,
                    attempt,
                    MAX_ATTEMPTS,
                    delay.as_secs()
                );
                sleep(delay).await;
                attempt += 1;
                continue;
            }
        }

        return Err(api_error(response).await);
    }
}

fn retry_delay(response: &Response) -> Option<Duration> {
    match response.status() {
        StatusCode::BAD_GATEWAY => Some(BAD_GATEWAY_DELAY),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            if retry_after <= MAX_RETRY_AFTER_SECS {
                Some(Duration::from_secs(retry_after))
            } else {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again later.",
                    retry_after
                );
                None
            }
        }
        _ => None,
    }
}

async fn api_error(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Error::Api(format!("{} ({})", error_message(&body), status))
}

/// Extracts the human readable message from a Web API error body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(resp) => resp
            .error
            .message
            .unwrap_or_else(|| "unknown error".to_string()),
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Minimal HTTP/1.1 server answering each connection with the next canned response.
#[cfg(test)]
pub(crate) mod test_server {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };

    pub struct StubServer {
        listener: Option<TcpListener>,
        pub url: String,
        hits: Arc<AtomicUsize>,
    }

    impl StubServer {
        pub async fn bind() -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = format!("http://{}", listener.local_addr().unwrap());
            StubServer {
                listener: Some(listener),
                url,
                hits: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Starts answering; the last response repeats once the list is exhausted.
        pub fn serve(&mut self, responses: Vec<String>) {
            let listener = self.listener.take().expect("stub already serving");
            let hits = Arc::clone(&self.hits);

            tokio::spawn(async move {
                while let Ok((mut socket, _)) = listener.accept().await {
                    read_request(&mut socket).await;
                    let served = hits.fetch_add(1, Ordering::SeqCst);
                    let reply = responses
                        .get(served)
                        .or(responses.last())
                        .cloned()
                        .unwrap_or_default();
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            });
        }

        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    pub fn response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
        let extra: String = headers
            .iter()
            .map(|(name, value)| format!("{}: {}\r\n", name, value))
            .collect();
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n{}\r\n{}",
            status,
            body.len(),
            extra,
            body
        )
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    return;
                }
            }
        }
    }
}
