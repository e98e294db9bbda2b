use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    error::{Error, Result},
    types::{AuthErrorResponse, Token},
};

/// Exchanges application credentials for an access token.
///
/// Implements the OAuth 2.0 client-credentials grant: the client id and secret
/// are sent as an HTTP Basic authorization header together with
/// `grant_type=client_credentials`. The resulting token grants access to
/// public catalog data only, which is all a playlist read needs.
///
/// # Arguments
///
/// * `http` - Shared HTTP client (carries the per-request timeout)
/// * `token_url` - Token endpoint, normally `https://accounts.spotify.com/api/token`
/// * `client_id` / `client_secret` - Application credentials from the developer dashboard
///
/// # Errors
///
/// Returns [`Error::Api`] when the request cannot be sent, times out, or the
/// accounts service rejects the credentials. In the latter case the message is
/// the service's `error_description` (or `error` code when no description is given).
pub async fn request_client_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<Token> {
    let res = http
        .post(token_url)
        .header(AUTHORIZATION, basic_auth_header(client_id, client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<AuthErrorResponse>(&body) {
            Ok(err) => err.error_description.unwrap_or(err.error),
            Err(_) => body,
        };
        return Err(Error::Api(format!(
            "authentication failed ({}): {}",
            status, message
        )));
    }

    let mut token: Token = res.json().await?;
    token.obtained_at = Utc::now().timestamp() as u64;
    Ok(token)
}

pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::test_server::{StubServer, response};

    #[test]
    fn test_basic_auth_header() {
        // base64("user:pass")
        assert_eq!(basic_auth_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[tokio::test]
    async fn test_rejected_credentials_carry_description() {
        let mut server = StubServer::bind().await;
        server.serve(vec![response(
            "400 Bad Request",
            &[],
            r#"{"error": "invalid_client", "error_description": "Invalid client"}"#,
        )]);
        let http = Client::new();

        let result = request_client_token(&http, &server.url, "id", "wrong").await;

        match result {
            Err(Error::Api(msg)) => {
                assert_eq!(msg, "authentication failed (400 Bad Request): Invalid client")
            }
            other => panic!("expected Api error, got {:?}", other.map(|t| t.expires_in)),
        }
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_error_code_used_without_description() {
        let mut server = StubServer::bind().await;
        server.serve(vec![response(
            "400 Bad Request",
            &[],
            r#"{"error": "unsupported_grant_type"}"#,
        )]);
        let http = Client::new();

        let result = request_client_token(&http, &server.url, "id", "secret").await;

        assert!(
            matches!(result, Err(Error::Api(msg)) if msg.ends_with(": unsupported_grant_type"))
        );
    }

    #[tokio::test]
    async fn test_successful_exchange_stamps_token() {
        let mut server = StubServer::bind().await;
        server.serve(vec![response(
            "200 OK",
            &[],
            r#"{"access_token": "tok", "token_type": "Bearer", "expires_in": 3600}"#,
        )]);
        let http = Client::new();
        let before = Utc::now().timestamp() as u64;

        let token = request_client_token(&http, &server.url, "id", "secret")
            .await
            .unwrap();

        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, 3600);
        assert!(token.obtained_at >= before);
    }
}
