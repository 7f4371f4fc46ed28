//! OAuth client-credentials token provider
//!
//! Tokens are fetched lazily on the first gateway call and kept in memory
//! until shortly before they expire. Nothing is ever written to disk.

use crate::error::{error_chain, ConnectError, GatewayError};
use crate::options::TokenCredentials;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Tokens are refreshed this long before the server-side expiry
const EXPIRY_MARGIN_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Fetches and caches bearer tokens for one set of credentials
pub struct TokenProvider {
    http: reqwest::Client,
    credentials: TokenCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(credentials: TokenCredentials) -> Result<Self, ConnectError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConnectError::OAuthClient(error_chain(&e)))?;

        Ok(Self {
            http,
            credentials,
            cached: Mutex::new(None),
        })
    }

    /// Return a valid access token, requesting a new one when needed
    pub async fn token(&self) -> Result<String, GatewayError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.fetch().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);

        Ok(access_token)
    }

    async fn fetch(&self) -> Result<CachedToken, GatewayError> {
        let url = reqwest::Url::parse(&self.credentials.token_url).map_err(|e| {
            GatewayError::from_message(format!(
                "Invalid OAuth URL {}: {}",
                self.credentials.token_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GatewayError::from_message(format!(
                "Unsupported protocol {}:",
                url.scheme()
            )));
        }

        debug!(
            "Requesting OAuth token from {} for client {}",
            url, self.credentials.client_id
        );

        let response = self
            .http
            .post(url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("audience", self.credentials.audience.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::from_message(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError {
                code: None,
                message: Some(status.to_string()),
                details: (!body.is_empty()).then_some(body),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            GatewayError::from_message(format!("Invalid OAuth token response: {}", error_chain(&e)))
        })?;

        let lifetime = token
            .expires_in
            .unwrap_or(0)
            .saturating_sub(EXPIRY_MARGIN_SECS);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        })
    }
}
