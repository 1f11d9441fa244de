use crate::error::{CatalogError, Result};
use crate::models::{AccessToken, PlaylistSummary};
use crate::spotify::models::*;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
/// Number of playlists requested per search; no further pages are fetched
pub const PAGE_SIZE: u32 = 12;

/// Connection settings for [`SpotifyCatalogApi`]
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Token endpoint (client-credentials grant)
    pub auth_url: String,
    /// Web API base, without trailing slash
    pub api_url: String,
    /// Upper bound for every upstream request
    pub timeout: Duration,
}

impl SpotifyConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct SpotifyCatalogApi {
    client: Client,
    config: SpotifyConfig,
}

impl SpotifyCatalogApi {
    pub fn new(config: SpotifyConfig) -> Result<Self> {
        info!("Initializing Spotify catalog client");
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            warn!("Spotify client id or secret is empty; token exchange will fail");
        }
        debug!(
            "Auth endpoint: {}, API base: {}, timeout: {:?}",
            config.auth_url, config.api_url, config.timeout
        );

        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            config,
        })
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.config.client_id, self.config.client_secret);
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }

    /// Exchange the client credentials for an app-only access token
    #[instrument(skip(self), fields(service = "spotify"))]
    pub async fn exchange_token(&self) -> Result<AccessToken> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(CatalogError::MissingCredentials(
                "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set".to_string(),
            ));
        }

        debug!("Requesting client-credentials token from {}", self.config.auth_url);
        let response = self
            .client
            .post(&self.config.auth_url)
            .header(AUTHORIZATION, self.basic_auth_header())
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| {
                error!("Token request failed: {}", e);
                CatalogError::TokenRequest(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Token exchange rejected with {}: {}", status, body);
            return Err(CatalogError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(CatalogError::TokenRequest)?;
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse token response: {}", e);
            CatalogError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        let token = AccessToken::new(parsed.access_token).ok_or_else(|| {
            CatalogError::InvalidResponse("Token response carried an empty access_token".into())
        })?;

        debug!(
            "Token type {:?}, expires in {:?}s",
            parsed.token_type, parsed.expires_in
        );
        Ok(token)
    }

    /// Search playlists matching `query`, first page only
    #[instrument(skip(self, token), fields(service = "spotify"))]
    pub async fn search_playlists(
        &self,
        query: &str,
        token: &AccessToken,
    ) -> Result<Vec<PlaylistSummary>> {
        let url = format!("{}/search", self.config.api_url);
        let limit = PAGE_SIZE.to_string();
        debug!("GET {} q='{}' limit={}", url, query, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("type", "playlist"), ("limit", limit.as_str())])
            .header(AUTHORIZATION, token.bearer())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Search rejected the access token");
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Search failed with {}: {}", status, body);
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse search response: {}", e);
            CatalogError::InvalidResponse(format!("Failed to parse search response: {}", e))
        })?;

        let playlists = parsed.into_summaries();
        info!("Search successful, found {} playlists", playlists.len());
        Ok(playlists)
    }
}
