pub mod error;
pub mod models;
pub mod spotify;
pub mod token;

use async_trait::async_trait;
pub use error::{CatalogError, Result};
pub use models::*;
pub use spotify::{SpotifyCatalogApi, SpotifyConfig};
pub use token::TokenProvider;

/// Upstream playlist catalog: credential exchange plus playlist search
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Exchange the configured client credentials for a fresh access token
    async fn request_token(&self) -> Result<AccessToken>;

    /// Search playlists for a free-text query using `token`.
    ///
    /// Returns [`CatalogError::Unauthorized`] when the catalog rejects the token.
    async fn search_playlists(
        &self,
        query: &str,
        token: &AccessToken,
    ) -> Result<Vec<PlaylistSummary>>;
}

#[async_trait]
impl CatalogApi for SpotifyCatalogApi {
    fn name(&self) -> &str {
        "spotify"
    }

    async fn request_token(&self) -> Result<AccessToken> {
        self.exchange_token().await
    }

    async fn search_playlists(
        &self,
        query: &str,
        token: &AccessToken,
    ) -> Result<Vec<PlaylistSummary>> {
        self.search_playlists(query, token).await
    }
}
