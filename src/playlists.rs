use serde::Serialize;
use spotify_catalog_rs::{CatalogApi, CatalogError, PlaylistSummary, TokenProvider};
use std::sync::Arc;

use crate::mood::Mood;

/// Body of `GET /api/playlists/{mood}`
#[derive(Debug, Clone, Serialize)]
pub struct MoodPlaylists {
    pub mood: Mood,
    pub playlists: Vec<PlaylistSummary>,
}

/// Looks up catalog playlists for a mood using the shared token
#[derive(Clone)]
pub struct PlaylistService {
    catalog: Arc<dyn CatalogApi>,
    tokens: TokenProvider,
}

impl PlaylistService {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        let tokens = TokenProvider::new(catalog.clone());
        Self { catalog, tokens }
    }

    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    /// Search the catalog for `mood`.
    ///
    /// A rejected token is cleared and the search retried once with a fresh
    /// one. A second rejection, or a failed refresh, leaves the slot empty
    /// and is returned as [`CatalogError::Unauthorized`].
    pub async fn for_mood(&self, mood: Mood) -> Result<MoodPlaylists, CatalogError> {
        let query = mood.query();
        tracing::debug!("Searching playlists for mood '{}' with query '{}'", mood, query);

        let token = self.tokens.token().await?;
        let playlists = match self.catalog.search_playlists(query, &token).await {
            Err(CatalogError::Unauthorized) => {
                tracing::info!("Access token rejected, refreshing and retrying once");
                self.tokens.invalidate().await;
                let fresh = self.tokens.acquire().await.map_err(|e| {
                    tracing::warn!("Token refresh after 401 failed: {}", e);
                    CatalogError::Unauthorized
                })?;
                match self.catalog.search_playlists(query, &fresh).await {
                    Err(CatalogError::Unauthorized) => {
                        self.tokens.invalidate().await;
                        return Err(CatalogError::Unauthorized);
                    }
                    other => other?,
                }
            }
            other => other?,
        };

        tracing::debug!("Returning {} playlists for mood '{}'", playlists.len(), mood);
        Ok(MoodPlaylists { mood, playlists })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spotify_catalog_rs::AccessToken;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog that rejects the first `reject` searches with 401
    struct FlakyCatalog {
        reject: usize,
        exchanges: AtomicUsize,
        searches: AtomicUsize,
        seen_tokens: Mutex<Vec<String>>,
    }

    impl FlakyCatalog {
        fn new(reject: usize) -> Self {
            Self {
                reject,
                exchanges: AtomicUsize::new(0),
                searches: AtomicUsize::new(0),
                seen_tokens: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CatalogApi for FlakyCatalog {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn request_token(&self) -> spotify_catalog_rs::Result<AccessToken> {
            let n = self.exchanges.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AccessToken::new(format!("token-{}", n)).unwrap())
        }

        async fn search_playlists(
            &self,
            query: &str,
            token: &AccessToken,
        ) -> spotify_catalog_rs::Result<Vec<PlaylistSummary>> {
            self.seen_tokens
                .lock()
                .unwrap()
                .push(token.as_str().to_string());
            let n = self.searches.fetch_add(1, Ordering::SeqCst);
            if n < self.reject {
                return Err(CatalogError::Unauthorized);
            }
            Ok(vec![PlaylistSummary {
                id: "p1".to_string(),
                name: query.to_string(),
                description: "No description".to_string(),
                image: None,
                total_tracks: 3,
                spotify_url: "https://open.spotify.com/playlist/p1".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_for_mood_uses_mood_query() {
        let catalog = Arc::new(FlakyCatalog::new(0));
        let service = PlaylistService::new(catalog.clone());

        let result = service.for_mood(Mood::Focus).await.unwrap();
        assert_eq!(result.mood, Mood::Focus);
        assert_eq!(result.playlists[0].name, "focus study concentration");
        assert_eq!(catalog.exchanges.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_once_after_unauthorized() {
        let catalog = Arc::new(FlakyCatalog::new(1));
        let service = PlaylistService::new(catalog.clone());

        let result = service.for_mood(Mood::Happy).await.unwrap();
        assert_eq!(result.playlists.len(), 1);
        assert_eq!(catalog.searches.load(Ordering::SeqCst), 2);
        assert_eq!(
            *catalog.seen_tokens.lock().unwrap(),
            vec!["token-1".to_string(), "token-2".to_string()]
        );
        assert_eq!(
            service.tokens().current().await.unwrap().as_str(),
            "token-2"
        );
    }

    #[tokio::test]
    async fn test_second_unauthorized_clears_token() {
        let catalog = Arc::new(FlakyCatalog::new(usize::MAX));
        let service = PlaylistService::new(catalog.clone());

        let err = service.for_mood(Mood::Sad).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(catalog.searches.load(Ordering::SeqCst), 2);
        assert!(service.tokens().current().await.is_none());
    }
}
