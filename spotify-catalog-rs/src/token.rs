//! Cached access token for the catalog.
//!
//! The provider owns a single token slot. A token stays valid until the
//! catalog rejects it; [`TokenProvider::invalidate`] is the only way back to
//! the empty state, so there is no expiry timer. Callers that find the slot
//! empty await a fresh exchange. Two callers racing on an empty slot may both
//! exchange credentials; the last successful write wins.

use crate::error::Result;
use crate::models::AccessToken;
use crate::CatalogApi;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct TokenProvider {
    api: Arc<dyn CatalogApi>,
    slot: Arc<RwLock<Option<AccessToken>>>,
}

impl TokenProvider {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Run the credential exchange and overwrite the slot on success.
    ///
    /// The slot is left untouched when the exchange fails.
    pub async fn acquire(&self) -> Result<AccessToken> {
        debug!("Acquiring access token from {}", self.api.name());
        match self.api.request_token().await {
            Ok(token) => {
                *self.slot.write().await = Some(token.clone());
                info!("Access token obtained successfully from {}", self.api.name());
                Ok(token)
            }
            Err(e) => {
                error!("Error getting token from {}: {}", self.api.name(), e);
                Err(e)
            }
        }
    }

    /// The cached token, if any
    pub async fn current(&self) -> Option<AccessToken> {
        self.slot.read().await.clone()
    }

    /// The cached token, acquiring one first when the slot is empty
    pub async fn token(&self) -> Result<AccessToken> {
        if let Some(token) = self.current().await {
            return Ok(token);
        }
        self.acquire().await
    }

    /// Drop the cached token after the catalog reported it unauthorized
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        if slot.take().is_some() {
            info!("Cached access token cleared");
        }
    }
}
