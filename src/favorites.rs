use serde::{Deserialize, Serialize};
use spotify_catalog_rs::PlaylistSummary;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stored in place of a missing or empty note
pub const EMPTY_NOTE: &str = " ";

/// A saved playlist with an optional listener note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub playlist: PlaylistSummary,
    #[serde(
        rename = "userNote",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_note: Option<String>,
}

impl FavoriteEntry {
    pub fn id(&self) -> &str {
        &self.playlist.id
    }
}

impl From<PlaylistSummary> for FavoriteEntry {
    fn from(playlist: PlaylistSummary) -> Self {
        Self {
            playlist,
            user_note: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoritesError {
    #[error("Playlist already in favorites")]
    Duplicate(String),

    #[error("Playlist not found in favorites")]
    NotFound(String),
}

/// In-memory favorites, ordered by insertion and unique by playlist id
#[derive(Clone, Default)]
pub struct FavoritesStore {
    entries: Arc<RwLock<Vec<FavoriteEntry>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current favorites in display order
    pub async fn list(&self) -> Vec<FavoriteEntry> {
        self.entries.read().await.clone()
    }

    /// Append a playlist unless one with the same id is already saved
    pub async fn add(&self, playlist: PlaylistSummary) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.id() == playlist.id) {
            tracing::debug!("Favorite {} already present", playlist.id);
            return Err(FavoritesError::Duplicate(playlist.id));
        }

        tracing::debug!("Adding favorite {} ({})", playlist.id, playlist.name);
        entries.push(FavoriteEntry::from(playlist));
        Ok(entries.clone())
    }

    /// Replace the note of an existing favorite.
    ///
    /// A missing or empty note is stored as [`EMPTY_NOTE`].
    pub async fn set_note(
        &self,
        id: &str,
        note: Option<String>,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| FavoritesError::NotFound(id.to_string()))?;

        let note = note
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| EMPTY_NOTE.to_string());
        tracing::debug!("Setting note on favorite {}", id);
        entry.user_note = Some(note);

        Ok(entries.clone())
    }

    /// Remove a favorite, keeping the order of the others
    pub async fn remove(&self, id: &str) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let mut entries = self.entries.write().await;
        let pos = entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| FavoritesError::NotFound(id.to_string()))?;

        entries.remove(pos);
        tracing::debug!("Removed favorite {}, {} left", id, entries.len());
        Ok(entries.clone())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: id.to_string(),
            name: format!("Playlist {}", id),
            description: "No description".to_string(),
            image: None,
            total_tracks: 10,
            spotify_url: format!("https://open.spotify.com/playlist/{}", id),
        }
    }

    fn ids(entries: &[FavoriteEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let store = FavoritesStore::new();
        store.add(playlist("a")).await.unwrap();
        store.add(playlist("b")).await.unwrap();
        let entries = store.add(playlist("c")).await.unwrap();

        assert_eq!(ids(&entries), vec!["a", "b", "c"]);
        assert_eq!(store.list().await, entries);
    }

    #[tokio::test]
    async fn test_add_duplicate_leaves_store_unchanged() {
        let store = FavoritesStore::new();
        store.add(playlist("a")).await.unwrap();
        store.set_note("a", Some("keep me".to_string())).await.unwrap();
        let before = store.list().await;

        let mut again = playlist("a");
        again.name = "Renamed".to_string();
        let err = store.add(again).await.unwrap_err();

        assert_eq!(err, FavoritesError::Duplicate("a".to_string()));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn test_remove_unknown_is_not_found() {
        let store = FavoritesStore::new();
        store.add(playlist("a")).await.unwrap();

        let err = store.remove("zzz").await.unwrap_err();
        assert_eq!(err, FavoritesError::NotFound("zzz".to_string()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_keeps_relative_order() {
        let store = FavoritesStore::new();
        for id in ["a", "b", "c", "d"] {
            store.add(playlist(id)).await.unwrap();
        }

        let entries = store.remove("b").await.unwrap();
        assert_eq!(ids(&entries), vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_set_note_only_touches_target() {
        let store = FavoritesStore::new();
        store.add(playlist("a")).await.unwrap();
        store.add(playlist("b")).await.unwrap();

        let entries = store
            .set_note("b", Some("for rainy days".to_string()))
            .await
            .unwrap();
        assert_eq!(entries[0].user_note, None);
        assert_eq!(entries[1].user_note.as_deref(), Some("for rainy days"));

        let again = store
            .set_note("b", Some("for rainy days".to_string()))
            .await
            .unwrap();
        assert_eq!(entries, again);
    }

    #[tokio::test]
    async fn test_set_note_normalizes_empty() {
        let store = FavoritesStore::new();
        store.add(playlist("a")).await.unwrap();

        let entries = store.set_note("a", Some(String::new())).await.unwrap();
        assert_eq!(entries[0].user_note.as_deref(), Some(EMPTY_NOTE));

        let entries = store.set_note("a", None).await.unwrap();
        assert_eq!(entries[0].user_note.as_deref(), Some(EMPTY_NOTE));
    }

    #[tokio::test]
    async fn test_set_note_unknown_is_not_found() {
        let store = FavoritesStore::new();
        let err = store.set_note("nope", Some("x".to_string())).await.unwrap_err();
        assert_eq!(err, FavoritesError::NotFound("nope".to_string()));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_then_remove_round_trip() {
        let store = FavoritesStore::new();
        store.add(playlist("p")).await.unwrap();
        assert_eq!(store.list().await.iter().filter(|e| e.id() == "p").count(), 1);

        store.remove("p").await.unwrap();
        assert!(store.list().await.iter().all(|e| e.id() != "p"));
    }

    #[test]
    fn test_entry_json_shape() {
        let mut entry = FavoriteEntry::from(playlist("a"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["totalTracks"], 10);
        assert!(json.get("userNote").is_none());

        entry.user_note = Some("nice".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["userNote"], "nice");
    }
}
