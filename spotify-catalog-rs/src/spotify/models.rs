//! Wire shapes of the Spotify Web API responses we consume

use crate::models::{NO_DESCRIPTION, PlaylistSummary};
use crate::spotify::api::PAGE_SIZE;
use serde::Deserialize;

/// Response of `POST /api/token` with `grant_type=client_credentials`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Response of `GET /search?type=playlist`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub playlists: PlaylistPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistPage {
    /// Spotify sometimes returns `null` in place of a playlist object
    #[serde(default)]
    pub items: Vec<Option<SimplifiedPlaylist>>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub tracks: Option<TracksRef>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksRef {
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

impl SimplifiedPlaylist {
    pub fn convert(self) -> PlaylistSummary {
        let description = self
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let image = self
            .images
            .and_then(|images| images.into_iter().next())
            .and_then(|img| img.url)
            .filter(|url| !url.is_empty());

        PlaylistSummary {
            id: self.id,
            name: self.name,
            description,
            image,
            total_tracks: self.tracks.map(|t| t.total).unwrap_or(0),
            spotify_url: self.external_urls.spotify,
        }
    }
}

impl SearchResponse {
    /// Drop null entries and normalize the rest, keeping upstream order.
    /// At most [`PAGE_SIZE`] summaries are returned even if the upstream
    /// ignores `limit`.
    pub fn into_summaries(self) -> Vec<PlaylistSummary> {
        self.playlists
            .items
            .into_iter()
            .flatten()
            .take(PAGE_SIZE as usize)
            .map(SimplifiedPlaylist::convert)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_full_playlist() {
        let raw: SimplifiedPlaylist = serde_json::from_str(
            r#"{
                "id": "37i9dQZF1DXdPec7aLTmlC",
                "name": "Happy Hits!",
                "description": "Hits to boost your mood",
                "images": [{"url": "https://i.scdn.co/image/a", "height": 640, "width": 640},
                           {"url": "https://i.scdn.co/image/b"}],
                "tracks": {"href": "https://api.spotify.com/v1/playlists/x/tracks", "total": 100},
                "external_urls": {"spotify": "https://open.spotify.com/playlist/37i9dQZF1DXdPec7aLTmlC"}
            }"#,
        )
        .unwrap();

        let summary = raw.convert();
        assert_eq!(summary.id, "37i9dQZF1DXdPec7aLTmlC");
        assert_eq!(summary.description, "Hits to boost your mood");
        assert_eq!(summary.image.as_deref(), Some("https://i.scdn.co/image/a"));
        assert_eq!(summary.total_tracks, 100);
        assert_eq!(
            summary.spotify_url,
            "https://open.spotify.com/playlist/37i9dQZF1DXdPec7aLTmlC"
        );
    }

    #[test]
    fn test_convert_fills_placeholders() {
        let raw: SimplifiedPlaylist = serde_json::from_str(
            r#"{
                "id": "p1",
                "name": "Bare",
                "description": "",
                "images": null,
                "external_urls": {"spotify": "https://open.spotify.com/playlist/p1"}
            }"#,
        )
        .unwrap();

        let summary = raw.convert();
        assert_eq!(summary.description, NO_DESCRIPTION);
        assert_eq!(summary.image, None);
        assert_eq!(summary.total_tracks, 0);
    }

    #[test]
    fn test_null_items_are_dropped() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"playlists": {"total": 3, "items": [
                null,
                {"id": "a", "name": "A", "images": [], "tracks": {"total": 1},
                 "external_urls": {"spotify": "https://open.spotify.com/playlist/a"}},
                null
            ]}}"#,
        )
        .unwrap();

        let summaries = response.into_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "a");
        assert_eq!(summaries[0].image, None);
    }

    #[test]
    fn test_summaries_are_capped_at_page_size() {
        let items: Vec<String> = (0..15)
            .map(|i| {
                format!(
                    r#"{{"id": "p{i}", "name": "P{i}", "images": [],
                        "external_urls": {{"spotify": "https://open.spotify.com/playlist/p{i}"}}}}"#
                )
            })
            .collect();
        let body = format!(r#"{{"playlists": {{"items": [null, {}]}}}}"#, items.join(","));
        let response: SearchResponse = serde_json::from_str(&body).unwrap();

        let summaries = response.into_summaries();
        assert_eq!(summaries.len(), PAGE_SIZE as usize);
        assert_eq!(summaries[0].id, "p0");
        assert_eq!(summaries[11].id, "p11");
    }
}
