use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when the catalog returns no playlist description
pub const NO_DESCRIPTION: &str = "No description";

/// Bearer credential issued by the catalog's token endpoint.
///
/// Never empty: construction through [`AccessToken::new`] rejects blank values.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Keep the secret out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"<redacted>").finish()
    }
}

/// Normalized playlist returned to callers of the search gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub total_tracks: u32,
    pub spotify_url: String,
}

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_blank() {
        assert!(AccessToken::new("").is_none());
        assert!(AccessToken::new("   ").is_none());
        let token = AccessToken::new("abc").unwrap();
        assert_eq!(token.as_str(), "abc");
        assert_eq!(token.bearer(), "Bearer abc");
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("very-secret").unwrap();
        assert!(!format!("{:?}", token).contains("very-secret"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = PlaylistSummary {
            id: "p1".to_string(),
            name: "Morning".to_string(),
            description: NO_DESCRIPTION.to_string(),
            image: None,
            total_tracks: 42,
            spotify_url: "https://open.spotify.com/playlist/p1".to_string(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalTracks"], 42);
        assert_eq!(json["spotifyUrl"], "https://open.spotify.com/playlist/p1");
        assert!(json["image"].is_null());
    }

    #[test]
    fn test_summary_deserialize_defaults() {
        let summary: PlaylistSummary = serde_json::from_str(
            r#"{"id":"p2","name":"Late","spotifyUrl":"https://open.spotify.com/playlist/p2"}"#,
        )
        .unwrap();
        assert_eq!(summary.description, NO_DESCRIPTION);
        assert_eq!(summary.total_tracks, 0);
        assert!(summary.image.is_none());
    }
}
