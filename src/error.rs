use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use spotify_catalog_rs::CatalogError;

use crate::favorites::FavoritesError;
use crate::mood::InvalidMood;

/// Failures surfaced by the HTTP API, rendered as `{"error": message}`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad request input (unknown mood, malformed body)
    #[error("{0}")]
    InvalidInput(String),

    /// The favorite already exists
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// The catalog rejected our access token; the cached token has been cleared
    #[error("Token expired, please try again")]
    UpstreamAuth,

    #[error("Failed to fetch playlists")]
    UpstreamUnavailable(#[source] CatalogError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamAuth => StatusCode::UNAUTHORIZED,
            AppError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidMood> for AppError {
    fn from(err: InvalidMood) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<FavoritesError> for AppError {
    fn from(err: FavoritesError) -> Self {
        match err {
            FavoritesError::Duplicate(_) => AppError::Conflict(err.to_string()),
            FavoritesError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        if err.is_unauthorized() {
            AppError::UpstreamAuth
        } else {
            AppError::UpstreamUnavailable(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::UpstreamUnavailable(cause) => {
                tracing::error!("Error fetching playlists: {}", cause)
            }
            AppError::UpstreamAuth => tracing::warn!("Catalog rejected access token"),
            other => tracing::debug!("Request rejected ({}): {}", status, other),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
