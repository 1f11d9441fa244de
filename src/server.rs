use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use spotify_catalog_rs::{CatalogApi, PlaylistSummary};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::mood::Mood;
use crate::playlists::{MoodPlaylists, PlaylistService};

#[derive(Clone)]
pub struct AppState {
    pub playlists: PlaylistService,
    pub favorites: FavoritesStore,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            playlists: PlaylistService::new(catalog),
            favorites: FavoritesStore::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddFavorite {
    pub playlist: PlaylistSummary,
}

#[derive(Debug, Deserialize)]
pub struct NoteUpdate {
    #[serde(rename = "userNote", default)]
    pub user_note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesList {
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesChanged {
    pub message: &'static str,
    pub favorites: Vec<FavoriteEntry>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/playlists/:mood", get(get_playlists))
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route(
            "/api/favorites/:id",
            axum::routing::patch(update_note).delete(remove_favorite),
        )
        .route("/api/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    concat!("VibeFlow API v", env!("CARGO_PKG_VERSION"))
}

/// Playlists matching a mood
async fn get_playlists(
    State(state): State<AppState>,
    Path(mood): Path<String>,
) -> Result<Json<MoodPlaylists>, AppError> {
    tracing::debug!("Fetching playlists for mood: {}", mood);
    let mood = Mood::resolve(&mood)?;
    let result = state.playlists.for_mood(mood).await?;
    tracing::debug!("Returning {} playlists", result.playlists.len());
    Ok(Json(result))
}

async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesList> {
    let favorites = state.favorites.list().await;
    tracing::debug!("Returning {} favorites", favorites.len());
    Json(FavoritesList { favorites })
}

async fn add_favorite(
    State(state): State<AppState>,
    payload: Result<Json<AddFavorite>, JsonRejection>,
) -> Result<Json<FavoritesChanged>, AppError> {
    let Json(AddFavorite { playlist }) =
        payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    if playlist.id.trim().is_empty() {
        return Err(AppError::InvalidInput("Playlist id is required".to_string()));
    }

    let favorites = state.favorites.add(playlist).await?;
    Ok(Json(FavoritesChanged {
        message: "Added to favorites",
        favorites,
    }))
}

/// Set or clear the note on a favorite
async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<FavoritesChanged>, AppError> {
    // An empty body clears the note like `{}` does
    let user_note = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<NoteUpdate>(&body)
            .map_err(|e| AppError::InvalidInput(format!("Invalid note body: {}", e)))?
            .user_note
    };
    let favorites = state.favorites.set_note(&id, user_note).await?;
    Ok(Json(FavoritesChanged {
        message: "Note added.",
        favorites,
    }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavoritesChanged>, AppError> {
    let favorites = state.favorites.remove(&id).await?;
    Ok(Json(FavoritesChanged {
        message: "Removed from favorites",
        favorites,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "Server is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
