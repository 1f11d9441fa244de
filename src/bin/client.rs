use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Playlist {
    id: String,
    name: String,
    description: String,
    image: Option<String>,
    total_tracks: u32,
    spotify_url: String,
    #[serde(default, skip_serializing)]
    user_note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoodPlaylists {
    mood: String,
    playlists: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
struct FavoritesResponse {
    #[serde(default)]
    message: Option<String>,
    favorites: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

const MOODS: [(&str, &str); 5] = [
    ("happy", "Happy"),
    ("chill", "Chill"),
    ("focus", "Focus"),
    ("sad", "Sad"),
    ("afrobeats", "Afrobeats"),
];

#[derive(Parser)]
#[command(name = "vibeflow-client")]
#[command(about = "VibeFlow CLI Client", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, default_value = "http://localhost:3000")]
    server: String,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser)]
enum Command {
    /// List the available moods
    Moods,
    /// Show playlists for a mood
    Playlists { mood: String },
    /// Favorites management commands
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Check that the server is up
    Health,
}

#[derive(Parser)]
enum FavoritesCommand {
    /// List favorites
    List,
    /// Save a playlist from a mood's results
    Add {
        /// Mood whose results contain the playlist
        mood: String,
        /// Playlist ID
        id: String,
    },
    /// Set or clear the note on a favorite
    Note {
        /// Playlist ID
        id: String,
        /// Note text; omit to clear
        text: Option<String>,
    },
    /// Remove a favorite
    Remove {
        /// Playlist ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}/api", cli.server.trim_end_matches('/'));

    match cli.command.unwrap_or(Command::Moods) {
        Command::Moods => list_moods(),
        Command::Playlists { mood } => show_playlists(&client, &api, &mood).await?,
        Command::Favorites(cmd) => handle_favorites_command(&client, &api, cmd).await?,
        Command::Health => health(&client, &api).await?,
    }

    Ok(())
}

fn list_moods() {
    println!("Select your mood:");
    for (key, label) in MOODS {
        println!("  {:<10} {}", key, label);
    }
    println!();
    println!("Run: vibeflow-client playlists <mood>");
}

/// Turn a non-success response into an error carrying the server's message
async fn error_from(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => anyhow::anyhow!("{} ({})", body.error, status),
        Err(_) => anyhow::anyhow!("Server returned error: {}", status),
    }
}

async fn fetch_playlists(client: &reqwest::Client, api: &str, mood: &str) -> Result<MoodPlaylists> {
    let url = format!("{}/playlists/{}", api, mood);
    let mut response = client
        .get(&url)
        .send()
        .await
        .context("Failed to connect to server")?;

    // The server clears its token on 401; one retry picks up a fresh one
    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
        println!("Token expired, retrying...");
        response = client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to server")?;
    }

    if !response.status().is_success() {
        return Err(error_from(response).await);
    }

    response.json().await.context("Failed to parse response")
}

async fn show_playlists(client: &reqwest::Client, api: &str, mood: &str) -> Result<()> {
    let result = fetch_playlists(client, api, mood).await?;

    if result.playlists.is_empty() {
        println!("No playlists found for '{}'.", result.mood);
        return Ok(());
    }

    println!("{} Playlists ({}):", capitalize(&result.mood), result.playlists.len());
    println!("{:-<80}", "");
    for (idx, playlist) in result.playlists.iter().enumerate() {
        print_playlist(idx + 1, playlist);
    }

    Ok(())
}

fn print_playlist(n: usize, playlist: &Playlist) {
    println!("{}. {}", n, playlist.name);
    println!("   {}", playlist.description);
    println!("   Tracks: {}", playlist.total_tracks);
    if let Some(note) = playlist.user_note.as_deref().filter(|n| !n.trim().is_empty()) {
        println!("   Note: {}", note);
    }
    println!("   ID: {}", playlist.id);
    println!("   Open: {}", playlist.spotify_url);
    println!();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn handle_favorites_command(
    client: &reqwest::Client,
    api: &str,
    cmd: FavoritesCommand,
) -> Result<()> {
    let url = format!("{}/favorites", api);

    let response = match cmd {
        FavoritesCommand::List => client.get(&url).send().await,
        FavoritesCommand::Add { mood, id } => {
            let result = fetch_playlists(client, api, &mood).await?;
            let playlist = result
                .playlists
                .into_iter()
                .find(|p| p.id == id)
                .with_context(|| format!("Playlist {} not in '{}' results", id, mood))?;
            client
                .post(&url)
                .json(&json!({ "playlist": playlist }))
                .send()
                .await
        }
        FavoritesCommand::Note { id, text } => {
            client
                .patch(format!("{}/{}", url, id))
                .json(&json!({ "userNote": text }))
                .send()
                .await
        }
        FavoritesCommand::Remove { id } => client.delete(format!("{}/{}", url, id)).send().await,
    }
    .context("Failed to connect to server")?;

    if !response.status().is_success() {
        return Err(error_from(response).await);
    }

    let body: FavoritesResponse = response.json().await.context("Failed to parse response")?;
    if let Some(message) = body.message {
        println!("{}", message);
        println!();
    }

    if body.favorites.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    println!("Favorites ({}):", body.favorites.len());
    println!("{:-<80}", "");
    for (idx, playlist) in body.favorites.iter().enumerate() {
        print_playlist(idx + 1, playlist);
    }

    Ok(())
}

async fn health(client: &reqwest::Client, api: &str) -> Result<()> {
    let response = client
        .get(format!("{}/health", api))
        .send()
        .await
        .context("Failed to connect to server")?;

    if !response.status().is_success() {
        return Err(error_from(response).await);
    }

    let body: serde_json::Value = response.json().await.context("Failed to parse response")?;
    println!(
        "{}",
        body["status"].as_str().unwrap_or("unknown status")
    );
    Ok(())
}
