use anyhow::{Context, Result};
use clap::Parser;
use spotify_catalog_rs::{CatalogApi, SpotifyCatalogApi, SpotifyConfig, TokenProvider};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Spotify Playlist Search
///
/// Exchange client credentials for a token and search public playlists.
#[derive(Parser, Debug)]
#[command(name = "catalog_search")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Spotify application client id
    #[arg(long, env = "SPOTIFY_CLIENT_ID", value_name = "ID")]
    client_id: String,

    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", value_name = "SECRET", hide_env_values = true)]
    client_secret: String,

    /// Token endpoint override
    #[arg(long, env = "SPOTIFY_AUTH_URL")]
    auth_url: Option<String>,

    /// Web API base override
    #[arg(long, env = "SPOTIFY_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Search query (prompted for when omitted)
    #[arg(short, long, value_name = "QUERY")]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity; warnings and errors only by default
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = SpotifyConfig::new(args.client_id, args.client_secret)
        .with_timeout(Duration::from_secs(args.timeout));
    if let Some(url) = args.auth_url {
        config = config.with_auth_url(url);
    }
    if let Some(url) = args.api_url {
        config = config.with_api_url(url);
    }

    let api: Arc<dyn CatalogApi> = Arc::new(
        SpotifyCatalogApi::new(config).context("Failed to build Spotify client")?,
    );
    let tokens = TokenProvider::new(api.clone());

    let query = match args.query {
        Some(q) => q,
        None => {
            print!("Enter playlist search query: ");
            io::stdout().flush()?;
            let mut input = String::new();
            io::stdin()
                .read_line(&mut input)
                .context("Failed to read query from stdin")?;
            input.trim().to_string()
        }
    };

    if query.is_empty() {
        eprintln!("Search query cannot be empty. Exiting.");
        return Ok(());
    }

    let token = tokens
        .token()
        .await
        .context("Failed to obtain access token")?;
    println!("\nSearching playlists for '{}'...\n", query);
    let playlists = api
        .search_playlists(&query, &token)
        .await
        .with_context(|| format!("Playlist search for '{}' failed", query))?;

    if playlists.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for (idx, playlist) in playlists.iter().enumerate() {
        println!("{}. {} ({} tracks)", idx + 1, playlist.name, playlist.total_tracks);
        println!("   {}", playlist.description);
        println!("   ID: {}", playlist.id);
        println!("   URL: {}", playlist.spotify_url);
        if let Some(image) = &playlist.image {
            println!("   Image: {}", image);
        }
        println!();
    }

    Ok(())
}
