use anyhow::{Context, Result};
use clap::Parser;
use spotify_catalog_rs::{CatalogApi, SpotifyCatalogApi, SpotifyConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vibeflow::server::{self, AppState};

#[derive(Parser)]
#[command(name = "vibeflow")]
#[command(about = "VibeFlow Server", long_about = None)]
struct Cli {
    /// Spotify application client id
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    client_id: String,

    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Spotify token endpoint
    #[arg(long, env = "SPOTIFY_AUTH_URL", default_value = spotify_catalog_rs::spotify::api::DEFAULT_AUTH_URL)]
    auth_url: String,

    /// Spotify Web API base URL
    #[arg(long, env = "SPOTIFY_API_URL", default_value = spotify_catalog_rs::spotify::api::DEFAULT_API_URL)]
    api_url: String,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    upstream_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("vibeflow=debug,spotify_catalog_rs=debug,tower_http=info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();

    if cli.upstream_timeout == 0 {
        anyhow::bail!("Upstream timeout must be at least one second");
    }

    tracing::info!("Starting VibeFlow");

    let config = SpotifyConfig::new(cli.client_id, cli.client_secret)
        .with_auth_url(cli.auth_url)
        .with_api_url(cli.api_url)
        .with_timeout(Duration::from_secs(cli.upstream_timeout));
    let catalog: Arc<dyn CatalogApi> = Arc::new(
        SpotifyCatalogApi::new(config).context("Failed to create Spotify catalog client")?,
    );

    let state = AppState::new(catalog);

    // Warm the token slot; requests will retry the exchange if this fails
    if let Err(e) = state.playlists.tokens().acquire().await {
        tracing::error!("Failed to get initial token: {}", e);
    }

    let app = server::create_router(state);
    let addr = format!("0.0.0.0:{}", cli.port);

    tracing::info!("VibeFlow backend running on http://localhost:{}", cli.port);
    tracing::info!("API endpoints:");
    tracing::info!("  GET    /api/playlists/:mood  - Playlists for a mood");
    tracing::info!("  GET    /api/favorites        - List favorites");
    tracing::info!("  POST   /api/favorites        - Add a favorite");
    tracing::info!("  PATCH  /api/favorites/:id    - Set a favorite's note");
    tracing::info!("  DELETE /api/favorites/:id    - Remove a favorite");
    tracing::info!("  GET    /api/health           - Health check");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
