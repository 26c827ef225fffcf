use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use spotify_client::auth::{
    LibrespotAuthenticator, SessionStore, SessionTokenProvider, TokenProvider,
};
use spotify_client::config::{Config, DEFAULT_CONFIG_FILE};
use spotify_client::logging;
use spotify_client::model::{
    AlbumId, ArtistId, ArtistRef, Keyed, PlaylistId, SearchType, Track, TrackId, UserId,
};
use spotify_client::repo::{PlayContext, RepoStore};
use spotify_client::state::{
    AlbumListScreen, AlbumScreen, ArtistScreen, FollowedArtistsScreen, LoadState, Navigator,
    Observable, Pager, PlaylistListScreen, PlaylistScreen, ScreenContext, SearchScreen, Session,
    UserScreen,
};

#[derive(Parser)]
#[command(name = "spotify-client", version, about = "Browse and control Spotify from the terminal")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in through the browser and store the session
    Login,
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Me,
    /// List saved albums
    Albums {
        #[arg(long)]
        all: bool,
    },
    /// List your playlists
    Playlists {
        #[arg(long)]
        all: bool,
    },
    /// List followed artists
    Following {
        #[arg(long)]
        all: bool,
    },
    Artist { id: String },
    Album { id: String },
    Playlist {
        id: String,
        #[arg(long)]
        all: bool,
    },
    User { id: String },
    Search {
        query: String,
        /// Comma separated: track, artist, album, playlist
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<SearchType>,
    },
    /// Start playback of a spotify: uri on the active device
    Play { uri: String },
    Pause,
}

/// The CLI never follows clicks; it only logs them.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn open_artist(&self, id: ArtistId) {
        tracing::debug!(%id, "open artist");
    }

    fn open_album(&self, id: AlbumId) {
        tracing::debug!(%id, "open album");
    }

    fn open_playlist(&self, id: PlaylistId) {
        tracing::debug!(%id, "open playlist");
    }

    fn open_track(&self, id: TrackId) {
        tracing::debug!(%id, "open track");
    }

    fn open_user(&self, id: UserId) {
        tracing::debug!(%id, "open user");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };
    tracing::info!("=== spotify-client starting ===");

    let provider = Arc::new(SessionTokenProvider::load(
        LibrespotAuthenticator::new(&config.auth),
        SessionStore::new(config.auth.session_file.clone()),
    ));

    match cli.command {
        Command::Login => {
            provider.login().await?;
            println!("Logged in.");
            return Ok(());
        }
        Command::Logout => {
            provider.logout().await?;
            println!("Logged out.");
            return Ok(());
        }
        _ => {}
    }

    if !provider.has_session().await {
        provider.login().await.context("Login required")?;
    }

    let tokens: Arc<dyn TokenProvider> = provider.clone();
    let repos = RepoStore::new(&config.api, tokens.clone()).context("Failed to build HTTP client")?;

    let session = Session::new(move || {
        eprintln!("Your session has expired. Run `spotify-client login`.");
        let tokens = tokens.clone();
        tokio::spawn(async move {
            if let Err(e) = tokens.logout().await {
                tracing::warn!(error = %e, "Logout after expiry failed");
            }
        });
    });
    let ctx = ScreenContext::new(repos.clone(), session, Arc::new(LogNavigator))
        .with_page_size(config.api.page_size)?;

    let result = run(cli.command, &ctx, &repos).await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "Command failed");
    }
    tracing::info!("spotify-client finished");
    result
}

async fn run(command: Command, ctx: &ScreenContext, repos: &RepoStore) -> Result<()> {
    match command {
        Command::Login | Command::Logout => {}
        Command::Me => {
            let user = repos.users.get_current_user().await?;
            println!("{} ({})", user.display_name, user.id);
            println!("{} followers", user.follower_count);
        }
        Command::Albums { all } => {
            let screen = AlbumListScreen::open(ctx);
            for album in collect(&screen.albums, all).await? {
                println!(
                    "{}  {} - {} ({})",
                    album.id,
                    artist_names(&album.artists),
                    album.name,
                    album.release_date
                );
            }
        }
        Command::Playlists { all } => {
            let screen = PlaylistListScreen::open(ctx);
            for playlist in collect(&screen.playlists, all).await? {
                println!(
                    "{}  {} by {} [{} tracks]",
                    playlist.id, playlist.name, playlist.owner_name, playlist.total_tracks
                );
            }
        }
        Command::Following { all } => {
            let screen = FollowedArtistsScreen::open(ctx);
            for artist in collect(&screen.artists, all).await? {
                println!("{}  {} ({} followers)", artist.id, artist.name, artist.follower_count);
            }
        }
        Command::Artist { id } => {
            let screen = ArtistScreen::open(ctx, ArtistId::new(id)?);
            let artist = loaded(screen.artist.state()).await?;
            println!("{}", artist.name);
            println!("{} followers, popularity {}", artist.follower_count, artist.popularity);
            if !artist.genres.is_empty() {
                println!("Genres: {}", artist.genres.join(", "));
            }
            println!();
            for album in collect(&screen.albums, false).await? {
                println!(
                    "{}  {} [{}] {}",
                    album.id, album.name, album.album_type, album.release_date
                );
            }
        }
        Command::Album { id } => {
            let screen = AlbumScreen::open(ctx, AlbumId::new(id)?);
            let album = loaded(screen.album.state()).await?;
            println!("{} - {} ({})", artist_names(&album.artists), album.name, album.year());
            if !album.label.is_empty() {
                println!("{}", album.label);
            }
            println!();
            for track in &album.tracks {
                let length = duration(track.duration_ms);
                println!("{:>3}. {} [{}]", track.track_number, track.name, length);
            }
        }
        Command::Playlist { id, all } => {
            let screen = PlaylistScreen::open(ctx, PlaylistId::new(id)?);
            let playlist = loaded(screen.playlist.state()).await?;
            println!("{} by {}", playlist.name, playlist.owner.display_name);
            if !playlist.description.is_empty() {
                println!("{}", playlist.description);
            }
            println!("{} tracks, {} followers", playlist.total_tracks, playlist.follower_count);
            println!();
            for (n, item) in collect(&screen.tracks, all).await?.iter().enumerate() {
                println!("{:>4}. {}", n + 1, track_line(&item.track));
            }
        }
        Command::User { id } => {
            let screen = UserScreen::open(ctx, UserId::new(id)?);
            let user = loaded(screen.user.state()).await?;
            println!("{} ({} followers)", user.display_name, user.follower_count);
            println!();
            for playlist in collect(&screen.playlists, false).await? {
                println!("{}  {} [{} tracks]", playlist.id, playlist.name, playlist.total_tracks);
            }
        }
        Command::Search { query, types } => {
            let types = if types.is_empty() { SearchType::ALL.to_vec() } else { types };
            let screen = SearchScreen::open(ctx);
            screen.on_search(&query, &types);
            screen.loading.subscribe().wait_for(|busy| !*busy).await?;
            if let Some(error) = screen.error.get() {
                bail!(error);
            }
            let result = screen.result.get().unwrap_or_default();
            if result.is_empty() {
                println!("No results.");
            }
            section("Tracks", result.tracks.iter().map(|t| format!("{}  {}", t.id, track_line(t))));
            section("Artists", result.artists.iter().map(|a| format!("{}  {}", a.id, a.name)));
            let albums = result.albums.iter();
            section("Albums", albums.map(|a| format!("{}  {} ({})", a.id, a.name, a.release_date)));
            let playlists = result.playlists.iter();
            section(
                "Playlists",
                playlists.map(|p| format!("{}  {} by {}", p.id, p.name, p.owner_name)),
            );
        }
        Command::Play { uri } => {
            match uri.strip_prefix("spotify:track:") {
                Some(id) => repos.player.play_tracks(&[TrackId::new(id)?]).await?,
                None => repos.player.play_context(&PlayContext::from_uri(&uri)?).await?,
            }
            println!("Playing {uri}");
        }
        Command::Pause => {
            repos.player.pause().await?;
            println!("Paused.");
        }
    }
    Ok(())
}

/// Wait for a single-object screen state to settle.
async fn loaded<T: Clone>(state: &Observable<LoadState<T>>) -> Result<T> {
    let settled = state.subscribe().wait_for(|s| !s.is_loading()).await?.clone();
    match settled {
        LoadState::Loaded(value) => Ok(value),
        LoadState::Failed(message) => Err(anyhow!(message)),
        LoadState::Loading => bail!("still loading"),
    }
}

/// Wait for the pager's current page, and with `all` keep paging until the
/// list is exhausted.
async fn collect<T>(pager: &Pager<T>, all: bool) -> Result<Vec<T>>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    loop {
        pager.loading().subscribe().wait_for(|busy| !*busy).await?;
        if let Some(error) = pager.last_error().get() {
            bail!(error);
        }
        match pager.items().get() {
            LoadState::Loaded(items) => {
                if !all || !pager.load_more() {
                    return Ok(items);
                }
            }
            LoadState::Failed(message) => bail!(message),
            LoadState::Loading => return Ok(Vec::new()),
        }
    }
}

fn section(title: &str, lines: impl Iterator<Item = String>) {
    let lines: Vec<String> = lines.collect();
    if lines.is_empty() {
        return;
    }
    println!("\n{title}");
    for line in lines {
        println!("  {line}");
    }
}

fn artist_names(artists: &[ArtistRef]) -> String {
    artists.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
}

fn track_line(track: &Track) -> String {
    format!("{} - {} [{}]", track.artist_names(), track.name, duration(track.duration_ms))
}

fn duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
