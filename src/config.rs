//! Configuration management for the playlist randomizer.
//!
//! Values are read from environment variables, which may be seeded from a
//! `.env` file in the local data directory. Every setting except the client id
//! has a built-in default, so the tool runs without any `.env` file at all.
//!
//! Lookup order:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::types::Credentials;

pub const APP_DIR: &str = "spotrand";

pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private playlist-read-private";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// How long the loopback listener waits for the browser redirect.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum number of uris the provider accepts per add/remove request.
pub const BATCH_LIMIT: usize = 100;

/// Loads environment variables from `<data_local_dir>/spotrand/.env`.
///
/// Creates the application directory if needed. A missing `.env` file is not
/// an error since every setting has a default or a prompt behind it.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Client id from `SPOTIFY_API_AUTH_CLIENT_ID`, if set and non-empty.
pub fn spotify_client_id() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Reads the client id persisted by an earlier run.
pub async fn load_client_id() -> Option<String> {
    let content = async_fs::read_to_string(client_id_path()).await.ok()?;
    let id = content.trim();
    (!id.is_empty()).then(|| id.to_string())
}

pub async fn persist_client_id(client_id: &str) -> Result<(), String> {
    let path = client_id_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }
    async_fs::write(path, client_id.trim())
        .await
        .map_err(|e| e.to_string())
}

fn client_id_path() -> PathBuf {
    app_dir().join("client_id.txt")
}

/// Space-delimited capability list requested during authorization.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

/// Loopback redirect target. Must match the app settings in the Spotify dashboard exactly.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string())
}

pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Directory holding emergency backup files.
pub fn backup_dir() -> PathBuf {
    env::var("SPOTRAND_BACKUP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| app_dir().join("backups"))
}

pub fn credentials(client_id: String) -> Credentials {
    Credentials {
        client_id,
        scope: spotify_scope(),
        redirect_uri: spotify_redirect_uri(),
    }
}
