//! Spotify Playlist Randomizer Library
//!
//! This library shuffles a Spotify playlist in place. It authorizes through
//! the OAuth 2.0 authorization-code flow with PKCE, fetches the playlist's
//! track uris, permutes them with a Fisher-Yates shuffle and writes them back.
//! When the write-back fails partway it compensates by re-adding the original
//! order, and as a last resort it writes the original order to a backup file.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the OAuth loopback redirect
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - Typed errors for auth, playlist and backup failures
//! - `management` - Playlist randomizer and backup file store
//! - `server` - Single-request loopback listener
//! - `spotify` - Spotify accounts and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers, shuffling and input parsing
//!
//! # Example
//!
//! ```
//! use spotrand::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotrand::Res<()> {
//!     config::load_env().await?;
//!     cli::randomize(None, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Catch-all error type for glue code; the library's own operations return
/// the typed errors from [`errors`].
///
/// # Example
///
/// ```
/// use spotrand::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue `o` marker.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Fetched {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with code 1.
///
/// Evaluates to `!`, so it can end any match arm. Only the CLI layer uses it;
/// library code returns errors instead.
///
/// ```
/// let record = match backups.read(&path).await {
///     Ok(record) => record,
///     Err(e) => error!("Cannot read backup file {}: {}", path.display(), e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr for recoverable problems.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
