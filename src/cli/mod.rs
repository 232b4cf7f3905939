//! # CLI Module
//!
//! User-facing commands. Each command gathers its input (arguments or
//! prompts), asks for confirmation before touching a playlist, authorizes
//! with Spotify and then hands over to the management layer.
//!
//! ## Commands
//!
//! - [`randomize`] - Shuffles a playlist in place
//! - [`restore`] - Re-adds the tracks stored in a backup file
//! - [`list_backups`] - Shows the backup files left behind by failed runs
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (prompts, status output)
//!     ↓
//! Management Layer (PlaylistRandomizer, BackupManager)
//!     ↓
//! Spotify Integration Layer (Authenticator, SpotifyClient)
//! ```
//!
//! Every terminal state of a run prints its own status line through the
//! crate's `info!`, `success!`, `warning!` and `error!` macros. Failures end
//! the process with exit code 1.
//!
//! ## Usage
//!
//! ```bash
//! spotrand randomize https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! spotrand backups
//! spotrand restore --file ~/.local/share/spotrand/backups/backup_37i9dQZF1DXcBWIGoYBM5M.txt
//! ```

mod auth;
mod prompt;
mod randomize;
mod restore;

pub use auth::auth;
pub use auth::client_id;
pub use randomize::randomize;
pub use restore::list_backups;
pub use restore::restore;
