//! # Spotify Integration Module
//!
//! Talks to Spotify's accounts service and Web API.
//!
//! ```text
//! CLI Layer
//!     ↓
//! Management Layer (randomizer, backups)
//!     ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     └── Playlist Operations (fetch, remove, append)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - The [`auth::Authenticator`] drives the authorization-code flow
//!   with PKCE. It opens the browser, captures the redirect on the loopback
//!   listener and exchanges the code for a bearer token.
//! - [`playlist`] - The [`playlist::PlaylistApi`] trait and its
//!   [`playlist::SpotifyClient`] implementation. Each mutating call is a single
//!   request; batching and compensation live in
//!   [`crate::management::PlaylistRandomizer`].
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - Paginated track listing
//! - `POST /playlists/{id}/tracks` - Append up to 100 uris
//! - `DELETE /playlists/{id}/tracks` - Remove up to 100 uris
//! - `POST /api/token` - Authorization code exchange
//!
//! Nothing in here retries. A failed request surfaces as a typed error and the
//! caller decides which compensating action, if any, follows.

pub mod auth;
pub mod playlist;
