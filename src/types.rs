use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Client registration data used for every authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub scope: String,
    pub redirect_uri: String,
}

/// A PKCE verifier together with its S256 challenge.
///
/// The verifier stays local until the token exchange; only the challenge is
/// placed in the authorization URL.
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    pub fn generate() -> Self {
        let verifier = utils::generate_code_verifier();
        let challenge = utils::generate_code_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Bearer token obtained from the token endpoint. Lives only in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    pub scope: Option<String>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, scope: Option<String>) -> Self {
        Self {
            secret: secret.into(),
            scope,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
}

/// What the loopback listener learned from the single request it served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Denied(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistTrackItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRef {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackRef>,
}

/// Pre-shuffle track order of a playlist, written only when every
/// compensation attempt has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub playlist_id: String,
    pub uris: Vec<String>,
}

impl BackupRecord {
    pub fn new(playlist_id: impl Into<String>, uris: Vec<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            uris,
        }
    }

    /// Plain-text form: the playlist id, then one uri per line.
    pub fn to_contents(&self) -> String {
        let mut out = String::with_capacity(64 + self.uris.len() * 40);
        out.push_str(&self.playlist_id);
        out.push('\n');
        for uri in &self.uris {
            out.push_str(uri);
            out.push('\n');
        }
        out
    }

    pub fn parse(contents: &str) -> Option<Self> {
        let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
        let playlist_id = lines.next()?.to_string();
        let uris = lines.map(str::to_string).collect();
        Some(Self { playlist_id, uris })
    }
}

/// Terminal state of a `randomize_in_place` run that got past the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomizeOutcome {
    /// The playlist now holds the shuffled order.
    Randomized { tracks: usize },
    /// Nothing to randomize: the playlist is empty or not accessible.
    Skipped,
    /// Clearing failed; `restored` tells whether the original tracks were re-added.
    ClearFailed { cause: String, restored: bool },
    /// Adding the shuffled tracks failed and the original order was re-added.
    Restored { cause: String },
    /// Every remediation failed; the original order lives in the backup file.
    BackedUp { path: PathBuf, cause: String },
}

#[derive(Tabled)]
pub struct BackupTableRow {
    pub file: String,
    pub playlist: String,
    pub tracks: usize,
}
