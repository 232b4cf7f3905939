//! Error types shared by the authorization flow, the playlist client and the
//! backup store.

use std::{io, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the PKCE authorization-code flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no authorization callback received within {0:?}")]
    Timeout(Duration),

    #[error("authorization was denied: {0}")]
    Denied(String),

    #[error("token exchange failed with status {status}: {body}")]
    TokenExchange { status: StatusCode, body: String },

    #[error("invalid redirect uri: {0}")]
    InvalidRedirect(String),

    #[error("cannot start callback listener: {0}")]
    Listener(#[source] io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures while reading or rewriting a playlist.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to fetch playlist tracks (status {status}): {body}")]
    Fetch { status: StatusCode, body: String },

    #[error("failed to {action} tracks (status {status}): {body}")]
    BatchOperation {
        action: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("invalid playlist link: {0}")]
    InvalidLink(String),

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup file i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed backup file: {0}")]
    Malformed(String),
}
