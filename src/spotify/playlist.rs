use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    config,
    errors::PlaylistError,
    types::{AccessToken, AddTracksRequest, PlaylistTracksPage, RemoveTracksRequest, TrackRef},
};

/// Playlist operations the randomizer needs from the provider.
///
/// `remove_tracks` and `append_tracks` each issue exactly one request; the
/// caller is responsible for keeping batches within the provider limit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    /// All track uris of the playlist, in playlist order.
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<String>, PlaylistError>;

    /// Removes every occurrence of the given uris.
    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError>;

    /// Appends the uris, in order, to the end of the playlist.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError>;
}

/// Spotify Web API implementation of [`PlaylistApi`].
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: AccessToken,
}

impl SpotifyClient {
    pub fn new(token: AccessToken) -> Self {
        Self::with_api_url(token, config::spotify_apiurl())
    }

    pub fn with_api_url(token: AccessToken, api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        )
    }
}

#[async_trait]
impl PlaylistApi for SpotifyClient {
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<String>, PlaylistError> {
        let mut uris = Vec::new();
        let mut next = Some(format!(
            "{url}?limit={limit}",
            url = self.tracks_url(playlist_id),
            limit = config::BATCH_LIMIT
        ));

        while let Some(page_url) = next {
            let response = self
                .http
                .get(&page_url)
                .bearer_auth(self.token.secret())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(PlaylistError::Fetch { status, body });
            }

            let page = response.json::<PlaylistTracksPage>().await?;
            // unavailable tracks come back as `"track": null`
            uris.extend(page.items.into_iter().filter_map(|item| item.track.map(|t| t.uri)));
            next = page.next;
        }

        Ok(uris)
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError> {
        let body = RemoveTracksRequest {
            tracks: uris.iter().map(|uri| TrackRef { uri: uri.clone() }).collect(),
        };

        let response = self
            .http
            .delete(self.tracks_url(playlist_id))
            .bearer_auth(self.token.secret())
            .json(&body)
            .send()
            .await?;

        expect_status(response, StatusCode::OK, "remove").await
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError> {
        let body = AddTracksRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http
            .post(self.tracks_url(playlist_id))
            .bearer_auth(self.token.secret())
            .json(&body)
            .send()
            .await?;

        expect_status(response, StatusCode::CREATED, "add").await
    }
}

async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
    action: &'static str,
) -> Result<(), PlaylistError> {
    let status = response.status();
    if status == expected {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(PlaylistError::BatchOperation {
        action,
        status,
        body,
    })
}
