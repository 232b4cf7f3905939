use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config,
    errors::PlaylistError,
    info,
    management::BackupManager,
    spotify::playlist::PlaylistApi,
    success,
    types::{BackupRecord, RandomizeOutcome},
    utils, warning,
};

/// Fetches, shuffles and rewrites a single playlist.
///
/// Mutations are compensated rather than retried: when a step fails the
/// randomizer re-adds the original order, and when that fails too the
/// original order is written to a backup file.
pub struct PlaylistRandomizer<C: PlaylistApi> {
    client: C,
    backups: BackupManager,
}

impl<C: PlaylistApi> PlaylistRandomizer<C> {
    pub fn new(client: C, backups: BackupManager) -> Self {
        Self { client, backups }
    }

    pub async fn fetch_tracks(&self, playlist_id: &str) -> Result<Vec<String>, PlaylistError> {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Fetching playlist tracks...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }

        let tracks = self.client.playlist_tracks(playlist_id).await;
        pb.finish_and_clear();
        tracks
    }

    /// Removes the given uris in batches of at most 100.
    ///
    /// The first failing batch aborts the rest.
    pub async fn clear_playlist(
        &self,
        playlist_id: &str,
        tracks: &[String],
    ) -> Result<(), PlaylistError> {
        if tracks.is_empty() {
            info!("Playlist {} is already empty.", playlist_id);
            return Ok(());
        }

        let pb = batch_progress(tracks.len(), "Removing tracks");
        for chunk in tracks.chunks(config::BATCH_LIMIT) {
            if let Err(e) = self.client.remove_tracks(playlist_id, chunk).await {
                pb.abandon();
                return Err(e);
            }
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        info!("Removed {} tracks from playlist {}", tracks.len(), playlist_id);
        Ok(())
    }

    /// Appends the uris in order, 100 per request.
    ///
    /// Batches applied before a failure stay applied.
    pub async fn add_tracks(&self, playlist_id: &str, tracks: &[String]) -> Result<(), PlaylistError> {
        let pb = batch_progress(tracks.len(), "Adding tracks");
        for chunk in tracks.chunks(config::BATCH_LIMIT) {
            if let Err(e) = self.client.append_tracks(playlist_id, chunk).await {
                pb.abandon();
                return Err(e);
            }
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        info!("Added {} tracks to playlist {}", tracks.len(), playlist_id);
        Ok(())
    }

    /// Replaces the playlist's contents with a random permutation of itself.
    ///
    /// `Err` is returned only when nothing was mutated (the fetch failed) or
    /// when the last-resort backup file could not be written. Every other
    /// terminal state is reported through [`RandomizeOutcome`].
    pub async fn randomize_in_place(
        &self,
        playlist_id: &str,
    ) -> Result<RandomizeOutcome, PlaylistError> {
        let original = self.fetch_tracks(playlist_id).await?;
        if original.is_empty() {
            return Ok(RandomizeOutcome::Skipped);
        }
        info!("Fetched {} tracks from playlist {}", original.len(), playlist_id);

        if utils::has_duplicates(&original) {
            warning!(
                "Playlist {} contains duplicate tracks; removing by uri may drop more occurrences than expected.",
                playlist_id
            );
        }

        let mut shuffled = original.clone();
        utils::shuffle(&mut shuffled);

        if let Err(e) = self.clear_playlist(playlist_id, &shuffled).await {
            warning!("Failed to clear the playlist: {}", e);
            info!("Re-adding original tracks...");
            let restored = match self.add_tracks(playlist_id, &original).await {
                Ok(()) => true,
                Err(restore_err) => {
                    warning!("Failed to re-add original tracks: {}", restore_err);
                    false
                }
            };
            return Ok(RandomizeOutcome::ClearFailed {
                cause: e.to_string(),
                restored,
            });
        }

        let cause = match self.add_tracks(playlist_id, &shuffled).await {
            Ok(()) => {
                return Ok(RandomizeOutcome::Randomized {
                    tracks: shuffled.len(),
                });
            }
            Err(e) => e.to_string(),
        };

        warning!("Failed to add shuffled tracks: {}", cause);
        info!("Restoring original tracks...");
        let restore_err = match self.add_tracks(playlist_id, &original).await {
            Ok(()) => {
                success!("Original tracks restored.");
                return Ok(RandomizeOutcome::Restored { cause });
            }
            Err(e) => e,
        };

        warning!("Failed to restore original tracks: {}", restore_err);
        info!("Creating backup file...");
        let record = BackupRecord::new(playlist_id, original);
        match self.backups.write(&record).await {
            Ok(path) => Ok(RandomizeOutcome::BackedUp { path, cause }),
            Err(e) => {
                warning!(
                    "Failed to write backup file. Original track order of playlist {}:\n{}",
                    playlist_id,
                    record.uris.join("\n")
                );
                Err(e.into())
            }
        }
    }

    /// Appends previously backed-up uris; the playlist is not cleared first.
    pub async fn restore_from_backup(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), PlaylistError> {
        self.add_tracks(playlist_id, uris).await
    }
}

fn batch_progress(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30.blue}] {pos}/{len}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(message);
    pb
}
