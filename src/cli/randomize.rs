use crate::{
    cli::{auth, prompt},
    config, error, info,
    management::{BackupManager, PlaylistRandomizer},
    spotify::playlist::SpotifyClient,
    success,
    types::RandomizeOutcome,
    utils,
};

pub async fn randomize(link: Option<String>, yes: bool) {
    let playlist_id = match link {
        Some(link) => match utils::parse_playlist_id(&link) {
            Ok(id) => id,
            Err(e) => error!("{}", e),
        },
        None => prompt::playlist_id(),
    };

    if !yes
        && !prompt::confirm(&format!(
            "Are you sure you want to randomize the playlist with ID {}?",
            playlist_id
        ))
    {
        info!("Randomization cancelled.");
        return;
    }

    let token = auth::auth().await;
    let randomizer = PlaylistRandomizer::new(
        SpotifyClient::new(token),
        BackupManager::new(config::backup_dir()),
    );

    match randomizer.randomize_in_place(&playlist_id).await {
        Ok(RandomizeOutcome::Randomized { tracks }) => {
            success!(
                "Playlist {} has been successfully randomized in place ({} tracks).",
                playlist_id,
                tracks
            )
        }
        Ok(RandomizeOutcome::Skipped) => {
            info!(
                "Playlist {} is empty or not accessible. Nothing to randomize.",
                playlist_id
            )
        }
        Ok(RandomizeOutcome::ClearFailed {
            cause,
            restored: true,
        }) => error!(
            "Failed to clear playlist {}: {}\nThe original tracks were re-added; check the playlist for leftovers of the partial clear.",
            playlist_id,
            cause
        ),
        Ok(RandomizeOutcome::ClearFailed {
            cause,
            restored: false,
        }) => error!(
            "Failed to clear playlist {}: {}\nRe-adding the original tracks failed as well; the playlist may be incomplete.",
            playlist_id,
            cause
        ),
        Ok(RandomizeOutcome::Restored { cause }) => error!(
            "Randomization of playlist {} failed: {}\nThe playlist was restored to its original order.",
            playlist_id,
            cause
        ),
        Ok(RandomizeOutcome::BackedUp { path, cause }) => error!(
            "Randomization of playlist {} failed: {}\nThe original order was saved to {}.\nRun `spotrand restore --file {}` to recover it.",
            playlist_id,
            cause,
            path.display(),
            path.display()
        ),
        Err(e) => error!("Randomization of playlist {} aborted: {}", playlist_id, e),
    }
}
