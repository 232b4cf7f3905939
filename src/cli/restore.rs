use std::path::PathBuf;

use dialoguer::Select;
use tabled::Table;

use crate::{
    cli::{auth, prompt},
    config, error, info,
    management::{BackupManager, PlaylistRandomizer},
    spotify::playlist::SpotifyClient,
    success,
    types::BackupTableRow,
    warning,
};

pub async fn restore(file: Option<PathBuf>, yes: bool) {
    let backups = BackupManager::new(config::backup_dir());

    let path = match file {
        Some(path) => path,
        None => match select_backup(&backups).await {
            Some(path) => path,
            None => {
                info!("Backup restoration cancelled.");
                return;
            }
        },
    };

    let record = match backups.read(&path).await {
        Ok(record) => record,
        Err(e) => error!("Cannot read backup file {}: {}", path.display(), e),
    };

    if record.uris.is_empty() {
        warning!("Backup file {} contains no tracks.", path.display());
        return;
    }

    if !yes
        && !prompt::confirm(&format!(
            "Are you sure you want to restore playlist {} from {}?",
            record.playlist_id,
            path.display()
        ))
    {
        info!("Backup restoration cancelled.");
        return;
    }

    let token = auth::auth().await;
    let randomizer = PlaylistRandomizer::new(
        SpotifyClient::new(token),
        BackupManager::new(config::backup_dir()),
    );

    match randomizer
        .restore_from_backup(&record.playlist_id, &record.uris)
        .await
    {
        Ok(()) => {
            success!(
                "Playlist {} restored successfully from backup ({} tracks).",
                record.playlist_id,
                record.uris.len()
            );
            match backups.delete(&path).await {
                Ok(()) => info!("Backup file {} has been deleted.", path.display()),
                Err(e) => warning!("Error deleting backup file: {}", e),
            }
        }
        Err(e) => error!(
            "Restoring playlist {} failed: {}\nThe backup file {} was kept.",
            record.playlist_id,
            e,
            path.display()
        ),
    }
}

pub async fn list_backups() {
    let backups = BackupManager::new(config::backup_dir());
    let paths = match backups.list().await {
        Ok(paths) => paths,
        Err(e) => error!("Cannot list backups: {}", e),
    };

    if paths.is_empty() {
        info!("No backup files found in {}", backups.dir().display());
        return;
    }

    let mut rows = Vec::with_capacity(paths.len());
    for path in paths {
        match backups.read(&path).await {
            Ok(record) => rows.push(BackupTableRow {
                file: path.display().to_string(),
                playlist: record.playlist_id,
                tracks: record.uris.len(),
            }),
            Err(e) => warning!("Skipping {}: {}", path.display(), e),
        }
    }

    let table = Table::new(rows);
    println!("{}", table);
}

async fn select_backup(backups: &BackupManager) -> Option<PathBuf> {
    let paths = match backups.list().await {
        Ok(paths) => paths,
        Err(e) => error!("Cannot list backups: {}", e),
    };

    if paths.is_empty() {
        warning!("No backup files found in {}", backups.dir().display());
        return None;
    }

    let mut items: Vec<String> = paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    items.push("none".to_string());

    let choice = match Select::new()
        .with_prompt("Select the backup file you want to restore")
        .items(&items)
        .default(0)
        .interact()
    {
        Ok(choice) => choice,
        Err(e) => error!("Cannot read selection: {}", e),
    };

    paths.get(choice).cloned()
}
