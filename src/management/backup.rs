use std::path::{Path, PathBuf};

use futures::StreamExt;

use crate::{errors::BackupError, types::BackupRecord};

const BACKUP_PREFIX: &str = "backup";

pub struct BackupManager {
    dir: PathBuf,
}

impl BackupManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the record to a fresh `backup_<playlist>.txt` file and returns its path.
    ///
    /// An existing backup for the same playlist is never overwritten; a numeric
    /// suffix is appended instead.
    pub async fn write(&self, record: &BackupRecord) -> Result<PathBuf, BackupError> {
        async_fs::create_dir_all(&self.dir).await?;

        let path = self.free_path(&record.playlist_id);
        async_fs::write(&path, record.to_contents()).await?;
        Ok(path)
    }

    pub async fn read(&self, path: &Path) -> Result<BackupRecord, BackupError> {
        let content = async_fs::read_to_string(path).await?;
        BackupRecord::parse(&content).ok_or_else(|| {
            BackupError::Malformed(format!("{} has no playlist id line", path.display()))
        })
    }

    /// All `backup*` files in the backup directory, sorted by file name.
    pub async fn list(&self) -> Result<Vec<PathBuf>, BackupError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = async_fs::read_dir(&self.dir).await?;
        let mut backups = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry?;
            let is_backup = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(BACKUP_PREFIX));
            if is_backup && entry.file_type().await?.is_file() {
                backups.push(entry.path());
            }
        }

        backups.sort();
        Ok(backups)
    }

    pub async fn delete(&self, path: &Path) -> Result<(), BackupError> {
        async_fs::remove_file(path).await.map_err(BackupError::Io)
    }

    fn free_path(&self, playlist_id: &str) -> PathBuf {
        let first = self.dir.join(format!("{BACKUP_PREFIX}_{playlist_id}.txt"));
        if !first.exists() {
            return first;
        }

        (1..)
            .map(|n| self.dir.join(format!("{BACKUP_PREFIX}_{playlist_id}_{n}.txt")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BackupRecord {
        BackupRecord::new(
            "pl1",
            vec!["spotify:track:a".into(), "spotify:track:b".into()],
        )
    }

    #[tokio::test]
    async fn write_then_read_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let manager = BackupManager::new(dir.path().join("nested"));

        let path = manager.write(&record()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "backup_pl1.txt");

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "pl1\nspotify:track:a\nspotify:track:b\n");
        assert_eq!(manager.read(&path).await.unwrap(), record());
    }

    #[tokio::test]
    async fn second_backup_for_same_playlist_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let manager = BackupManager::new(dir.path());

        let first = manager.write(&record()).await.unwrap();
        let second = manager.write(&record()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "backup_pl1_1.txt");
        assert_eq!(manager.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn list_ignores_other_files_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("backup_x.txt"), "x\n").unwrap();

        let manager = BackupManager::new(dir.path());
        assert_eq!(
            manager.list().await.unwrap(),
            vec![dir.path().join("backup_x.txt")]
        );

        let missing = BackupManager::new(dir.path().join("nope"));
        assert!(missing.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup_empty.txt");
        std::fs::write(&path, "\n\n").unwrap();

        let manager = BackupManager::new(dir.path());
        assert!(matches!(
            manager.read(&path).await,
            Err(BackupError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = BackupManager::new(dir.path());
        let path = manager.write(&record()).await.unwrap();

        manager.delete(&path).await.unwrap();
        assert!(!path.exists());
    }
}
