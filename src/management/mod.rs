mod backup;
mod randomizer;

pub use backup::BackupManager;
pub use randomizer::PlaylistRandomizer;
