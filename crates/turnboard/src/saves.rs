//! JSON save files on disk.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};
use turnboard_engine::{GameMode, PersistError, SaveSink, SavedGame};

/// A save file found in the save directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEntry {
    /// Full path.
    pub path: PathBuf,
    /// Mode tag taken from the file name, if recognisable.
    pub mode: Option<GameMode>,
    /// Last modification time.
    pub modified: DateTime<Local>,
}

/// Reads and writes `<mode>-<timestamp>.json` files in one directory.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// A store rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a new save of `mode` made at `at`.
    pub fn file_name(mode: GameMode, at: DateTime<Local>) -> String {
        format!("{}-{}.json", mode, at.format("%Y%m%d-%H%M%S%.3f"))
    }

    /// Writes `saved` to a fresh file and returns its path.
    #[instrument(skip(self, saved), fields(dir = %self.dir.display(), mode = %saved.mode))]
    pub fn write(&self, saved: &SavedGame) -> Result<PathBuf, PersistError> {
        let json = saved.to_json()?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(saved.mode, Local::now()));
        std::fs::write(&path, json)?;
        info!(path = %path.display(), "Game written");
        Ok(path)
    }

    /// Reads a save file. Relative paths that do not exist as given are
    /// looked up inside the save directory.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn read(&self, path: &Path) -> Result<SavedGame, PersistError> {
        let path = if path.is_relative() && !path.exists() {
            self.dir.join(path)
        } else {
            path.to_path_buf()
        };
        debug!(path = %path.display(), "Reading save file");
        let json = std::fs::read_to_string(&path)?;
        SavedGame::from_json(&json)
    }

    /// Save files in the directory, newest first. A missing directory
    /// holds no saves.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn list(&self) -> Result<Vec<SaveEntry>, PersistError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for item in std::fs::read_dir(&self.dir)? {
            let item = item?;
            let path = item.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let modified = match item.metadata().and_then(|m| m.modified()) {
                Ok(time) => DateTime::<Local>::from(time),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable entry");
                    continue;
                }
            };
            let mode = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.split('-').next())
                .and_then(|tag| GameMode::from_str(tag).ok());
            entries.push(SaveEntry {
                path,
                mode,
                modified,
            });
        }
        entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
        debug!(count = entries.len(), "Listed save files");
        Ok(entries)
    }
}

impl SaveSink for SaveStore {
    fn save(&mut self, saved: &SavedGame) -> Result<String, PersistError> {
        self.write(saved).map(|path| path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_name_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            SaveStore::file_name(GameMode::Notakto, at),
            "notakto-20240309-140507.000.json"
        );
    }

    #[test]
    fn test_missing_directory_lists_nothing() {
        let store = SaveStore::new("definitely/not/a/real/dir");
        assert!(store.list().unwrap().is_empty());
    }
}
