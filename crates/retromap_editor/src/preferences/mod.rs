//! Editor preferences and persistent settings
//!
//! Stored as TOML in the platform config directory:
//! - Windows: %APPDATA%/retromap/
//! - Linux: ~/.config/retromap/
//! - macOS: ~/Library/Application Support/retromap/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use retromap_core::{Cell, DrawFlags, DEFAULT_MAP_H, DEFAULT_MAP_W};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Maximum number of recent files to track
pub const MAX_RECENT_FILES: usize = 10;

const PREFERENCES_FILE: &str = "preferences.toml";

/// Errors that can occur when saving preferences
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Editor preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Version for future migrations
    pub version: u32,

    // New project defaults
    pub default_map_w: i32,
    pub default_map_h: i32,
    pub tile_w: usize,
    pub tile_h: usize,

    // Pens
    pub left_pen: Cell,
    pub right_pen: Cell,
    pub draw_flags: DrawFlags,

    /// Undo depth, 0 for unlimited
    pub max_undo: usize,

    /// Most recent first
    pub recent_files: Vec<PathBuf>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            version: 1,
            default_map_w: DEFAULT_MAP_W,
            default_map_h: DEFAULT_MAP_H,
            tile_w: 8,
            tile_h: 8,
            left_pen: Cell::new(1, 1, 0),
            right_pen: Cell::new(32, 0, 0),
            draw_flags: DrawFlags::ALL,
            max_undo: 0,
            recent_files: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Path of the preferences file, if the platform has a config dir.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "retromap").map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
    }

    /// Load from the platform config dir, falling back to defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory, using default preferences");
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing or unreadable file gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No preferences at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read preferences {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&text) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Corrupt preferences {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to the platform config dir.
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::config_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Move `path` to the front of the recent files list.
    pub fn add_recent_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.recent_files.retain(|p| *p != path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Remove a file from the recent list (e.g. if it no longer exists)
    pub fn remove_recent_file(&mut self, path: &Path) {
        self.recent_files.retain(|p| p != path);
    }

    pub fn last_file(&self) -> Option<&Path> {
        self.recent_files.first().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_files_dedup_and_cap() {
        let mut prefs = EditorPreferences::default();
        for i in 0..12 {
            prefs.add_recent_file(format!("map{}.rmp", i));
        }
        assert_eq!(prefs.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(prefs.last_file(), Some(Path::new("map11.rmp")));

        prefs.add_recent_file("map5.rmp");
        assert_eq!(prefs.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(prefs.last_file(), Some(Path::new("map5.rmp")));
        assert_eq!(
            prefs.recent_files.iter().filter(|p| p.as_path() == Path::new("map5.rmp")).count(),
            1
        );

        prefs.remove_recent_file(Path::new("map5.rmp"));
        assert_eq!(prefs.last_file(), Some(Path::new("map11.rmp")));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);

        let mut prefs = EditorPreferences::default();
        prefs.max_undo = 64;
        prefs.draw_flags = DrawFlags::TILE | DrawFlags::INK;
        prefs.left_pen = Cell::new(7, 3, 2);
        prefs.add_recent_file("/tmp/level1.rmp");
        prefs.save_to(&path).unwrap();

        assert_eq!(EditorPreferences::load_from(&path), prefs);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = EditorPreferences::load_from(&dir.path().join("nope.toml"));
        assert_eq!(prefs, EditorPreferences::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "max_undo = \"lots\"").unwrap();
        assert_eq!(EditorPreferences::load_from(&path), EditorPreferences::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "max_undo = 5\n").unwrap();
        let prefs = EditorPreferences::load_from(&path);
        assert_eq!(prefs.max_undo, 5);
        assert_eq!(prefs.default_map_w, DEFAULT_MAP_W);
    }
}
