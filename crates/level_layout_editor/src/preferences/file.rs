use super::EditorPreferences;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("No config directory available on this platform")]
    NoConfigDir,
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl EditorPreferences {
    /// Platform config directory of the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "level_layout_editor").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Load from the config directory. Missing or unreadable preferences
    /// give the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::preferences_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("Failed to load preferences, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        let contents = fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save to the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferencesError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved preferences to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(PREFERENCES_FILE);

        let mut prefs = EditorPreferences::default();
        prefs.last_level_name = "Mansion".to_string();
        prefs.catalog_path = Some(PathBuf::from("catalog.toml"));
        prefs.save_to(&path).unwrap();

        assert_eq!(EditorPreferences::load_from(&path).unwrap(), prefs);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "last_level_name = \"Cellar\"\noverlap_margin = 0.05\n").unwrap();

        let prefs = EditorPreferences::load_from(&path).unwrap();
        assert_eq!(prefs.last_level_name, "Cellar");
        assert_eq!(prefs.overlap_margin, 0.05);
        assert_eq!(prefs.default_world_width, 40.0);
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "overlap_margin = [").unwrap();

        assert!(matches!(
            EditorPreferences::load_from(&path),
            Err(PreferencesError::Parse(_))
        ));
    }
}
