//! Level files on disk
//!
//! Every level lives in `{levels folder}/{level name}.json`. The name is
//! checked before any filesystem access so a bad name can never escape the
//! folder.

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

/// Folder levels are kept in when nothing else is configured
pub const DEFAULT_LEVELS_FOLDER: &str = "Levels";

/// Level name the editor starts with
pub const DEFAULT_LEVEL_NAME: &str = "TestLevel";

pub const LEVEL_EXTENSION: &str = "json";

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Reject names that are empty or could not be used as a file name
pub fn validate_level_name(name: &str) -> Result<(), LevelFileError> {
    if name.is_empty() {
        return Err(LevelFileError::EmptyName);
    }
    if name
        .chars()
        .any(|c| c.is_control() || RESERVED_CHARS.contains(&c))
    {
        return Err(LevelFileError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Maps level names to files inside one folder
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct LevelFiles {
    folder: PathBuf,
}

impl Default for LevelFiles {
    fn default() -> Self {
        Self::new(DEFAULT_LEVELS_FOLDER)
    }
}

impl LevelFiles {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of the level called `name`
    pub fn level_path(&self, name: &str) -> Result<PathBuf, LevelFileError> {
        validate_level_name(name)?;
        Ok(self.folder.join(format!("{}.{}", name, LEVEL_EXTENSION)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.level_path(name).map(|p| p.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert!(validate_level_name("TestLevel").is_ok());
        assert!(validate_level_name("Level 2 (old)").is_ok());
        assert!(matches!(validate_level_name(""), Err(LevelFileError::EmptyName)));
        for bad in ["a/b", "..\\up", "what?", "tab\there", "c:drive"] {
            assert!(
                matches!(validate_level_name(bad), Err(LevelFileError::InvalidName(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_level_path() {
        let files = LevelFiles::new("/tmp/levels");
        assert_eq!(
            files.level_path("TestLevel").unwrap(),
            PathBuf::from("/tmp/levels/TestLevel.json")
        );
        assert!(files.level_path("../escape").is_err());
        assert_eq!(LevelFiles::default().folder(), Path::new("Levels"));
    }
}
