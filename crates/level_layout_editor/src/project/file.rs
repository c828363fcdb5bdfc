use super::{LevelFiles, LEVEL_EXTENSION};
use level_layout_core::LevelDocument;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Level file failures. Each one aborts only the save or load that hit it.
#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("No level name given")]
    EmptyName,
    #[error("Invalid level name '{0}'")]
    InvalidName(String),
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LevelFiles {
    /// Write the document as one line of JSON, creating the folder when
    /// needed. Returns the written path.
    pub fn save(&self, name: &str, document: &LevelDocument) -> Result<PathBuf, LevelFileError> {
        let path = self.level_path(name)?;
        let json = document.to_json().map_err(|source| LevelFileError::Json {
            path: path.clone(),
            source,
        })?;

        fs::create_dir_all(&self.folder).map_err(|source| LevelFileError::Io {
            path: self.folder.clone(),
            source,
        })?;
        fs::write(&path, format!("{}\n", json)).map_err(|source| LevelFileError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Saved level '{}' ({} records) to {}",
            name,
            document.data_list.len(),
            path.display()
        );
        Ok(path)
    }

    /// Read and parse a level. Nothing is returned unless the whole file
    /// parses.
    pub fn load(&self, name: &str) -> Result<LevelDocument, LevelFileError> {
        let path = self.level_path(name)?;
        let contents = fs::read_to_string(&path).map_err(|source| LevelFileError::Io {
            path: path.clone(),
            source,
        })?;
        let document = LevelDocument::from_json(&contents)
            .map_err(|source| LevelFileError::Json { path: path.clone(), source })?;

        debug!(
            "Read level '{}' with {} records from {}",
            name,
            document.data_list.len(),
            path.display()
        );
        Ok(document)
    }

    /// Names of the levels in the folder, sorted. A missing folder has no
    /// levels.
    pub fn list(&self) -> Result<Vec<String>, LevelFileError> {
        let entries = match fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LevelFileError::Io {
                    path: self.folder.clone(),
                    source,
                })
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == LEVEL_EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}
