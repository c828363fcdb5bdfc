//! Editor preferences and persistent settings
//!
//! Manages user preferences stored in platform-specific config directories:
//! - Windows: %APPDATA%/level_layout_editor/
//! - Linux: ~/.config/level_layout_editor/
//! - macOS: ~/Library/Application Support/level_layout_editor/

mod file;

pub use file::*;

use crate::project::{LevelFiles, DEFAULT_LEVELS_FOLDER, DEFAULT_LEVEL_NAME};
use crate::session::EditorSession;
use level_layout_core::{Catalog, WorldBounds, DEFAULT_OVERLAP_MARGIN, DEFAULT_WORLD_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Editor preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct EditorPreferences {
    /// Version for future migrations
    pub version: u32,

    // Files
    pub levels_folder: PathBuf,
    pub last_level_name: String,
    /// Template catalog loaded at startup
    pub catalog_path: Option<PathBuf>,

    // New levels
    pub default_world_width: f32,
    pub default_world_height: f32,

    // Validation
    pub overlap_margin: f32,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            version: 1,
            levels_folder: PathBuf::from(DEFAULT_LEVELS_FOLDER),
            last_level_name: DEFAULT_LEVEL_NAME.to_string(),
            catalog_path: None,
            default_world_width: DEFAULT_WORLD_SIZE[0],
            default_world_height: DEFAULT_WORLD_SIZE[1],
            overlap_margin: DEFAULT_OVERLAP_MARGIN,
        }
    }
}

impl EditorPreferences {
    /// World size for new sessions; invalid sizes fall back to the default
    pub fn world_bounds(&self) -> WorldBounds {
        let (width, height) = (self.default_world_width, self.default_world_height);
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            WorldBounds::new(width, height)
        } else {
            warn!("Invalid default world size {} x {} in preferences", width, height);
            WorldBounds::default()
        }
    }

    /// Overlap margin, falling back to the default when negative
    pub fn margin(&self) -> f32 {
        if self.overlap_margin >= 0.0 && self.overlap_margin.is_finite() {
            self.overlap_margin
        } else {
            warn!("Invalid overlap margin {} in preferences", self.overlap_margin);
            DEFAULT_OVERLAP_MARGIN
        }
    }

    pub fn level_files(&self) -> LevelFiles {
        LevelFiles::new(&self.levels_folder)
    }

    /// A fresh session configured from these preferences
    pub fn session(&self, catalog: Catalog) -> EditorSession {
        EditorSession::new(catalog)
            .with_world(self.world_bounds())
            .with_margin(self.margin())
    }
}
