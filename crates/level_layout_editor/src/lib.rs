//! level_layout_editor - Level layout editor for 2D games
//!
//! This crate provides the editing side of the level layout tool:
//! - Editor session with a mode state machine and a single blueprint cursor
//! - Room, furniture and border placement with overlap and containment checks
//! - Level files (save/load) in a levels folder
//! - A typed command surface with a line syntax for scripted editing
//! - Persistent preferences
//!
//! # Usage
//!
//! ```rust,ignore
//! use level_layout_editor::{EditorSession, EditorMode, load_catalog};
//!
//! let catalog = load_catalog("catalog.toml".as_ref())?;
//! let mut session = EditorSession::new(catalog);
//! session.click_at([0.0, 0.0])?;
//! session.set_name("Kitchen");
//! session.resize_blueprint([4.0, 4.0])?;
//! session.create_room()?;
//! ```

pub mod commands;
pub mod preferences;
pub mod project;
pub mod session;

// Re-export the core crate and its most used items
pub use level_layout_core;
pub use level_layout_core::{
    load_catalog, Catalog, LevelDocument, LoadReport, Placeable, PlacementError,
    PlacementIntent, PlacementSink, Variant,
};

pub use commands::{CommandError, CommandOutcome, CommandRunner, EditorCommand};
pub use preferences::EditorPreferences;
pub use project::LevelFiles;
pub use session::{BlueprintCursor, Direction, EditorError, EditorMode, EditorSession};

#[cfg(feature = "bevy")]
pub use plugin::LevelLayoutPlugin;

#[cfg(feature = "bevy")]
mod plugin {
    use crate::preferences::EditorPreferences;
    use bevy::prelude::*;
    use level_layout_core::Catalog;

    /// Inserts an [`EditorSession`](crate::EditorSession), the level files
    /// and the preferences as resources
    pub struct LevelLayoutPlugin {
        pub catalog: Catalog,
    }

    impl Plugin for LevelLayoutPlugin {
        fn build(&self, app: &mut App) {
            let preferences = EditorPreferences::load();
            app.insert_resource(preferences.session(self.catalog.clone()))
                .insert_resource(preferences.level_files())
                .insert_resource(preferences);
        }
    }
}
