//! Editor command surface
//!
//! [`EditorCommand`] is every user action as a value. A [`CommandRunner`]
//! applies commands to one session and its level files, which lets scripts
//! and tests drive the editor without a UI.

mod command;

pub use command::{CommandParseError, EditorCommand};

use crate::project::{LevelFileError, LevelFiles, DEFAULT_LEVEL_NAME};
use crate::session::{EditorError, EditorSession};
use level_layout_core::{LoadReport, PlaceableId, Variant};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] CommandParseError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    File(#[from] LevelFileError),
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Done,
    Created(PlaceableId),
    Saved(PathBuf),
    Loaded(LoadReport),
}

/// A session bound to a levels folder and a current level name
#[derive(Debug)]
pub struct CommandRunner {
    session: EditorSession,
    files: LevelFiles,
    level_name: String,
}

impl CommandRunner {
    pub fn new(session: EditorSession, files: LevelFiles) -> Self {
        Self {
            session,
            files,
            level_name: DEFAULT_LEVEL_NAME.to_string(),
        }
    }

    pub fn with_level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = name.into();
        self
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn files(&self) -> &LevelFiles {
        &self.files
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn into_session(self) -> EditorSession {
        self.session
    }

    /// Parse and run one line. Blank lines and `#` comments do nothing.
    pub fn execute_line(&mut self, line: &str) -> Result<CommandOutcome, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(CommandOutcome::Done);
        }
        let command: EditorCommand = line.parse()?;
        self.execute(&command)
    }

    /// Run every line of a script, continuing past failures. Returns the
    /// failures with their 1-based line numbers.
    pub fn run_script(&mut self, script: &str) -> Vec<(usize, CommandError)> {
        let mut failures = Vec::new();
        for (index, line) in script.lines().enumerate() {
            if let Err(e) = self.execute_line(line) {
                warn!("Line {}: {}", index + 1, e);
                failures.push((index + 1, e));
            }
        }
        failures
    }

    pub fn execute(&mut self, command: &EditorCommand) -> Result<CommandOutcome, CommandError> {
        debug!("Executing {:?}", command);
        let session = &mut self.session;

        match command {
            EditorCommand::SetWorldWidth(text) => session.set_world_width(text),
            EditorCommand::SetWorldHeight(text) => session.set_world_height(text),
            EditorCommand::SwitchMode(mode) => session.switch_mode(*mode)?,
            EditorCommand::Click(point) => session.click_at(*point)?,
            EditorCommand::Select { variant, name } => session.select(*variant, name)?,
            EditorCommand::SetName(name) => session.set_name(name),
            EditorCommand::SetTemplate { variant, key } => session.set_template(*variant, key)?,
            EditorCommand::SetBlueprintX(text) => session.set_blueprint_x(text)?,
            EditorCommand::SetBlueprintY(text) => session.set_blueprint_y(text)?,
            EditorCommand::SetBlueprintWidth(text) => session.set_blueprint_width(text)?,
            EditorCommand::SetBlueprintHeight(text) => session.set_blueprint_height(text)?,
            EditorCommand::SetBlueprintPosition(point) => session.set_blueprint_position(*point)?,
            EditorCommand::MoveBlueprint {
                direction,
                magnitude,
            } => session.move_blueprint_text(*direction, magnitude)?,
            EditorCommand::Create(variant) => {
                let id = match variant {
                    None => session.create()?,
                    Some(Variant::Room) => session.create_room()?,
                    Some(Variant::Furniture) => session.create_furniture()?,
                    Some(Variant::Border) => session.create_border()?,
                };
                return Ok(CommandOutcome::Created(id));
            }
            EditorCommand::Edit(variant) => match variant {
                None => session.edit()?,
                Some(Variant::Room) => session.edit_room()?,
                Some(Variant::Furniture) => session.edit_furniture()?,
                Some(Variant::Border) => session.edit_border()?,
            },
            EditorCommand::Delete(variant) => match variant {
                None => session.delete()?,
                Some(Variant::Room) => session.delete_room()?,
                Some(Variant::Furniture) => session.delete_furniture()?,
                Some(Variant::Border) => session.delete_border()?,
            },
            EditorCommand::BackToRoom => session.back_to_room()?,
            EditorCommand::SetLevelName(name) => self.level_name = name.clone(),
            EditorCommand::Save => return self.save().map(CommandOutcome::Saved),
            EditorCommand::Load => return self.load().map(CommandOutcome::Loaded),
            EditorCommand::Clear => session.clear_level(),
        }
        Ok(CommandOutcome::Done)
    }

    /// Save the session under the current level name
    pub fn save(&self) -> Result<PathBuf, CommandError> {
        Ok(self.files.save(&self.level_name, &self.session.document())?)
    }

    /// Replace the session's level with the file of the current level
    /// name. A missing or malformed file leaves the session untouched.
    pub fn load(&mut self) -> Result<LoadReport, CommandError> {
        let document = self.files.load(&self.level_name)?;
        Ok(self.session.load_document(&document))
    }
}
