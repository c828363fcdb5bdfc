//! Typed editor commands and their line syntax
//!
//! ```text
//! mode CreateBorder          click 1.23 4.77
//! select room Kitchen        name Big Table
//! template furniture Table   position 0 0
//! move north 2               width 4
//! create [room|furniture|border]
//! edit | delete | back
//! level TestLevel            save | load | clear
//! ```
//!
//! Field values (`width`, `x`, `move` magnitudes, world sizes) are kept as
//! typed text and parsed leniently by the session, like a text box.

use crate::session::{Direction, EditorMode};
use level_layout_core::Variant;
use std::str::FromStr;
use thiserror::Error;

/// Something the user asked the editor to do
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    SetWorldWidth(String),
    SetWorldHeight(String),
    SwitchMode(EditorMode),
    /// Secondary click on the canvas
    Click([f32; 2]),
    Select { variant: Variant, name: String },
    SetName(String),
    SetTemplate { variant: Variant, key: String },
    SetBlueprintX(String),
    SetBlueprintY(String),
    SetBlueprintWidth(String),
    SetBlueprintHeight(String),
    SetBlueprintPosition([f32; 2]),
    MoveBlueprint { direction: Direction, magnitude: String },
    /// Commit the blueprint; `None` uses the current mode
    Create(Option<Variant>),
    Edit(Option<Variant>),
    Delete(Option<Variant>),
    BackToRoom,
    SetLevelName(String),
    Save,
    Load,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[error("Invalid argument for '{command}': {message}")]
    InvalidArgument { command: String, message: String },
}

fn parse_variant(command: &str, word: &str) -> Result<Variant, CommandParseError> {
    Variant::from_tag(word).ok_or_else(|| CommandParseError::InvalidArgument {
        command: command.to_string(),
        message: format!("unknown variant '{}'", word),
    })
}

fn parse_point(command: &str, args: &str) -> Result<[f32; 2], CommandParseError> {
    let mut numbers = args.split_whitespace().map(|word| {
        word.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandParseError::InvalidArgument {
                command: command.to_string(),
                message: format!("'{}' is not a number", word),
            })
    });
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(x), Some(y), None) => Ok([x?, y?]),
        _ => Err(CommandParseError::MissingArgument {
            command: command.to_string(),
            expected: "two coordinates",
        }),
    }
}

fn optional_variant(command: &str, args: &str) -> Result<Option<Variant>, CommandParseError> {
    if args.is_empty() {
        Ok(None)
    } else {
        parse_variant(command, args).map(Some)
    }
}

fn required<'a>(
    command: &str,
    args: &'a str,
    expected: &'static str,
) -> Result<&'a str, CommandParseError> {
    if args.is_empty() {
        Err(CommandParseError::MissingArgument {
            command: command.to_string(),
            expected,
        })
    } else {
        Ok(args)
    }
}

/// `variant rest-of-line`
fn variant_and_text<'a>(
    command: &str,
    args: &'a str,
    expected: &'static str,
) -> Result<(Variant, &'a str), CommandParseError> {
    let (word, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let variant = parse_variant(command, required(command, word, expected)?)?;
    Ok((variant, required(command, rest.trim(), expected)?))
}

impl FromStr for EditorCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandParseError::Empty);
        }
        let (verb, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = args.trim();
        let command = verb.to_ascii_lowercase();
        let cmd = command.as_str();

        let parsed = match cmd {
            "world-width" => EditorCommand::SetWorldWidth(args.to_string()),
            "world-height" => EditorCommand::SetWorldHeight(args.to_string()),
            "mode" => {
                let mode = required(cmd, args, "a mode")?
                    .parse::<EditorMode>()
                    .map_err(|message| CommandParseError::InvalidArgument {
                        command: command.clone(),
                        message,
                    })?;
                EditorCommand::SwitchMode(mode)
            }
            "view" => EditorCommand::SwitchMode(EditorMode::ViewMode),
            "click" => EditorCommand::Click(parse_point(cmd, args)?),
            "select" => {
                let (variant, name) = variant_and_text(cmd, args, "a variant and a name")?;
                EditorCommand::Select {
                    variant,
                    name: name.to_string(),
                }
            }
            "name" => EditorCommand::SetName(args.to_string()),
            "template" => {
                let (variant, key) = variant_and_text(cmd, args, "a variant and a template")?;
                EditorCommand::SetTemplate {
                    variant,
                    key: key.to_string(),
                }
            }
            "x" => EditorCommand::SetBlueprintX(args.to_string()),
            "y" => EditorCommand::SetBlueprintY(args.to_string()),
            "width" => EditorCommand::SetBlueprintWidth(args.to_string()),
            "height" => EditorCommand::SetBlueprintHeight(args.to_string()),
            "position" => EditorCommand::SetBlueprintPosition(parse_point(cmd, args)?),
            "move" => {
                let (word, magnitude) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
                let direction = required(cmd, word, "a direction and a distance")?
                    .parse::<Direction>()
                    .map_err(|message| CommandParseError::InvalidArgument {
                        command: command.clone(),
                        message,
                    })?;
                EditorCommand::MoveBlueprint {
                    direction,
                    magnitude: magnitude.trim().to_string(),
                }
            }
            "create" => EditorCommand::Create(optional_variant(cmd, args)?),
            "edit" => EditorCommand::Edit(optional_variant(cmd, args)?),
            "delete" => EditorCommand::Delete(optional_variant(cmd, args)?),
            "back" => EditorCommand::BackToRoom,
            "level" => EditorCommand::SetLevelName(args.to_string()),
            "save" => EditorCommand::Save,
            "load" => EditorCommand::Load,
            "clear" => EditorCommand::Clear,
            _ => return Err(CommandParseError::UnknownCommand(verb.to_string())),
        };
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "select room Big Kitchen".parse::<EditorCommand>(),
            Ok(EditorCommand::Select {
                variant: Variant::Room,
                name: "Big Kitchen".to_string()
            })
        );
        assert_eq!(
            "  Click 1.23   4.77 ".parse::<EditorCommand>(),
            Ok(EditorCommand::Click([1.23, 4.77]))
        );
        assert_eq!(
            "move west 1.5".parse::<EditorCommand>(),
            Ok(EditorCommand::MoveBlueprint {
                direction: Direction::West,
                magnitude: "1.5".to_string()
            })
        );
        assert_eq!(
            "mode EditFurniture".parse::<EditorCommand>(),
            Ok(EditorCommand::SwitchMode(EditorMode::EditFurniture))
        );
        assert_eq!(
            "create floor".parse::<EditorCommand>(),
            Ok(EditorCommand::Create(Some(Variant::Room)))
        );
        assert_eq!("delete".parse::<EditorCommand>(), Ok(EditorCommand::Delete(None)));
        assert_eq!("name".parse::<EditorCommand>(), Ok(EditorCommand::SetName(String::new())));
    }

    #[test]
    fn test_field_values_stay_text() {
        assert_eq!(
            "width abc".parse::<EditorCommand>(),
            Ok(EditorCommand::SetBlueprintWidth("abc".to_string()))
        );
        assert_eq!(
            "world-height".parse::<EditorCommand>(),
            Ok(EditorCommand::SetWorldHeight(String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<EditorCommand>(), Err(CommandParseError::Empty));
        assert!(matches!(
            "paint 1 2".parse::<EditorCommand>(),
            Err(CommandParseError::UnknownCommand(_))
        ));
        assert!(matches!(
            "click 1".parse::<EditorCommand>(),
            Err(CommandParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            "position 1 two".parse::<EditorCommand>(),
            Err(CommandParseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "select room".parse::<EditorCommand>(),
            Err(CommandParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            "create table".parse::<EditorCommand>(),
            Err(CommandParseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "move diagonal 2".parse::<EditorCommand>(),
            Err(CommandParseError::InvalidArgument { .. })
        ));
    }
}
