//! Blueprint cursor and nudge directions
//!
//! The blueprint is the one rectangle the user moves and resizes before a
//! create or edit is committed.

use level_layout_core::{Placeable, PlaceableId, Rect, Variant};
use std::str::FromStr;

/// The single transient cursor showing where the next placement or edit
/// would land
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintCursor {
    pub position: [f32; 2],
    pub footprint: [f32; 2],
    /// `None` while nothing is being placed
    pub variant: Option<Variant>,
    /// Placeable being edited, if any
    pub editing: Option<PlaceableId>,
}

impl Default for BlueprintCursor {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            footprint: [1.0, 1.0],
            variant: None,
            editing: None,
        }
    }
}

impl BlueprintCursor {
    /// Cursor for a new placeable
    pub fn new(variant: Variant, position: [f32; 2], footprint: [f32; 2]) -> Self {
        Self {
            position,
            footprint,
            variant: Some(variant),
            editing: None,
        }
    }

    /// Cursor over an existing placeable
    pub fn over(placeable: &Placeable) -> Self {
        Self {
            position: placeable.position,
            footprint: placeable.footprint,
            variant: Some(placeable.variant),
            editing: Some(placeable.id),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.footprint)
    }

    /// Offset that would bring the cursor to `target`
    pub fn offset_to(&self, target: [f32; 2]) -> [f32; 2] {
        [target[0] - self.position[0], target[1] - self.position[1]]
    }
}

/// Nudge direction. North is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Offset of a nudge by `magnitude` in this direction
    pub fn offset(&self, magnitude: f32) -> [f32; 2] {
        match self {
            Direction::North => [0.0, magnitude],
            Direction::East => [magnitude, 0.0],
            Direction::South => [0.0, -magnitude],
            Direction::West => [-magnitude, 0.0],
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" | "up" => Ok(Direction::North),
            "east" | "e" | "right" => Ok(Direction::East),
            "south" | "s" | "down" => Ok(Direction::South),
            "west" | "w" | "left" => Ok(Direction::West),
            _ => Err(format!("unknown direction '{}'", s)),
        }
    }
}
