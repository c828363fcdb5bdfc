//! Placeable variant tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a placed map object.
///
/// Serialized as an integer (`0` = room, `1` = furniture, `2` = border) so
/// level files stay compatible with the editor's existing `.json` levels,
/// where rooms are stored under the `Floor` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Variant {
    Room,
    Furniture,
    Border,
}

impl Variant {
    /// Fixed persistence order: rooms first so furniture parents exist before
    /// their children, borders last.
    pub const ALL: [Variant; 3] = [Variant::Room, Variant::Furniture, Variant::Border];

    /// Tag used by the catalog and by level files
    pub fn tag(&self) -> &'static str {
        match self {
            Variant::Room => "Floor",
            Variant::Furniture => "Furniture",
            Variant::Border => "Border",
        }
    }

    /// Lowercase display noun ("room", "furniture", "border")
    pub fn noun(&self) -> &'static str {
        match self {
            Variant::Room => "room",
            Variant::Furniture => "furniture",
            Variant::Border => "border",
        }
    }

    /// Parse a catalog tag. Accepts both `Floor` and `Room` for rooms.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "floor" | "room" => Some(Variant::Room),
            "furniture" => Some(Variant::Furniture),
            "border" | "wall" => Some(Variant::Border),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Room => write!(f, "Room"),
            Variant::Furniture => write!(f, "Furniture"),
            Variant::Border => write!(f, "Border"),
        }
    }
}

impl From<Variant> for u8 {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Room => 0,
            Variant::Furniture => 1,
            Variant::Border => 2,
        }
    }
}

impl TryFrom<u8> for Variant {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Variant::Room),
            1 => Ok(Variant::Furniture),
            2 => Ok(Variant::Border),
            other => Err(format!("unknown placeable type {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Variant::Room).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Variant::Border).unwrap(), "2");

        let parsed: Variant = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Variant::Furniture);
        assert!(serde_json::from_str::<Variant>("7").is_err());
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(Variant::from_tag("Floor"), Some(Variant::Room));
        assert_eq!(Variant::from_tag("room"), Some(Variant::Room));
        assert_eq!(Variant::from_tag("FURNITURE"), Some(Variant::Furniture));
        assert_eq!(Variant::from_tag("Border"), Some(Variant::Border));
        assert_eq!(Variant::from_tag("Door"), None);
    }
}
