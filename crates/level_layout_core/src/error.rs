//! Placement failures reported to the caller

use crate::{PlaceableId, Variant};
use thiserror::Error;

/// Why a placement, edit or store mutation was declined.
///
/// The store is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("{0} name is empty")]
    EmptyName(Variant),
    #[error("{variant} name '{name}' is not unique")]
    DuplicateName { variant: Variant, name: String },
    #[error("Overlap with an existing {} '{other}'", .variant.noun())]
    Overlap { variant: Variant, other: String },
    #[error("Furniture would be out of bounds of room '{room}'")]
    OutOfBounds { room: String },
    #[error("Parent room not found")]
    ParentNotFound,
    #[error("'{name}' is not a room and can not hold furniture")]
    InvalidParent { name: String },
    #[error("No {} template '{key}' in the catalog", .variant.noun())]
    TemplateNotFound { variant: Variant, key: String },
    #[error("{variant} '{name}' has an invalid footprint {width} x {height}")]
    InvalidFootprint {
        variant: Variant,
        name: String,
        width: f32,
        height: f32,
    },
    #[error("Can not resize room '{room}' with children")]
    ResizeWithChildren { room: String },
    #[error("No placeable with id {0}")]
    UnknownPlaceable(PlaceableId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            PlacementError::EmptyName(Variant::Room).to_string(),
            "Room name is empty"
        );
        assert_eq!(
            PlacementError::Overlap {
                variant: Variant::Furniture,
                other: "Table".to_string()
            }
            .to_string(),
            "Overlap with an existing furniture 'Table'"
        );
        assert_eq!(
            PlacementError::TemplateNotFound {
                variant: Variant::Border,
                key: "Fence".to_string()
            }
            .to_string(),
            "No border template 'Fence' in the catalog"
        );
    }
}
