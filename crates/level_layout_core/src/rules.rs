//! Per-variant placement behavior
//!
//! Each variant defines its validation, snapping and serialization once,
//! behind [`PlacementRules`]. Callers look the rules up with [`rules_for`]
//! instead of branching on the variant themselves.

use crate::document::DataListItem;
use crate::geometry::snap_to_half_unit;
use crate::validate::{Candidate, Validator};
use crate::{Placeable, PlacementError, PlacementStore, Variant};

/// Behavior shared by every placeable of one variant
pub trait PlacementRules: Send + Sync {
    fn variant(&self) -> Variant;

    /// Tag the catalog and level files file this variant under
    fn catalog_tag(&self) -> &'static str {
        self.variant().tag()
    }

    /// Spatial checks only: overlap and containment. Used to decide
    /// whether the blueprint may move somewhere before a name is typed.
    fn check_position(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError>;

    /// Every check a commit has to pass
    fn validate(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError>;

    /// Position adjustment applied when a placeable is put down directly
    fn snap(&self, position: [f32; 2]) -> [f32; 2] {
        position
    }

    /// Flatten a placeable into its level file record
    fn record(&self, store: &PlacementStore, placeable: &Placeable) -> DataListItem {
        DataListItem::from_placeable(placeable, store.parent_path(placeable.id))
    }
}

/// Rooms: unique names, no overlap with other rooms, no resizing while
/// furnished
pub struct RoomRules;

impl PlacementRules for RoomRules {
    fn variant(&self) -> Variant {
        Variant::Room
    }

    fn check_position(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        validator.check_overlap(Variant::Room, &candidate.rect, candidate.editing)
    }

    fn validate(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        validator.check_name_present(Variant::Room, candidate.name)?;
        self.check_position(validator, candidate)?;
        validator.check_name_unique(Variant::Room, candidate.name, candidate.editing)?;
        if let Some(room) = candidate.editing {
            validator.check_resize(room, candidate.rect.size)?;
        }
        Ok(())
    }
}

/// Furniture: inside its room, no overlap with any other furniture
pub struct FurnitureRules;

impl PlacementRules for FurnitureRules {
    fn variant(&self) -> Variant {
        Variant::Furniture
    }

    fn check_position(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        validator.check_contained(candidate.parent, &candidate.rect)?;
        validator.check_overlap(Variant::Furniture, &candidate.rect, candidate.editing)
    }

    fn validate(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        self.check_position(validator, candidate)?;
        validator.check_name_present(Variant::Furniture, candidate.name)?;
        validator.check_name_unique(Variant::Furniture, candidate.name, candidate.editing)?;
        Ok(())
    }
}

/// Borders may overlap anything; they snap to the half-unit grid
pub struct BorderRules;

impl PlacementRules for BorderRules {
    fn variant(&self) -> Variant {
        Variant::Border
    }

    fn check_position(&self, _validator: &Validator<'_>, _candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        Ok(())
    }

    fn validate(&self, validator: &Validator<'_>, candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        validator.check_name_present(Variant::Border, candidate.name)?;
        validator.check_name_unique(Variant::Border, candidate.name, candidate.editing)
    }

    fn snap(&self, position: [f32; 2]) -> [f32; 2] {
        [snap_to_half_unit(position[0]), snap_to_half_unit(position[1])]
    }
}

/// The rules object for a variant
pub fn rules_for(variant: Variant) -> &'static dyn PlacementRules {
    match variant {
        Variant::Room => &RoomRules,
        Variant::Furniture => &FurnitureRules,
        Variant::Border => &BorderRules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, Rect, Template};

    #[test]
    fn test_rules_match_variant() {
        for variant in Variant::ALL {
            assert_eq!(rules_for(variant).variant(), variant);
            assert_eq!(rules_for(variant).catalog_tag(), variant.tag());
        }
    }

    #[test]
    fn test_border_snaps_and_room_does_not() {
        assert_eq!(rules_for(Variant::Border).snap([1.23, 4.77]), [1.0, 4.5]);
        assert_eq!(rules_for(Variant::Room).snap([1.23, 4.77]), [1.23, 4.77]);
    }

    #[test]
    fn test_borders_may_overlap() {
        let catalog = Catalog::new().with_template(Variant::Border, Template::new("Wall", 2.0, 1.0));
        let mut store = PlacementStore::default();
        store
            .insert(
                &catalog,
                Placeable::new(Variant::Border, "Wall 1", "Wall", [0.0, 0.0], [2.0, 1.0]),
            )
            .unwrap();
        let validator = Validator::new(&store);

        let stacked = Candidate::new("Wall 2", Rect::new([0.0, 0.0], [2.0, 1.0]));
        assert!(validator.validate(Variant::Border, &stacked).is_ok());

        let clash = Candidate::new("Wall 1", Rect::new([5.0, 0.0], [2.0, 1.0]));
        assert!(matches!(
            validator.validate(Variant::Border, &clash),
            Err(PlacementError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_position_check_ignores_names() {
        let store = PlacementStore::default();
        let validator = Validator::new(&store);
        let unnamed = Candidate::new("", Rect::new([0.0, 0.0], [1.0, 1.0]));

        assert!(rules_for(Variant::Room)
            .check_position(&validator, &unnamed)
            .is_ok());
        assert!(rules_for(Variant::Border)
            .check_position(&validator, &unnamed)
            .is_ok());
    }

    #[test]
    fn test_room_checks_in_order() {
        let store = PlacementStore::default();
        let validator = Validator::new(&store);
        let unnamed = Candidate::new("", Rect::new([0.0, 0.0], [1.0, 1.0]));

        assert_eq!(
            validator.validate(Variant::Room, &unnamed),
            Err(PlacementError::EmptyName(Variant::Room))
        );
    }
}
