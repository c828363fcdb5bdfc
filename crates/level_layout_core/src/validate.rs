//! Spatial validation of prospective placements
//!
//! Everything here is a pure function of the store plus a hypothetical
//! rectangle, so the editor can ask "may the blueprint move here?" before
//! changing anything.

use crate::rules::rules_for;
use crate::{Placeable, PlaceableId, PlacementError, PlacementStore, Rect, Variant};

/// Shrink applied to both sides of an intersection before it counts as an
/// overlap. Absorbs floating-point and autotiling seams between adjacent
/// tiles.
pub const DEFAULT_OVERLAP_MARGIN: f32 = 0.03;

/// A prospective placement: a new placeable, or an edit of an existing one
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub rect: Rect,
    /// The placeable being edited, excluded from overlap and name checks
    pub editing: Option<PlaceableId>,
    /// Room the candidate must fit into (furniture only)
    pub parent: Option<PlaceableId>,
}

impl<'a> Candidate<'a> {
    pub fn new(name: &'a str, rect: Rect) -> Self {
        Self {
            name,
            rect,
            editing: None,
            parent: None,
        }
    }

    pub fn editing(mut self, id: PlaceableId) -> Self {
        self.editing = Some(id);
        self
    }

    pub fn in_room(mut self, room: PlaceableId) -> Self {
        self.parent = Some(room);
        self
    }

    /// The same candidate moved by `offset`
    pub fn translated(&self, offset: [f32; 2]) -> Self {
        Self {
            rect: self.rect.translated(offset),
            ..self.clone()
        }
    }
}

/// `child` lies entirely within `parent`
pub fn is_contained(parent: &Rect, child: &Rect) -> bool {
    parent.contains_rect(child)
}

/// Read-only view of the store answering placement questions
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    store: &'a PlacementStore,
    margin: f32,
}

impl<'a> Validator<'a> {
    pub fn new(store: &'a PlacementStore) -> Self {
        Self {
            store,
            margin: DEFAULT_OVERLAP_MARGIN,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn store(&self) -> &'a PlacementStore {
        self.store
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// First placeable of `variant` (other than `excluding`) that the
    /// candidate rectangle collides with
    pub fn overlaps(
        &self,
        variant: Variant,
        candidate: &Rect,
        excluding: Option<PlaceableId>,
    ) -> Option<&'a Placeable> {
        self.store
            .iter_variant(variant)
            .filter(|p| Some(p.id) != excluding)
            .find(|p| p.rect().overlaps_with_margin(candidate, self.margin))
    }

    pub fn check_overlap(
        &self,
        variant: Variant,
        candidate: &Rect,
        excluding: Option<PlaceableId>,
    ) -> Result<(), PlacementError> {
        match self.overlaps(variant, candidate, excluding) {
            Some(other) => Err(PlacementError::Overlap {
                variant,
                other: other.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// The candidate rectangle fits inside the given room
    pub fn check_contained(
        &self,
        room: Option<PlaceableId>,
        candidate: &Rect,
    ) -> Result<(), PlacementError> {
        let room = room
            .and_then(|id| self.store.get(id))
            .ok_or(PlacementError::ParentNotFound)?;
        if room.variant != Variant::Room {
            return Err(PlacementError::InvalidParent {
                name: room.name.clone(),
            });
        }
        if is_contained(&room.rect(), candidate) {
            Ok(())
        } else {
            Err(PlacementError::OutOfBounds {
                room: room.name.clone(),
            })
        }
    }

    pub fn check_name_present(&self, variant: Variant, name: &str) -> Result<(), PlacementError> {
        if name.is_empty() {
            Err(PlacementError::EmptyName(variant))
        } else {
            Ok(())
        }
    }

    pub fn check_name_unique(
        &self,
        variant: Variant,
        name: &str,
        excluding: Option<PlaceableId>,
    ) -> Result<(), PlacementError> {
        if self.store.is_name_taken(variant, name, excluding) {
            Err(PlacementError::DuplicateName {
                variant,
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// A room with furniture may move but not change size. Its children
    /// are never re-validated against a new size.
    pub fn check_resize(&self, room: PlaceableId, footprint: [f32; 2]) -> Result<(), PlacementError> {
        let current = self
            .store
            .get(room)
            .ok_or(PlacementError::UnknownPlaceable(room))?;
        if current.footprint != footprint && self.store.has_children(room) {
            return Err(PlacementError::ResizeWithChildren {
                room: current.name.clone(),
            });
        }
        Ok(())
    }

    /// Run every rule of `variant` against the candidate
    pub fn validate(&self, variant: Variant, candidate: &Candidate<'_>) -> Result<(), PlacementError> {
        rules_for(variant).validate(self, candidate)
    }

    /// Spatial checks of `variant` only, with the candidate moved by
    /// `offset`. Answers "can the blueprint go there" without committing.
    pub fn validate_offset(
        &self,
        variant: Variant,
        candidate: &Candidate<'_>,
        offset: [f32; 2],
    ) -> Result<(), PlacementError> {
        rules_for(variant).check_position(self, &candidate.translated(offset))
    }
}
