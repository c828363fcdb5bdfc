//! Placed map objects and world bounds

use crate::{Rect, Variant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-memory identity of a placeable. Not persisted: level files link
/// children to parents by name path instead.
pub type PlaceableId = Uuid;

/// Default world size used when a level does not specify one
pub const DEFAULT_WORLD_SIZE: [f32; 2] = [40.0, 40.0];

/// A room, piece of furniture or border placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeable {
    pub id: PlaceableId,
    pub variant: Variant,
    /// Unique among placeables of the same variant
    pub name: String,
    /// Catalog template key
    pub template: String,
    /// Center position in world units
    pub position: [f32; 2],
    /// Always 0 for 2D placeables, carried through save/load
    #[serde(default)]
    pub z: f32,
    pub footprint: [f32; 2],
    /// Draw-order bucket
    #[serde(default)]
    pub layer: i32,
    /// Parent room, furniture only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PlaceableId>,
}

impl Placeable {
    /// Create a new placeable with a fresh id and no parent
    pub fn new(
        variant: Variant,
        name: impl Into<String>,
        template: impl Into<String>,
        position: [f32; 2],
        footprint: [f32; 2],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant,
            name: name.into(),
            template: template.into(),
            position,
            z: 0.0,
            footprint,
            layer: 0,
            parent: None,
        }
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_parent(mut self, parent: PlaceableId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Bounding rectangle in world units
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.footprint)
    }
}

/// Size of the playable rectangle, centered at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_SIZE[0],
            height: DEFAULT_WORLD_SIZE[1],
        }
    }
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The rectangle `[-w/2, w/2] x [-h/2, h/2]`
    pub fn rect(&self) -> Rect {
        Rect::new([0.0, 0.0], [self.width, self.height])
    }

    pub fn contains_point(&self, point: [f32; 2]) -> bool {
        self.rect().contains_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_placeable() {
        let room = Placeable::new(Variant::Room, "Kitchen", "Wood", [1.0, 2.0], [4.0, 4.0])
            .with_layer(8);

        assert_eq!(room.name, "Kitchen");
        assert_eq!(room.z, 0.0);
        assert_eq!(room.layer, 8);
        assert!(room.parent.is_none());
        assert_eq!(room.rect().left(), -1.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Placeable::new(Variant::Border, "Wall", "Wall", [0.0, 0.0], [1.0, 1.0]);
        let b = Placeable::new(Variant::Border, "Wall", "Wall", [0.0, 0.0], [1.0, 1.0]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_world_bounds_centered() {
        let world = WorldBounds::default();
        assert_eq!(world.rect().left(), -20.0);
        assert_eq!(world.rect().top(), 20.0);
        assert!(world.contains_point([19.5, -19.5]));
        assert!(!world.contains_point([21.0, 0.0]));
    }
}
