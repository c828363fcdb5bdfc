//! Authoritative set of placed rooms, furniture and borders
//!
//! Placeables are kept in insertion order, which is also the order they are
//! written to level files within each variant group.

use crate::{Catalog, Placeable, PlaceableId, PlacementError, Variant, WorldBounds};
use serde::{Deserialize, Serialize};

/// Separator between names in a parent path
pub const PATH_SEPARATOR: char = '/';

/// In-memory level: world bounds plus every placed object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementStore {
    world: WorldBounds,
    placeables: Vec<Placeable>,
}

impl PlacementStore {
    pub fn new(world: WorldBounds) -> Self {
        Self {
            world,
            placeables: Vec::new(),
        }
    }

    pub fn world(&self) -> WorldBounds {
        self.world
    }

    pub fn set_world(&mut self, world: WorldBounds) {
        self.world = world;
    }

    pub fn len(&self) -> usize {
        self.placeables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeables.is_empty()
    }

    /// All placeables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Placeable> {
        self.placeables.iter()
    }

    /// Placeables of one variant in insertion order
    pub fn iter_variant(&self, variant: Variant) -> impl Iterator<Item = &Placeable> {
        self.placeables.iter().filter(move |p| p.variant == variant)
    }

    pub fn get(&self, id: PlaceableId) -> Option<&Placeable> {
        self.placeables.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PlaceableId) -> Result<&mut Placeable, PlacementError> {
        self.placeables
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PlacementError::UnknownPlaceable(id))
    }

    /// Find a placeable by name within a variant
    pub fn find_by_name(&self, variant: Variant, name: &str) -> Option<&Placeable> {
        self.iter_variant(variant).find(|p| p.name == name)
    }

    /// Whether `name` is used by another placeable of the same variant
    pub fn is_name_taken(&self, variant: Variant, name: &str, excluding: Option<PlaceableId>) -> bool {
        self.iter_variant(variant)
            .any(|p| p.name == name && Some(p.id) != excluding)
    }

    /// Furniture placed in the given room
    pub fn children_of(&self, room: PlaceableId) -> impl Iterator<Item = &Placeable> {
        self.placeables
            .iter()
            .filter(move |p| p.parent == Some(room))
    }

    pub fn has_children(&self, room: PlaceableId) -> bool {
        self.children_of(room).next().is_some()
    }

    /// Insert a new placeable.
    ///
    /// Fails without touching the store when the name is empty, the
    /// footprint is not a positive finite size, the name is already used
    /// within the variant, the template is unknown to the catalog, or the
    /// parent is missing or not a room.
    pub fn insert(
        &mut self,
        catalog: &Catalog,
        placeable: Placeable,
    ) -> Result<PlaceableId, PlacementError> {
        if placeable.name.is_empty() {
            return Err(PlacementError::EmptyName(placeable.variant));
        }
        let [width, height] = placeable.footprint;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(PlacementError::InvalidFootprint {
                variant: placeable.variant,
                name: placeable.name,
                width,
                height,
            });
        }
        if self.is_name_taken(placeable.variant, &placeable.name, None) {
            return Err(PlacementError::DuplicateName {
                variant: placeable.variant,
                name: placeable.name,
            });
        }
        if !catalog.contains(placeable.variant, &placeable.template) {
            return Err(PlacementError::TemplateNotFound {
                variant: placeable.variant,
                key: placeable.template,
            });
        }
        if let Some(parent_id) = placeable.parent {
            if placeable.variant != Variant::Furniture {
                return Err(PlacementError::InvalidParent {
                    name: placeable.name,
                });
            }
            let parent = self.get(parent_id).ok_or(PlacementError::ParentNotFound)?;
            if parent.variant != Variant::Room {
                return Err(PlacementError::InvalidParent {
                    name: parent.name.clone(),
                });
            }
        }

        let id = placeable.id;
        self.placeables.push(placeable);
        Ok(id)
    }

    /// Rename a placeable, keeping names unique within its variant
    pub fn rename(&mut self, id: PlaceableId, name: &str) -> Result<(), PlacementError> {
        let variant = self.get(id).ok_or(PlacementError::UnknownPlaceable(id))?.variant;
        if name.is_empty() {
            return Err(PlacementError::EmptyName(variant));
        }
        if self.is_name_taken(variant, name, Some(id)) {
            return Err(PlacementError::DuplicateName {
                variant,
                name: name.to_string(),
            });
        }
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Move a placeable, returning its previous position.
    /// Children stay put; see [`Self::translate_children`].
    pub fn move_to(&mut self, id: PlaceableId, position: [f32; 2]) -> Result<[f32; 2], PlacementError> {
        let placeable = self.get_mut(id)?;
        Ok(std::mem::replace(&mut placeable.position, position))
    }

    /// Shift every child of `parent` by `offset`, returning the ids moved
    pub fn translate_children(&mut self, parent: PlaceableId, offset: [f32; 2]) -> Vec<PlaceableId> {
        let mut moved = Vec::new();
        for child in self.placeables.iter_mut().filter(|p| p.parent == Some(parent)) {
            child.position[0] += offset[0];
            child.position[1] += offset[1];
            moved.push(child.id);
        }
        moved
    }

    /// Resize a placeable, returning its previous footprint
    pub fn resize(&mut self, id: PlaceableId, footprint: [f32; 2]) -> Result<[f32; 2], PlacementError> {
        let placeable = self.get_mut(id)?;
        Ok(std::mem::replace(&mut placeable.footprint, footprint))
    }

    /// Remove a placeable. Removing a room also removes its furniture.
    ///
    /// Returns every removed placeable, the requested one first.
    pub fn remove(&mut self, id: PlaceableId) -> Result<Vec<Placeable>, PlacementError> {
        let idx = self
            .placeables
            .iter()
            .position(|p| p.id == id)
            .ok_or(PlacementError::UnknownPlaceable(id))?;

        let mut removed = vec![self.placeables.remove(idx)];
        let mut i = 0;
        while i < self.placeables.len() {
            if self.placeables[i].parent == Some(id) {
                removed.push(self.placeables.remove(i));
            } else {
                i += 1;
            }
        }
        Ok(removed)
    }

    /// Remove everything, keeping the world bounds
    pub fn clear(&mut self) {
        self.placeables.clear();
    }

    /// `/`-joined names of the placeable's ancestors, nearest last.
    /// Empty when the placeable sits at the document root.
    pub fn parent_path(&self, id: PlaceableId) -> String {
        let mut names = Vec::new();
        let mut current = self.get(id).and_then(|p| p.parent);
        while let Some(parent_id) = current {
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            names.push(parent.name.as_str());
            current = parent.parent;
            if names.len() > self.placeables.len() {
                break;
            }
        }
        names.reverse();
        names.join(&PATH_SEPARATOR.to_string())
    }

    /// `/`-joined names of the placeable's ancestors followed by its own name
    pub fn full_path(&self, id: PlaceableId) -> Option<String> {
        let placeable = self.get(id)?;
        let parent = self.parent_path(id);
        if parent.is_empty() {
            Some(placeable.name.clone())
        } else {
            Some(format!("{}{}{}", parent, PATH_SEPARATOR, placeable.name))
        }
    }

    /// Find the placeable of `variant` whose full path is exactly `path`.
    /// Names may contain the separator themselves, so the path is matched
    /// as a whole rather than split.
    pub fn resolve_path(&self, variant: Variant, path: &str) -> Option<&Placeable> {
        if path.is_empty() {
            return None;
        }
        self.iter_variant(variant)
            .find(|p| self.full_path(p.id).as_deref() == Some(path))
    }

    /// Top-most placeable under a world point. Furniture wins over borders,
    /// borders over rooms; within a variant the latest placed wins.
    pub fn hit_test(&self, point: [f32; 2]) -> Option<&Placeable> {
        [Variant::Furniture, Variant::Border, Variant::Room]
            .into_iter()
            .find_map(|variant| {
                self.iter_variant(variant)
                    .filter(|p| p.rect().contains_point(point))
                    .last()
            })
    }

    /// Set a placeable's parent link without validation. Used by the codec's
    /// second pass once the parent is known to exist.
    pub(crate) fn attach(&mut self, child: PlaceableId, parent: PlaceableId) -> Result<(), PlacementError> {
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Template;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_template(Variant::Room, Template::new("Wood", 4.0, 4.0))
            .with_template(Variant::Furniture, Template::new("Table", 1.0, 1.0))
            .with_template(Variant::Border, Template::new("Wall", 1.0, 1.0))
    }

    fn room(name: &str, position: [f32; 2]) -> Placeable {
        Placeable::new(Variant::Room, name, "Wood", position, [4.0, 4.0])
    }

    fn table(name: &str, position: [f32; 2]) -> Placeable {
        Placeable::new(Variant::Furniture, name, "Table", position, [1.0, 1.0])
    }

    #[test]
    fn test_name_unique_per_variant() {
        let catalog = catalog();
        let mut store = PlacementStore::default();

        store.insert(&catalog, room("Hall", [0.0, 0.0])).unwrap();
        let second = store.insert(&catalog, room("Hall", [10.0, 0.0]));
        assert_eq!(
            second,
            Err(PlacementError::DuplicateName {
                variant: Variant::Room,
                name: "Hall".to_string()
            })
        );

        // A border may share the room's name
        let wall = Placeable::new(Variant::Border, "Hall", "Wall", [0.0, 0.0], [1.0, 1.0]);
        assert!(store.insert(&catalog, wall).is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_unknown_template_is_noop() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let sofa = Placeable::new(Variant::Furniture, "Sofa", "Sofa", [0.0, 0.0], [2.0, 1.0]);

        assert!(matches!(
            store.insert(&catalog, sofa),
            Err(PlacementError::TemplateNotFound { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_rejects_degenerate_footprint() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        for footprint in [[0.0, 4.0], [-4.0, -4.0], [f32::NAN, 1.0], [f32::INFINITY, 1.0]] {
            let ghost = Placeable::new(Variant::Room, "Ghost", "Wood", [0.0, 0.0], footprint);
            assert!(matches!(
                store.insert(&catalog, ghost),
                Err(PlacementError::InvalidFootprint { .. })
            ));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_rejects_bad_parents() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let wall = Placeable::new(Variant::Border, "Wall", "Wall", [0.0, 0.0], [1.0, 1.0]);
        let wall_id = store.insert(&catalog, wall).unwrap();

        let orphan = table("Table", [0.0, 0.0]).with_parent(uuid::Uuid::new_v4());
        assert_eq!(store.insert(&catalog, orphan), Err(PlacementError::ParentNotFound));

        let on_wall = table("Table", [0.0, 0.0]).with_parent(wall_id);
        assert!(matches!(
            store.insert(&catalog, on_wall),
            Err(PlacementError::InvalidParent { .. })
        ));
    }

    #[test]
    fn test_rename_move_resize() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let hall = store.insert(&catalog, room("Hall", [0.0, 0.0])).unwrap();
        store.insert(&catalog, room("Kitchen", [10.0, 0.0])).unwrap();

        assert!(store.rename(hall, "Kitchen").is_err());
        assert!(store.rename(hall, "").is_err());
        store.rename(hall, "Hall").unwrap();
        store.rename(hall, "Lobby").unwrap();
        assert!(store.find_by_name(Variant::Room, "Lobby").is_some());

        assert_eq!(store.move_to(hall, [1.0, 1.0]).unwrap(), [0.0, 0.0]);
        assert_eq!(store.resize(hall, [2.0, 3.0]).unwrap(), [4.0, 4.0]);
        let lobby = store.get(hall).unwrap();
        assert_eq!(lobby.position, [1.0, 1.0]);
        assert_eq!(lobby.footprint, [2.0, 3.0]);
    }

    #[test]
    fn test_translate_children() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let kitchen = store.insert(&catalog, room("Kitchen", [0.0, 0.0])).unwrap();
        let table_id = store
            .insert(&catalog, table("Table", [1.0, -1.0]).with_parent(kitchen))
            .unwrap();
        store.insert(&catalog, table("Crate", [9.0, 9.0])).unwrap();

        assert_eq!(store.translate_children(kitchen, [2.0, 0.5]), vec![table_id]);
        assert_eq!(store.get(table_id).unwrap().position, [3.0, -0.5]);
        assert_eq!(
            store.find_by_name(Variant::Furniture, "Crate").unwrap().position,
            [9.0, 9.0]
        );
    }

    #[test]
    fn test_remove_room_cascades() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let kitchen = store.insert(&catalog, room("Kitchen", [0.0, 0.0])).unwrap();
        store
            .insert(&catalog, table("Table", [0.0, 0.0]).with_parent(kitchen))
            .unwrap();
        store
            .insert(&catalog, table("Chair", [1.0, 1.0]).with_parent(kitchen))
            .unwrap();
        store.insert(&catalog, table("Crate", [9.0, 9.0])).unwrap();

        let removed = store.remove(kitchen).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(removed[0].name, "Kitchen");
        assert_eq!(store.len(), 1);
        assert!(store.find_by_name(Variant::Furniture, "Crate").is_some());
        assert!(store.remove(kitchen).is_err());
    }

    #[test]
    fn test_parent_path_and_resolve() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let kitchen = store.insert(&catalog, room("Kitchen", [0.0, 0.0])).unwrap();
        let table_id = store
            .insert(&catalog, table("Table", [0.0, 0.0]).with_parent(kitchen))
            .unwrap();

        assert_eq!(store.parent_path(kitchen), "");
        assert_eq!(store.parent_path(table_id), "Kitchen");
        assert_eq!(store.resolve_path(Variant::Room, "Kitchen").unwrap().id, kitchen);
        assert_eq!(
            store.resolve_path(Variant::Furniture, "Kitchen/Table").unwrap().id,
            table_id
        );
        assert!(store.resolve_path(Variant::Room, "Floor0/Kitchen").is_none());
        assert!(store.resolve_path(Variant::Room, "").is_none());
    }

    #[test]
    fn test_resolve_path_with_separator_in_name() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let north = store.insert(&catalog, room("Kitchen/North", [0.0, 0.0])).unwrap();
        let table_id = store
            .insert(&catalog, table("Table", [0.0, 0.0]).with_parent(north))
            .unwrap();

        assert_eq!(store.full_path(table_id).as_deref(), Some("Kitchen/North/Table"));
        assert_eq!(store.resolve_path(Variant::Room, "Kitchen/North").unwrap().id, north);
        assert_eq!(
            store.resolve_path(Variant::Furniture, "Kitchen/North/Table").unwrap().id,
            table_id
        );
        assert!(store.resolve_path(Variant::Room, "North").is_none());
    }

    #[test]
    fn test_hit_test_prefers_furniture() {
        let catalog = catalog();
        let mut store = PlacementStore::default();
        let kitchen = store.insert(&catalog, room("Kitchen", [0.0, 0.0])).unwrap();
        store
            .insert(&catalog, table("Table", [1.0, 1.0]).with_parent(kitchen))
            .unwrap();

        assert_eq!(store.hit_test([1.2, 1.2]).unwrap().name, "Table");
        assert_eq!(store.hit_test([-1.0, -1.0]).unwrap().name, "Kitchen");
        assert!(store.hit_test([15.0, 15.0]).is_none());
    }
}
