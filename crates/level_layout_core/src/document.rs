//! Level document: the flat, serializable form of a placement store
//!
//! ```json
//! {"dataList":[{"type":0,"prefabName":"Wood","x":0.0,"y":0.0,"z":0.0,"name":"Kitchen",
//!   "spriteWidth":4.0,"spriteHeight":4.0,"layer":8,"parentName":""}],
//!  "worldSettings":{"width":40.0,"height":40.0}}
//! ```
//!
//! Records are grouped by variant in the fixed order room, furniture,
//! border, and keep store insertion order within a group. Hierarchy is
//! written as parent paths so it survives without identity references.

use crate::rules::rules_for;
use crate::{
    Catalog, Placeable, PlaceableId, PlacementError, PlacementStore, Variant, WorldBounds,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Saved world size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        let world = WorldBounds::default();
        Self {
            width: world.width,
            height: world.height,
        }
    }
}

impl From<WorldBounds> for WorldSettings {
    fn from(world: WorldBounds) -> Self {
        Self {
            width: world.width,
            height: world.height,
        }
    }
}

/// One placeable, flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataListItem {
    #[serde(rename = "type")]
    pub variant: Variant,
    pub prefab_name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    pub name: String,
    pub sprite_width: f32,
    pub sprite_height: f32,
    #[serde(default)]
    pub layer: i32,
    #[serde(default)]
    pub parent_name: String,
}

impl DataListItem {
    pub fn from_placeable(placeable: &Placeable, parent_path: String) -> Self {
        Self {
            variant: placeable.variant,
            prefab_name: placeable.template.clone(),
            x: placeable.position[0],
            y: placeable.position[1],
            z: placeable.z,
            name: placeable.name.clone(),
            sprite_width: placeable.footprint[0],
            sprite_height: placeable.footprint[1],
            layer: placeable.layer,
            parent_name: parent_path,
        }
    }

    /// A fresh, unparented placeable carrying this record's values
    fn to_placeable(&self) -> Placeable {
        let mut placeable = Placeable::new(
            self.variant,
            self.name.clone(),
            self.prefab_name.clone(),
            [self.x, self.y],
            [self.sprite_width, self.sprite_height],
        )
        .with_layer(self.layer);
        placeable.z = self.z;
        placeable
    }
}

/// A record that was left out while loading
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub variant: Variant,
    pub name: String,
    pub reason: PlacementError,
}

/// What happened while turning a document back into a store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Number of placeables inserted
    pub loaded: usize,
    /// Records dropped because of an unknown template or an invalid name
    pub skipped: Vec<SkippedRecord>,
    /// Furniture whose parent path did not name a room; kept at the root
    pub unresolved_parents: Vec<(String, String)>,
}

impl LoadReport {
    /// Every record was loaded and every parent link restored
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.unresolved_parents.is_empty()
    }
}

/// Serializable level: world settings plus the record list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    #[serde(default)]
    pub data_list: Vec<DataListItem>,
    #[serde(default)]
    pub world_settings: WorldSettings,
}

impl LevelDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a store into a document
    pub fn collect(store: &PlacementStore) -> Self {
        let mut data_list = Vec::with_capacity(store.len());
        for variant in Variant::ALL {
            let rules = rules_for(variant);
            data_list.extend(store.iter_variant(variant).map(|p| rules.record(store, p)));
        }
        Self {
            data_list,
            world_settings: store.world().into(),
        }
    }

    /// Build a fresh store from this document.
    ///
    /// Records with an unknown template or a clashing name are skipped.
    /// Parent paths are resolved in a second pass, after every record has
    /// been inserted, so the order of records within the file does not
    /// matter.
    pub fn load_world(&self, catalog: &Catalog) -> (PlacementStore, LoadReport) {
        let mut store = PlacementStore::new(self.world_bounds());
        let mut report = LoadReport::default();
        let mut pending_parents: Vec<(PlaceableId, &str)> = Vec::new();

        for variant in Variant::ALL {
            for item in self.data_list.iter().filter(|i| i.variant == variant) {
                match store.insert(catalog, item.to_placeable()) {
                    Ok(id) => {
                        report.loaded += 1;
                        if !item.parent_name.is_empty() {
                            pending_parents.push((id, item.parent_name.as_str()));
                        }
                    }
                    Err(reason) => {
                        warn!("Skipping {} '{}': {}", variant.noun(), item.name, reason);
                        report.skipped.push(SkippedRecord {
                            variant,
                            name: item.name.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        for (id, path) in pending_parents {
            let Some(child) = store.get(id) else {
                continue;
            };
            if child.variant != Variant::Furniture {
                debug!("Ignoring parent path '{}' of {} '{}'", path, child.variant.noun(), child.name);
                continue;
            }
            let child_name = child.name.clone();
            match store.resolve_path(Variant::Room, path).map(|room| room.id) {
                Some(room) => {
                    if let Err(e) = store.attach(id, room) {
                        warn!("Failed to attach '{}' to '{}': {}", child_name, path, e);
                    }
                }
                None => {
                    warn!(
                        "Parent '{}' of furniture '{}' not found, keeping it at the root",
                        path, child_name
                    );
                    report.unresolved_parents.push((child_name, path.to_string()));
                }
            }
        }

        (store, report)
    }

    /// World bounds from the settings, falling back to the default for
    /// non-positive or non-finite sizes
    pub fn world_bounds(&self) -> WorldBounds {
        let WorldSettings { width, height } = self.world_settings;
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            WorldBounds::new(width, height)
        } else {
            warn!(
                "Invalid world size {} x {}, using the default",
                width, height
            );
            WorldBounds::default()
        }
    }

    /// Single-line JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Serialize a store to single-line JSON
pub fn encode(store: &PlacementStore) -> Result<String, serde_json::Error> {
    LevelDocument::collect(store).to_json()
}

/// Parse JSON and rebuild a store. Fails as a whole on malformed JSON.
pub fn decode(json: &str, catalog: &Catalog) -> Result<(PlacementStore, LoadReport), serde_json::Error> {
    Ok(LevelDocument::from_json(json)?.load_world(catalog))
}
