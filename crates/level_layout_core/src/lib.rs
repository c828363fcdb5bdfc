//! Core data structures for level_layout
//!
//! This crate provides the editor-independent parts of the level layout tool:
//! - `Catalog` - Read-only registry of room, furniture and border templates
//! - `Placeable` - A placed object with name, template, position and footprint
//! - `PlacementStore` - The authoritative set of placed objects plus world bounds
//! - `Validator` - Overlap and containment checks for prospective placements
//! - `PlacementRules` - Per-variant validation, snapping and serialization
//! - `LevelDocument` - The flat JSON form of a store, with parent paths

mod catalog;
mod document;
mod error;
mod geometry;
mod intent;
mod placeable;
mod rules;
mod store;
mod validate;
mod variant;

pub use catalog::{load_catalog, parse_catalog, Catalog, CatalogError, Template};
pub use document::{
    decode, encode, DataListItem, LevelDocument, LoadReport, SkippedRecord, WorldSettings,
};
pub use error::PlacementError;
pub use geometry::{snap_to_half_unit, Rect};
pub use intent::{IntentOp, PlacementIntent, PlacementSink};
pub use placeable::{Placeable, PlaceableId, WorldBounds, DEFAULT_WORLD_SIZE};
pub use rules::{rules_for, BorderRules, FurnitureRules, PlacementRules, RoomRules};
pub use store::{PlacementStore, PATH_SEPARATOR};
pub use validate::{is_contained, Candidate, Validator, DEFAULT_OVERLAP_MARGIN};
pub use variant::Variant;
