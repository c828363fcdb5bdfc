//! Placement intents for the scene layer
//!
//! The core never creates or destroys visual objects. Every committed
//! mutation is described as a [`PlacementIntent`] and handed to a
//! [`PlacementSink`], which owns the actual scene objects.

use crate::{Placeable, PlacementStore, Variant};
use serde::{Deserialize, Serialize};

/// Kind of store mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentOp {
    Insert,
    Delete,
    Move,
    Resize,
    Rename,
}

/// A committed mutation, described by value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementIntent {
    pub op: IntentOp,
    pub variant: Variant,
    pub name: String,
    pub position: [f32; 2],
    pub footprint: [f32; 2],
    pub parent_path: String,
}

impl PlacementIntent {
    /// Describe `placeable` as currently stored
    pub fn new(op: IntentOp, placeable: &Placeable, parent_path: String) -> Self {
        Self {
            op,
            variant: placeable.variant,
            name: placeable.name.clone(),
            position: placeable.position,
            footprint: placeable.footprint,
            parent_path,
        }
    }

    /// Describe a placeable that is still in `store`
    pub fn from_store(op: IntentOp, store: &PlacementStore, placeable: &Placeable) -> Self {
        Self::new(op, placeable, store.parent_path(placeable.id))
    }
}

/// Receiver of placement intents
pub trait PlacementSink {
    fn apply(&mut self, intent: &PlacementIntent);
}

impl PlacementSink for Vec<PlacementIntent> {
    fn apply(&mut self, intent: &PlacementIntent) {
        self.push(intent.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects() {
        let table = Placeable::new(Variant::Furniture, "Table", "Table", [1.0, 1.0], [1.0, 1.0]);
        let mut sink: Vec<PlacementIntent> = Vec::new();
        sink.apply(&PlacementIntent::new(IntentOp::Insert, &table, "Kitchen".to_string()));

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].op, IntentOp::Insert);
        assert_eq!(sink[0].parent_path, "Kitchen");
    }
}
