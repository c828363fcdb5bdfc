//! Editor session: the mode state machine and its blueprint cursor
//!
//! An [`EditorSession`] owns the catalog, the placement store and the one
//! blueprint. User intents arrive as method calls; the session checks that
//! they are legal in the current [`EditorMode`], asks the [`Validator`]
//! whether the blueprint is acceptable and only then commits to the store.
//! Every committed change is queued as a [`PlacementIntent`] for the scene
//! layer to pick up.

mod blueprint;
mod mode;

pub use blueprint::{BlueprintCursor, Direction};
pub use mode::EditorMode;

use level_layout_core::{
    rules_for, Candidate, Catalog, IntentOp, LevelDocument, LoadReport, Placeable, PlaceableId,
    PlacementError, PlacementIntent, PlacementSink, PlacementStore, Template, Validator, Variant,
    WorldBounds, DEFAULT_OVERLAP_MARGIN,
};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, info};

/// Why an editor operation was declined. The session is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("Can not switch from {from} to {to}")]
    InvalidTransition { from: EditorMode, to: EditorMode },
    #[error("No {} selected", .0.noun())]
    NothingSelected(Variant),
    #[error("{operation} is not available in {mode}")]
    WrongMode {
        operation: &'static str,
        mode: EditorMode,
    },
    #[error("No {} templates in the catalog", .0.noun())]
    NoTemplates(Variant),
    #[error("No {} named '{name}'", .variant.noun())]
    NotFound { variant: Variant, name: String },
}

/// Parse a number typed into a text field. Anything that is not a finite
/// number is ignored by the caller.
pub fn parse_lenient(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_dimension(text: &str) -> Option<f32> {
    parse_lenient(text).filter(|v| *v > 0.0)
}

/// One editing session over one level
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct EditorSession {
    catalog: Catalog,
    store: PlacementStore,
    mode: EditorMode,
    blueprint: BlueprintCursor,
    /// Room being edited or furnished
    selected_room: Option<PlaceableId>,
    /// Furniture or border last selected
    selected_item: Option<PlaceableId>,
    /// Contents of the name field
    name: String,
    /// Template chosen per variant
    templates: BTreeMap<Variant, String>,
    margin: f32,
    intents: Vec<PlacementIntent>,
}

impl EditorSession {
    pub fn new(catalog: Catalog) -> Self {
        let mut session = Self {
            catalog,
            store: PlacementStore::default(),
            mode: EditorMode::ViewMode,
            blueprint: BlueprintCursor::default(),
            selected_room: None,
            selected_item: None,
            name: String::new(),
            templates: BTreeMap::new(),
            margin: DEFAULT_OVERLAP_MARGIN,
            intents: Vec::new(),
        };
        for variant in Variant::ALL {
            session.reset_template(variant);
        }
        session
    }

    pub fn with_world(mut self, world: WorldBounds) -> Self {
        self.store.set_world(world);
        self
    }

    /// Overlap tolerance used for every check of this session
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn blueprint(&self) -> &BlueprintCursor {
        &self.blueprint
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn selected_room(&self) -> Option<&Placeable> {
        self.selected_room.and_then(|id| self.store.get(id))
    }

    pub fn selected_item(&self) -> Option<&Placeable> {
        self.selected_item.and_then(|id| self.store.get(id))
    }

    pub fn selected_template(&self, variant: Variant) -> Option<&str> {
        self.templates.get(&variant).map(String::as_str)
    }

    /// Validator over the current store with this session's margin
    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.store).with_margin(self.margin)
    }

    /// Intents queued since the last drain
    pub fn pending_intents(&self) -> &[PlacementIntent] {
        &self.intents
    }

    pub fn take_intents(&mut self) -> Vec<PlacementIntent> {
        std::mem::take(&mut self.intents)
    }

    /// Hand every queued intent to `sink`, oldest first
    pub fn flush_intents(&mut self, sink: &mut impl PlacementSink) {
        for intent in self.intents.drain(..) {
            sink.apply(&intent);
        }
    }

    // Mode transitions

    /// Follow an edge of the mode graph, re-initializing the blueprint for
    /// the target mode. Edit modes re-open the current selection.
    pub fn switch_mode(&mut self, target: EditorMode) -> Result<(), EditorError> {
        if !self.mode.can_switch_to(target) {
            return Err(EditorError::InvalidTransition {
                from: self.mode,
                to: target,
            });
        }
        match target {
            EditorMode::ViewMode => self.enter_view_mode(),
            EditorMode::CreateRoom => self.prepare_create_room(self.blueprint.position),
            EditorMode::EditRoom => {
                let room = self
                    .selected_room
                    .ok_or(EditorError::NothingSelected(Variant::Room))?;
                self.enter_edit(room)?;
            }
            EditorMode::CreateFurniture => self.prepare_create_furniture()?,
            EditorMode::EditFurniture => {
                let item = self.selected_item_of(Variant::Furniture)?;
                self.enter_edit(item)?;
            }
            EditorMode::CreateBorder => self.prepare_create_border([0.0, 0.0])?,
            EditorMode::EditBorder => {
                let item = self.selected_item_of(Variant::Border)?;
                self.enter_edit(item)?;
            }
        }
        Ok(())
    }

    /// Drop the blueprint and every selection
    pub fn enter_view_mode(&mut self) {
        self.mode = EditorMode::ViewMode;
        self.blueprint = BlueprintCursor::default();
        self.selected_room = None;
        self.selected_item = None;
        self.name.clear();
    }

    /// Secondary click on the canvas: selects what is under the pointer,
    /// or starts a new room there. While placing a border it moves the
    /// border blueprint instead.
    pub fn click_at(&mut self, point: [f32; 2]) -> Result<(), EditorError> {
        if self.mode == EditorMode::CreateBorder {
            return self.set_blueprint_position(point);
        }
        match self.store.hit_test(point).map(|p| p.id) {
            Some(id) => self.enter_edit(id),
            None => {
                self.prepare_create_room(point);
                Ok(())
            }
        }
    }

    pub fn select_room(&mut self, name: &str) -> Result<(), EditorError> {
        self.select(Variant::Room, name)
    }

    pub fn select_furniture(&mut self, name: &str) -> Result<(), EditorError> {
        self.select(Variant::Furniture, name)
    }

    pub fn select_border(&mut self, name: &str) -> Result<(), EditorError> {
        self.select(Variant::Border, name)
    }

    /// Open the edit mode of the placeable called `name`
    pub fn select(&mut self, variant: Variant, name: &str) -> Result<(), EditorError> {
        let id = self
            .store
            .find_by_name(variant, name)
            .map(|p| p.id)
            .ok_or_else(|| EditorError::NotFound {
                variant,
                name: name.to_string(),
            })?;
        self.enter_edit(id)
    }

    /// Leave a furniture mode for the room that holds it
    pub fn back_to_room(&mut self) -> Result<(), EditorError> {
        if !matches!(
            self.mode,
            EditorMode::CreateFurniture | EditorMode::EditFurniture
        ) {
            return Err(EditorError::WrongMode {
                operation: "Back to room",
                mode: self.mode,
            });
        }
        let room = self
            .selected_room
            .ok_or(EditorError::NothingSelected(Variant::Room))?;
        self.enter_edit(room)
    }

    fn selected_item_of(&self, variant: Variant) -> Result<PlaceableId, EditorError> {
        self.selected_item
            .filter(|id| self.store.get(*id).is_some_and(|p| p.variant == variant))
            .ok_or(EditorError::NothingSelected(variant))
    }

    fn prepare_create_room(&mut self, point: [f32; 2]) {
        self.mode = EditorMode::CreateRoom;
        self.blueprint = BlueprintCursor::new(
            Variant::Room,
            [point[0].round(), point[1].round()],
            [1.0, 1.0],
        );
        self.selected_room = None;
        self.selected_item = None;
        self.name.clear();
        self.reset_template(Variant::Room);
        debug!("Preparing room at {:?}", self.blueprint.position);
    }

    /// Furniture blueprints start in the bottom-left corner of the room
    fn prepare_create_furniture(&mut self) -> Result<(), EditorError> {
        let room_id = self
            .selected_room
            .ok_or(EditorError::NothingSelected(Variant::Room))?;
        let room = self
            .store
            .get(room_id)
            .ok_or(PlacementError::UnknownPlaceable(room_id))?
            .rect();
        let [width, height] = self.template_for(Variant::Furniture)?.footprint();

        self.mode = EditorMode::CreateFurniture;
        self.blueprint = BlueprintCursor::new(
            Variant::Furniture,
            [room.left() + width / 2.0, room.bottom() + height / 2.0],
            [width, height],
        );
        self.name.clear();
        Ok(())
    }

    fn prepare_create_border(&mut self, position: [f32; 2]) -> Result<(), EditorError> {
        let footprint = self.template_for(Variant::Border)?.footprint();

        self.mode = EditorMode::CreateBorder;
        self.blueprint = BlueprintCursor::new(Variant::Border, position, footprint);
        self.selected_room = None;
        self.name.clear();
        Ok(())
    }

    fn enter_edit(&mut self, id: PlaceableId) -> Result<(), EditorError> {
        let placeable = self
            .store
            .get(id)
            .ok_or(PlacementError::UnknownPlaceable(id))?
            .clone();

        match placeable.variant {
            Variant::Room => {
                self.selected_room = Some(id);
                self.selected_item = None;
            }
            Variant::Furniture => {
                self.selected_room = placeable.parent;
                self.selected_item = Some(id);
            }
            Variant::Border => {
                self.selected_room = None;
                self.selected_item = Some(id);
            }
        }
        self.mode = EditorMode::edit(placeable.variant);
        self.blueprint = BlueprintCursor::over(&placeable);
        self.templates
            .insert(placeable.variant, placeable.template.clone());
        debug!("Selected {} '{}'", placeable.variant.noun(), placeable.name);
        self.name = placeable.name;
        Ok(())
    }

    // Text fields

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Choose the template used for the next placeable of `variant`.
    /// Furniture and border blueprints take the new template's footprint.
    pub fn set_template(&mut self, variant: Variant, key: &str) -> Result<(), EditorError> {
        let footprint = self
            .catalog
            .get(variant, key)
            .map(Template::footprint)
            .ok_or_else(|| PlacementError::TemplateNotFound {
                variant,
                key: key.to_string(),
            })?;
        self.templates.insert(variant, key.to_string());

        match (self.mode, variant) {
            (EditorMode::CreateFurniture, Variant::Furniture) => self.prepare_create_furniture()?,
            (EditorMode::CreateBorder, Variant::Border) => self.blueprint.footprint = footprint,
            _ => {}
        }
        Ok(())
    }

    fn reset_template(&mut self, variant: Variant) {
        match self.catalog.first(variant) {
            Some(template) => {
                self.templates.insert(variant, template.key.clone());
            }
            None => {
                self.templates.remove(&variant);
            }
        }
    }

    fn template_for(&self, variant: Variant) -> Result<&Template, EditorError> {
        let key = self
            .templates
            .get(&variant)
            .ok_or(EditorError::NoTemplates(variant))?;
        self.catalog.get(variant, key).ok_or_else(|| {
            EditorError::from(PlacementError::TemplateNotFound {
                variant,
                key: key.clone(),
            })
        })
    }

    pub fn set_world_width(&mut self, text: &str) {
        if let Some(width) = parse_dimension(text) {
            let world = self.store.world();
            self.set_world_size(width, world.height);
        } else {
            debug!("Ignoring world width '{}'", text);
        }
    }

    pub fn set_world_height(&mut self, text: &str) {
        if let Some(height) = parse_dimension(text) {
            let world = self.store.world();
            self.set_world_size(world.width, height);
        } else {
            debug!("Ignoring world height '{}'", text);
        }
    }

    /// Set the world size. Non-positive sizes are ignored.
    pub fn set_world_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.store.set_world(WorldBounds::new(width, height));
            info!("World size set to {} x {}", width, height);
        }
    }

    // Blueprint

    pub fn set_blueprint_width(&mut self, text: &str) -> Result<(), EditorError> {
        self.require_resizable("Set blueprint width")?;
        if let Some(width) = parse_dimension(text) {
            self.blueprint.footprint[0] = width;
        }
        Ok(())
    }

    pub fn set_blueprint_height(&mut self, text: &str) -> Result<(), EditorError> {
        self.require_resizable("Set blueprint height")?;
        if let Some(height) = parse_dimension(text) {
            self.blueprint.footprint[1] = height;
        }
        Ok(())
    }

    /// Set both blueprint dimensions. Furniture keeps its template size.
    pub fn resize_blueprint(&mut self, footprint: [f32; 2]) -> Result<(), EditorError> {
        self.require_resizable("Resize blueprint")?;
        if footprint.iter().all(|v| *v > 0.0 && v.is_finite()) {
            self.blueprint.footprint = footprint;
        }
        Ok(())
    }

    pub fn set_blueprint_x(&mut self, text: &str) -> Result<(), EditorError> {
        match parse_lenient(text) {
            Some(x) => self.move_blueprint_by([x - self.blueprint.position[0], 0.0]),
            None => Ok(()),
        }
    }

    pub fn set_blueprint_y(&mut self, text: &str) -> Result<(), EditorError> {
        match parse_lenient(text) {
            Some(y) => self.move_blueprint_by([0.0, y - self.blueprint.position[1]]),
            None => Ok(()),
        }
    }

    /// Put the blueprint down at `position`, snapped per variant
    pub fn set_blueprint_position(&mut self, position: [f32; 2]) -> Result<(), EditorError> {
        let variant = self.blueprint_variant("Set blueprint position")?;
        let target = rules_for(variant).snap(position);
        self.move_blueprint_by(self.blueprint.offset_to(target))
    }

    pub fn move_blueprint(&mut self, direction: Direction, magnitude: f32) -> Result<(), EditorError> {
        self.move_blueprint_by(direction.offset(magnitude))
    }

    /// Nudge with a typed magnitude
    pub fn move_blueprint_text(&mut self, direction: Direction, text: &str) -> Result<(), EditorError> {
        match parse_lenient(text) {
            Some(magnitude) => self.move_blueprint(direction, magnitude),
            None => Ok(()),
        }
    }

    /// Move the blueprint by `offset` if the moved rectangle passes the
    /// spatial checks of the current variant. A rejected move leaves the
    /// blueprint where it was.
    pub fn move_blueprint_by(&mut self, offset: [f32; 2]) -> Result<(), EditorError> {
        let variant = self.blueprint_variant("Move blueprint")?;
        let candidate = self.blueprint_candidate(&self.name);
        self.validator().validate_offset(variant, &candidate, offset)?;

        self.blueprint.position[0] += offset[0];
        self.blueprint.position[1] += offset[1];
        Ok(())
    }

    fn blueprint_variant(&self, operation: &'static str) -> Result<Variant, EditorError> {
        self.blueprint.variant.ok_or(EditorError::WrongMode {
            operation,
            mode: self.mode,
        })
    }

    fn blueprint_candidate<'a>(&self, name: &'a str) -> Candidate<'a> {
        let mut candidate = Candidate::new(name, self.blueprint.rect());
        candidate.editing = self.blueprint.editing;
        if self.blueprint.variant == Some(Variant::Furniture) {
            candidate.parent = self.selected_room;
        }
        candidate
    }

    fn require_mode(&self, mode: EditorMode, operation: &'static str) -> Result<(), EditorError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(EditorError::WrongMode {
                operation,
                mode: self.mode,
            })
        }
    }

    fn require_resizable(&self, operation: &'static str) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::CreateRoom
            | EditorMode::EditRoom
            | EditorMode::CreateBorder
            | EditorMode::EditBorder => Ok(()),
            mode => Err(EditorError::WrongMode { operation, mode }),
        }
    }

    // Commits

    /// Commit the blueprint as a new placeable of the current create mode
    pub fn create(&mut self) -> Result<PlaceableId, EditorError> {
        match self.mode {
            EditorMode::CreateRoom => self.create_room(),
            EditorMode::CreateFurniture => self.create_furniture(),
            EditorMode::CreateBorder => self.create_border(),
            mode => Err(EditorError::WrongMode {
                operation: "Create",
                mode,
            }),
        }
    }

    /// Place a room and return to view mode
    pub fn create_room(&mut self) -> Result<PlaceableId, EditorError> {
        self.require_mode(EditorMode::CreateRoom, "Create room")?;
        let template = self.template_for(Variant::Room)?.clone();
        let candidate = self.blueprint_candidate(&self.name);
        self.validator().validate(Variant::Room, &candidate)?;

        let room = Placeable::new(
            Variant::Room,
            self.name.clone(),
            template.key,
            self.blueprint.position,
            self.blueprint.footprint,
        )
        .with_layer(template.layer);
        let id = self.store.insert(&self.catalog, room)?;
        self.emit(IntentOp::Insert, id);
        info!("Created room '{}'", self.name);

        self.enter_view_mode();
        Ok(id)
    }

    /// Place furniture in the selected room. Stays in create mode with a
    /// fresh blueprint so the next piece can follow.
    pub fn create_furniture(&mut self) -> Result<PlaceableId, EditorError> {
        self.require_mode(EditorMode::CreateFurniture, "Create furniture")?;
        let room = self
            .selected_room
            .ok_or(EditorError::NothingSelected(Variant::Room))?;
        let template = self.template_for(Variant::Furniture)?.clone();
        let candidate = self.blueprint_candidate(&self.name);
        self.validator().validate(Variant::Furniture, &candidate)?;

        let furniture = Placeable::new(
            Variant::Furniture,
            self.name.clone(),
            template.key,
            self.blueprint.position,
            self.blueprint.footprint,
        )
        .with_layer(template.layer)
        .with_parent(room);
        let id = self.store.insert(&self.catalog, furniture)?;
        self.emit(IntentOp::Insert, id);
        info!("Created furniture '{}'", self.name);

        self.prepare_create_furniture()?;
        Ok(id)
    }

    /// Place a border and return to view mode. An empty name field gets a
    /// generated name.
    pub fn create_border(&mut self) -> Result<PlaceableId, EditorError> {
        self.require_mode(EditorMode::CreateBorder, "Create border")?;
        let template = self.template_for(Variant::Border)?.clone();
        let name = if self.name.is_empty() {
            self.generated_border_name(&template.key)
        } else {
            self.name.clone()
        };
        let candidate = self.blueprint_candidate(&name);
        self.validator().validate(Variant::Border, &candidate)?;

        let border = Placeable::new(
            Variant::Border,
            name.clone(),
            template.key,
            self.blueprint.position,
            self.blueprint.footprint,
        )
        .with_layer(template.layer);
        let id = self.store.insert(&self.catalog, border)?;
        self.emit(IntentOp::Insert, id);
        info!("Created border '{}'", name);

        self.enter_view_mode();
        Ok(id)
    }

    /// `{template} {n}` with the first free `n`
    fn generated_border_name(&self, template: &str) -> String {
        let mut n = self.store.iter_variant(Variant::Border).count() + 1;
        loop {
            let name = format!("{} {}", template, n);
            if !self.store.is_name_taken(Variant::Border, &name, None) {
                return name;
            }
            n += 1;
        }
    }

    /// Apply the blueprint to the placeable of the current edit mode
    pub fn edit(&mut self) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::EditRoom => self.edit_room(),
            EditorMode::EditFurniture => self.edit_furniture(),
            EditorMode::EditBorder => self.edit_border(),
            mode => Err(EditorError::WrongMode {
                operation: "Edit",
                mode,
            }),
        }
    }

    /// Rename, move or resize the selected room. Its furniture moves along.
    pub fn edit_room(&mut self) -> Result<(), EditorError> {
        self.require_mode(EditorMode::EditRoom, "Edit room")?;
        self.commit_edit(Variant::Room)
    }

    pub fn edit_furniture(&mut self) -> Result<(), EditorError> {
        self.require_mode(EditorMode::EditFurniture, "Edit furniture")?;
        self.commit_edit(Variant::Furniture)
    }

    /// Move or resize the selected border. An empty name field keeps the
    /// current name.
    pub fn edit_border(&mut self) -> Result<(), EditorError> {
        self.require_mode(EditorMode::EditBorder, "Edit border")?;
        if self.name.is_empty() {
            if let Some(current) = self.selected_item().map(|b| b.name.clone()) {
                self.name = current;
            }
        }
        self.commit_edit(Variant::Border)
    }

    fn commit_edit(&mut self, variant: Variant) -> Result<(), EditorError> {
        let id = self
            .blueprint
            .editing
            .ok_or(EditorError::NothingSelected(variant))?;
        let candidate = self.blueprint_candidate(&self.name);
        self.validator().validate(variant, &candidate)?;

        let current = self
            .store
            .get(id)
            .ok_or(PlacementError::UnknownPlaceable(id))?
            .clone();
        let position = self.blueprint.position;
        let footprint = self.blueprint.footprint;

        if current.name != self.name {
            self.store.rename(id, &self.name)?;
            self.emit(IntentOp::Rename, id);
        }
        if current.position != position {
            self.store.move_to(id, position)?;
            self.emit(IntentOp::Move, id);
            let offset = [
                position[0] - current.position[0],
                position[1] - current.position[1],
            ];
            for child in self.store.translate_children(id, offset) {
                self.emit(IntentOp::Move, child);
            }
        }
        if current.footprint != footprint {
            self.store.resize(id, footprint)?;
            self.emit(IntentOp::Resize, id);
        }
        info!("Edited {} '{}'", variant.noun(), self.name);
        Ok(())
    }

    /// Delete the placeable of the current edit mode
    pub fn delete(&mut self) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::EditRoom => self.delete_room(),
            EditorMode::EditFurniture => self.delete_furniture(),
            EditorMode::EditBorder => self.delete_border(),
            mode => Err(EditorError::WrongMode {
                operation: "Delete",
                mode,
            }),
        }
    }

    /// Delete the selected room and its furniture
    pub fn delete_room(&mut self) -> Result<(), EditorError> {
        self.require_mode(EditorMode::EditRoom, "Delete room")?;
        let room = self
            .blueprint
            .editing
            .ok_or(EditorError::NothingSelected(Variant::Room))?;
        self.remove(room)?;
        self.enter_view_mode();
        Ok(())
    }

    /// Delete the selected furniture and go back to its room
    pub fn delete_furniture(&mut self) -> Result<(), EditorError> {
        self.require_mode(EditorMode::EditFurniture, "Delete furniture")?;
        let furniture = self
            .blueprint
            .editing
            .ok_or(EditorError::NothingSelected(Variant::Furniture))?;
        let parent = self.store.get(furniture).and_then(|p| p.parent);
        self.remove(furniture)?;

        match parent.filter(|room| self.store.get(*room).is_some()) {
            Some(room) => self.enter_edit(room),
            None => {
                self.enter_view_mode();
                Ok(())
            }
        }
    }

    pub fn delete_border(&mut self) -> Result<(), EditorError> {
        self.require_mode(EditorMode::EditBorder, "Delete border")?;
        let border = self
            .blueprint
            .editing
            .ok_or(EditorError::NothingSelected(Variant::Border))?;
        self.remove(border)?;
        self.enter_view_mode();
        Ok(())
    }

    fn remove(&mut self, id: PlaceableId) -> Result<(), EditorError> {
        // parent paths have to be read before the parents are gone
        let mut paths: HashMap<PlaceableId, String> = std::iter::once(id)
            .chain(self.store.children_of(id).map(|p| p.id))
            .map(|pid| (pid, self.store.parent_path(pid)))
            .collect();

        let removed = self.store.remove(id)?;
        for placeable in &removed {
            let path = paths.remove(&placeable.id).unwrap_or_default();
            self.intents
                .push(PlacementIntent::new(IntentOp::Delete, placeable, path));
        }
        if let Some(first) = removed.first() {
            info!(
                "Deleted {} '{}' ({} placeables removed)",
                first.variant.noun(),
                first.name,
                removed.len()
            );
        }
        Ok(())
    }

    fn emit(&mut self, op: IntentOp, id: PlaceableId) {
        if let Some(placeable) = self.store.get(id) {
            let intent = PlacementIntent::from_store(op, &self.store, placeable);
            self.intents.push(intent);
        }
    }

    // Documents

    /// Flatten the current store
    pub fn document(&self) -> LevelDocument {
        LevelDocument::collect(&self.store)
    }

    /// Replace the level with the document's contents. The new store is
    /// built completely before it is swapped in.
    pub fn load_document(&mut self, document: &LevelDocument) -> LoadReport {
        let (store, report) = document.load_world(&self.catalog);
        self.replace_store(store);
        info!(
            "Loaded {} placeables ({} skipped)",
            report.loaded,
            report.skipped.len()
        );
        report
    }

    /// Remove every placeable, keeping the world size
    pub fn clear_level(&mut self) {
        let world = self.store.world();
        self.replace_store(PlacementStore::new(world));
    }

    fn replace_store(&mut self, store: PlacementStore) {
        let old = std::mem::replace(&mut self.store, store);
        for placeable in old.iter() {
            self.intents
                .push(PlacementIntent::from_store(IntentOp::Delete, &old, placeable));
        }
        let ids: Vec<PlaceableId> = self.store.iter().map(|p| p.id).collect();
        for id in ids {
            self.emit(IntentOp::Insert, id);
        }
        self.enter_view_mode();
    }
}
