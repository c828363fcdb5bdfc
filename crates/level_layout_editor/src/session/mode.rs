//! Editor modes and the transitions allowed between them

use level_layout_core::Variant;
use std::fmt;
use std::str::FromStr;

/// Which panel the editor shows and therefore which operations are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    #[default]
    ViewMode,
    CreateRoom,
    EditRoom,
    CreateFurniture,
    EditFurniture,
    CreateBorder,
    EditBorder,
}

impl EditorMode {
    pub const ALL: [EditorMode; 7] = [
        EditorMode::ViewMode,
        EditorMode::CreateRoom,
        EditorMode::EditRoom,
        EditorMode::CreateFurniture,
        EditorMode::EditFurniture,
        EditorMode::CreateBorder,
        EditorMode::EditBorder,
    ];

    /// Variant the blueprint stands for, `None` in view mode
    pub fn variant(&self) -> Option<Variant> {
        match self {
            EditorMode::ViewMode => None,
            EditorMode::CreateRoom | EditorMode::EditRoom => Some(Variant::Room),
            EditorMode::CreateFurniture | EditorMode::EditFurniture => Some(Variant::Furniture),
            EditorMode::CreateBorder | EditorMode::EditBorder => Some(Variant::Border),
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(
            self,
            EditorMode::CreateRoom | EditorMode::CreateFurniture | EditorMode::CreateBorder
        )
    }

    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            EditorMode::EditRoom | EditorMode::EditFurniture | EditorMode::EditBorder
        )
    }

    /// Create mode for a variant
    pub fn create(variant: Variant) -> Self {
        match variant {
            Variant::Room => EditorMode::CreateRoom,
            Variant::Furniture => EditorMode::CreateFurniture,
            Variant::Border => EditorMode::CreateBorder,
        }
    }

    /// Edit mode for a variant
    pub fn edit(variant: Variant) -> Self {
        match variant {
            Variant::Room => EditorMode::EditRoom,
            Variant::Furniture => EditorMode::EditFurniture,
            Variant::Border => EditorMode::EditBorder,
        }
    }

    /// Whether the panel graph has an edge from `self` to `target`.
    ///
    /// ```text
    /// ViewMode <-> CreateRoom <-> EditRoom <-> CreateFurniture <-> EditFurniture
    /// ViewMode <-> CreateBorder <-> EditBorder
    /// ```
    ///
    /// Every mode may also fall back to `ViewMode` and re-enter itself.
    pub fn can_switch_to(&self, target: EditorMode) -> bool {
        use EditorMode::*;

        if *self == target || target == ViewMode {
            return true;
        }
        matches!(
            (*self, target),
            (ViewMode, CreateRoom)
                | (CreateRoom, EditRoom)
                | (EditRoom, CreateRoom)
                | (EditRoom, CreateFurniture)
                | (CreateFurniture, EditRoom)
                | (CreateFurniture, EditFurniture)
                | (EditFurniture, CreateFurniture)
                | (ViewMode, CreateBorder)
                | (CreateBorder, EditBorder)
                | (EditBorder, CreateBorder)
        )
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditorMode::ViewMode => "ViewMode",
            EditorMode::CreateRoom => "CreateRoom",
            EditorMode::EditRoom => "EditRoom",
            EditorMode::CreateFurniture => "CreateFurniture",
            EditorMode::EditFurniture => "EditFurniture",
            EditorMode::CreateBorder => "CreateBorder",
            EditorMode::EditBorder => "EditBorder",
        };
        f.write_str(name)
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "view" {
            return Ok(EditorMode::ViewMode);
        }
        EditorMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown editor mode '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_is_symmetric() {
        for from in EditorMode::ALL {
            for to in EditorMode::ALL {
                if from.can_switch_to(to) && to != EditorMode::ViewMode {
                    assert!(to.can_switch_to(from), "{} -> {} has no way back", from, to);
                }
            }
        }
    }

    #[test]
    fn test_missing_edges() {
        assert!(!EditorMode::ViewMode.can_switch_to(EditorMode::EditRoom));
        assert!(!EditorMode::ViewMode.can_switch_to(EditorMode::CreateFurniture));
        assert!(!EditorMode::CreateRoom.can_switch_to(EditorMode::CreateBorder));
        assert!(!EditorMode::EditFurniture.can_switch_to(EditorMode::EditRoom));
        assert!(EditorMode::EditFurniture.can_switch_to(EditorMode::ViewMode));
    }

    #[test]
    fn test_parse_and_variant() {
        assert_eq!("editroom".parse::<EditorMode>(), Ok(EditorMode::EditRoom));
        assert_eq!("View".parse::<EditorMode>(), Ok(EditorMode::ViewMode));
        assert!("Paint".parse::<EditorMode>().is_err());

        assert_eq!(EditorMode::ViewMode.variant(), None);
        assert_eq!(EditorMode::EditBorder.variant(), Some(Variant::Border));
        assert_eq!(EditorMode::create(Variant::Furniture), EditorMode::CreateFurniture);
        assert!(EditorMode::CreateRoom.is_create() && !EditorMode::CreateRoom.is_edit());
    }
}
