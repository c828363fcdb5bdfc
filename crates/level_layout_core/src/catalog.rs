//! Read-only registry of placeable templates
//!
//! Templates are grouped by variant and kept sorted by key, which is the
//! order the editor offers them in. The first template of a variant is the
//! default selection when a create mode is entered.
//!
//! Catalog files are TOML:
//!
//! ```toml
//! [[room]]
//! key = "WoodFloor"
//! width = 4.0
//! height = 4.0
//! layer = 8
//!
//! [[furniture]]
//! key = "Table"
//! width = 1.0
//! height = 1.0
//! ```

use crate::Variant;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Duplicate {variant} template '{key}'")]
    DuplicateTemplate { variant: Variant, key: String },
    #[error("{variant} template '{key}' has an invalid footprint {width} x {height}")]
    InvalidFootprint {
        variant: Variant,
        key: String,
        width: f32,
        height: f32,
    },
}

/// A named template with its intrinsic footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub key: String,
    pub width: f32,
    pub height: f32,
    /// Hierarchy bucket new instances are created in
    #[serde(default)]
    pub layer: i32,
}

impl Template {
    pub fn new(key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
            layer: 0,
        }
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn footprint(&self) -> [f32; 2] {
        [self.width, self.height]
    }
}

/// Template registry, one ordered list per variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct Catalog {
    #[serde(default, rename = "room", alias = "floor")]
    rooms: Vec<Template>,
    #[serde(default)]
    furniture: Vec<Template>,
    #[serde(default, rename = "border")]
    borders: Vec<Template>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, keeping the variant's list sorted by key.
    /// A template with an existing key replaces the old one.
    pub fn insert(&mut self, variant: Variant, template: Template) {
        let list = self.list_mut(variant);
        match list.binary_search_by(|t| t.key.as_str().cmp(template.key.as_str())) {
            Ok(idx) => list[idx] = template,
            Err(idx) => list.insert(idx, template),
        }
    }

    /// Builder form of [`Catalog::insert`]
    pub fn with_template(mut self, variant: Variant, template: Template) -> Self {
        self.insert(variant, template);
        self
    }

    /// Templates of a variant, sorted by key
    pub fn templates(&self, variant: Variant) -> &[Template] {
        match variant {
            Variant::Room => &self.rooms,
            Variant::Furniture => &self.furniture,
            Variant::Border => &self.borders,
        }
    }

    /// Look up a template by key
    pub fn get(&self, variant: Variant, key: &str) -> Option<&Template> {
        self.templates(variant).iter().find(|t| t.key == key)
    }

    /// The default template of a variant (first by key)
    pub fn first(&self, variant: Variant) -> Option<&Template> {
        self.templates(variant).first()
    }

    pub fn contains(&self, variant: Variant, key: &str) -> bool {
        self.get(variant, key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Variant::ALL.iter().all(|v| self.templates(*v).is_empty())
    }

    fn list_mut(&mut self, variant: Variant) -> &mut Vec<Template> {
        match variant {
            Variant::Room => &mut self.rooms,
            Variant::Furniture => &mut self.furniture,
            Variant::Border => &mut self.borders,
        }
    }

    /// Sort every list and reject duplicate keys or degenerate footprints
    fn normalize(mut self) -> Result<Self, CatalogError> {
        for variant in Variant::ALL {
            let list = self.list_mut(variant);
            list.sort_by(|a, b| a.key.cmp(&b.key));

            for pair in list.windows(2) {
                if pair[0].key == pair[1].key {
                    return Err(CatalogError::DuplicateTemplate {
                        variant,
                        key: pair[0].key.clone(),
                    });
                }
            }

            if let Some(bad) = list
                .iter()
                .find(|t| !(t.width > 0.0 && t.height > 0.0) || !t.width.is_finite() || !t.height.is_finite())
            {
                return Err(CatalogError::InvalidFootprint {
                    variant,
                    key: bad.key.clone(),
                    width: bad.width,
                    height: bad.height,
                });
            }
        }
        Ok(self)
    }
}

/// Parse a catalog from TOML text
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(text)?;
    catalog.normalize()
}

/// Load a catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    tracing::debug!(
        "Loaded catalog {:?}: {} rooms, {} furniture, {} borders",
        path,
        catalog.templates(Variant::Room).len(),
        catalog.templates(Variant::Furniture).len(),
        catalog.templates(Variant::Border).len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[room]]
key = "Wood"
width = 4.0
height = 4.0
layer = 8

[[room]]
key = "Carpet"
width = 2.0
height = 2.0

[[furniture]]
key = "Table"
width = 1.0
height = 1.0

[[border]]
key = "Wall"
width = 1.0
height = 0.5
"#;

    #[test]
    fn test_parse_sorts_by_key() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let rooms: Vec<_> = catalog
            .templates(Variant::Room)
            .iter()
            .map(|t| t.key.as_str())
            .collect();
        assert_eq!(rooms, vec!["Carpet", "Wood"]);
        assert_eq!(catalog.first(Variant::Room).unwrap().key, "Carpet");
        assert_eq!(catalog.get(Variant::Room, "Wood").unwrap().layer, 8);
        assert_eq!(catalog.get(Variant::Border, "Wall").unwrap().footprint(), [1.0, 0.5]);
    }

    #[test]
    fn test_lookup_is_scoped_by_variant() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert!(catalog.contains(Variant::Furniture, "Table"));
        assert!(!catalog.contains(Variant::Room, "Table"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let text = r#"
[[furniture]]
key = "Table"
width = 1.0
height = 1.0

[[furniture]]
key = "Table"
width = 2.0
height = 1.0
"#;
        assert!(matches!(
            parse_catalog(text),
            Err(CatalogError::DuplicateTemplate { .. })
        ));
    }

    #[test]
    fn test_invalid_footprint_rejected() {
        let text = r#"
[[border]]
key = "Wall"
width = 0.0
height = 1.0
"#;
        assert!(matches!(
            parse_catalog(text),
            Err(CatalogError::InvalidFootprint { .. })
        ));
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut catalog = Catalog::new()
            .with_template(Variant::Furniture, Template::new("Sofa", 2.0, 1.0))
            .with_template(Variant::Furniture, Template::new("Bed", 2.0, 2.0));
        catalog.insert(Variant::Furniture, Template::new("Sofa", 3.0, 1.0));

        let furniture = catalog.templates(Variant::Furniture);
        assert_eq!(furniture.len(), 2);
        assert_eq!(furniture[0].key, "Bed");
        assert_eq!(furniture[1].width, 3.0);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert!(!catalog.is_empty());
        assert!(load_catalog(&tmp.path().join("missing.toml")).is_err());
    }
}
