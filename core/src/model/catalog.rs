//! Named box types shared by all pallets of a configuration.

use super::BoxType;
use crate::engine::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Box types in authoring order with a name index.
///
/// Serialized as a plain list; loading a list with duplicate names or invalid
/// dimensions fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<BoxType>", into = "Vec<BoxType>")]
pub struct BoxCatalog {
    boxes: Vec<BoxType>,
    by_name: HashMap<String, usize>,
}

impl BoxCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box type, rejecting duplicate names and non-positive dimensions.
    pub fn add(&mut self, box_type: BoxType) -> LayoutResult<usize> {
        if self.by_name.contains_key(&box_type.name) {
            return Err(LayoutError::DuplicateBox(box_type.name));
        }
        if !box_type.dimensions.is_valid() {
            let d = box_type.dimensions;
            return Err(LayoutError::InvalidDimensions {
                name: box_type.name,
                length: d.length,
                width: d.width,
                height: d.height,
            });
        }

        let index = self.boxes.len();
        self.by_name.insert(box_type.name.clone(), index);
        self.boxes.push(box_type);
        Ok(index)
    }

    pub fn get(&self, name: &str) -> Option<&BoxType> {
        self.by_name.get(name).and_then(|&i| self.boxes.get(i))
    }

    /// Look up a box referenced from `layer`.
    pub fn resolve(&self, name: &str, layer: &str) -> LayoutResult<&BoxType> {
        self.get(name).ok_or_else(|| LayoutError::InvalidBoxReference {
            layer: layer.to_string(),
            box_name: name.to_string(),
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<BoxType> {
        let index = self.by_name.remove(name)?;
        let removed = self.boxes.remove(index);
        self.rebuild_index();
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxType> {
        self.boxes.iter()
    }

    fn rebuild_index(&mut self) {
        self.by_name.clear();
        for (i, b) in self.boxes.iter().enumerate() {
            self.by_name.insert(b.name.clone(), i);
        }
    }
}

impl PartialEq for BoxCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.boxes == other.boxes
    }
}

impl TryFrom<Vec<BoxType>> for BoxCatalog {
    type Error = LayoutError;

    fn try_from(boxes: Vec<BoxType>) -> Result<Self, Self::Error> {
        let mut catalog = BoxCatalog::new();
        for b in boxes {
            catalog.add(b)?;
        }
        Ok(catalog)
    }
}

impl From<BoxCatalog> for Vec<BoxType> {
    fn from(catalog: BoxCatalog) -> Self {
        catalog.boxes
    }
}
