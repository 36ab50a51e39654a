//! Pallet configuration as authored in the editor: boxes, corners, layers, stack.
//!
//! Everything here is plain data. Derived quantities (layer height, frames,
//! drop coordinates) are computed on demand by the engine and never stored.

use super::BoxCatalog;
use crate::engine::LayoutResult;
use crate::geometry::{Coordinate2, Coordinate3};
use serde::{Deserialize, Serialize};

/// Physical extents of a box before rotation, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxDimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self { length, width, height }
    }

    pub fn is_valid(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Effective `(width, length)` on the pallet. A rotated box swaps the two.
    pub fn footprint(&self, rotated: bool) -> (f64, f64) {
        if rotated {
            (self.length, self.width)
        } else {
            (self.width, self.length)
        }
    }
}

/// A reusable box type. `pick_location` is shared by every placement of the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxType {
    pub name: String,
    pub dimensions: BoxDimensions,
    pub pick_location: Coordinate3,
}

impl BoxType {
    pub fn new(name: &str, dimensions: BoxDimensions, pick_location: Coordinate3) -> Self {
        Self {
            name: name.to_string(),
            dimensions,
            pick_location,
        }
    }
}

/// Three taught corners of the pallet top. `corner2` is the shared corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PalletCorners {
    pub corner1: Coordinate3,
    pub corner2: Coordinate3,
    pub corner3: Coordinate3,
}

impl PalletCorners {
    pub fn new(corner1: Coordinate3, corner2: Coordinate3, corner3: Coordinate3) -> Self {
        Self { corner1, corner2, corner3 }
    }

    pub fn is_finite(&self) -> bool {
        [self.corner1, self.corner2, self.corner3]
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite() && c.z.is_finite())
    }
}

/// One box footprint inside a layer.
///
/// `position` is the box's top-left corner as a fraction of the pallet extents,
/// measured from the pallet's top-left as shown in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPlacement {
    pub box_name: String,
    pub position: Coordinate2,
    #[serde(default)]
    pub rotated: bool,
}

impl LayerPlacement {
    pub fn new(box_name: &str, x: f64, y: f64, rotated: bool) -> Self {
        Self {
            box_name: box_name.to_string(),
            position: Coordinate2::new(x, y),
            rotated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub placements: Vec<LayerPlacement>,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            placements: Vec::new(),
        }
    }

    pub fn with_placement(mut self, placement: LayerPlacement) -> Self {
        self.placements.push(placement);
        self
    }

    /// Height of the layer: the tallest box placed in it. Rotation is about the
    /// vertical axis so it never changes height. An empty layer is 0 mm tall.
    pub fn height(&self, catalog: &BoxCatalog) -> LayoutResult<f64> {
        let mut height: f64 = 0.0;
        for placement in &self.placements {
            let box_type = catalog.resolve(&placement.box_name, &self.name)?;
            height = height.max(box_type.dimensions.height);
        }
        Ok(height)
    }
}

/// Vertical order of layers, base first. Entries index the owning pallet's layers
/// and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack {
    pub layers: Vec<usize>,
}

impl Stack {
    pub fn new(layers: Vec<usize>) -> Self {
        Self { layers }
    }

    pub fn push(&mut self, layer_index: usize) {
        self.layers.push(layer_index);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers.iter().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletConfiguration {
    pub name: String,
    pub corners: PalletCorners,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub stack: Stack,
}

impl PalletConfiguration {
    pub fn new(name: &str, corners: PalletCorners) -> Self {
        Self {
            name: name.to_string(),
            corners,
            layers: Vec::new(),
            stack: Stack::default(),
        }
    }

    /// Append a layer and return its index for use in the stack.
    pub fn add_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Boxes the stack will place, or `None` if the stack references a missing layer.
    pub fn placed_box_count(&self) -> Option<usize> {
        self.stack
            .iter()
            .map(|i| self.layers.get(i).map(|l| l.placements.len()))
            .sum()
    }
}

/// A complete configuration: the shared box catalog and every pallet using it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationSet {
    pub name: String,
    #[serde(default)]
    pub boxes: BoxCatalog,
    #[serde(default)]
    pub pallets: Vec<PalletConfiguration>,
}

impl ConfigurationSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
