//! Advisory layout checks.
//!
//! The resolver never clamps or corrects input. These checks let an editor warn
//! the user about layouts that resolve fine but would not work physically:
//! boxes hanging over the pallet edge, overlapping footprints, skewed corners.

use crate::config::EngineConfig;
use crate::engine::{resolve_layer_placements, LayoutResult, ResolvedPlacement};
use crate::geometry::{resolve_frame_with, PlanarFrame};
use crate::model::{BoxCatalog, Layer, PalletConfiguration};
use serde::Serialize;
use std::fmt;


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// |cos θ| between the taught edges exceeds the configured tolerance.
    NonPerpendicularCorners { cos_angle: f64 },
    EmptyStack,
    UnusedLayer { layer: String },
    /// Fractional position outside `[0, 1]` or footprint past the pallet edge.
    OutOfBounds { layer: String, placement: usize, box_name: String },
    Overlap { layer: String, first: usize, second: usize },
    /// The layer could not be checked, e.g. it references an unknown box.
    UncheckedLayer { layer: String, reason: String },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPerpendicularCorners { cos_angle } => write!(
                f,
                "pallet corners are {:.1}° off square",
                90.0 - cos_angle.acos().to_degrees()
            ),
            Self::EmptyStack => write!(f, "stack is empty"),
            Self::UnusedLayer { layer } => write!(f, "layer '{}' is not used in the stack", layer),
            Self::OutOfBounds { layer, placement, box_name } => write!(
                f,
                "layer '{}': box #{} ('{}') extends beyond the pallet",
                layer, placement, box_name
            ),
            Self::Overlap { layer, first, second } => {
                write!(f, "layer '{}': boxes #{} and #{} overlap", layer, first, second)
            }
            Self::UncheckedLayer { layer, reason } => {
                write!(f, "layer '{}' not checked: {}", layer, reason)
            }
        }
    }
}

/// Footprint rectangle along the frame axes: `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Footprint {
    min: [f64; 2],
    max: [f64; 2],
}

impl Footprint {
    fn of(placement: &ResolvedPlacement<'_>) -> Self {
        let (w, l) = placement.footprint();
        let c = placement.horizontal_offset;
        Self {
            min: [c.x - w / 2.0, c.y - l / 2.0],
            max: [c.x + w / 2.0, c.y + l / 2.0],
        }
    }

    fn overlaps(&self, other: &Footprint, eps: f64) -> bool {
        let dx = self.max[0].min(other.max[0]) - self.min[0].max(other.min[0]);
        let dy = self.max[1].min(other.max[1]) - self.min[1].max(other.min[1]);
        dx > eps && dy > eps
    }

    fn within(&self, frame: &PlanarFrame, eps: f64) -> bool {
        self.min[0] >= -eps
            && self.min[1] >= -eps
            && self.max[0] <= frame.x_extent() + eps
            && self.max[1] <= frame.y_extent() + eps
    }
}

pub fn validate_layer(
    layer: &Layer,
    frame: &PlanarFrame,
    catalog: &BoxCatalog,
    config: &EngineConfig,
) -> LayoutResult<Vec<LayoutWarning>> {
    let eps = config.epsilon;
    let resolved = resolve_layer_placements(layer, frame, catalog)?;
    let footprints: Vec<Footprint> = resolved.iter().map(Footprint::of).collect();
    let mut warnings = Vec::new();

    for (i, (placement, footprint)) in layer.placements.iter().zip(&footprints).enumerate() {
        let p = placement.position;
        let fraction_ok = (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y);
        if !fraction_ok || !footprint.within(frame, eps) {
            warnings.push(LayoutWarning::OutOfBounds {
                layer: layer.name.clone(),
                placement: i,
                box_name: placement.box_name.clone(),
            });
        }
    }

    for i in 0..footprints.len() {
        for j in (i + 1)..footprints.len() {
            if footprints[i].overlaps(&footprints[j], eps) {
                warnings.push(LayoutWarning::Overlap {
                    layer: layer.name.clone(),
                    first: i,
                    second: j,
                });
            }
        }
    }

    Ok(warnings)
}

/// Check the corners, the stack and every layer of a pallet.
///
/// A layer that cannot be resolved is reported as [`LayoutWarning::UncheckedLayer`]
/// and the remaining layers are still checked. Only a degenerate frame is an error.
pub fn validate_pallet(
    pallet: &PalletConfiguration,
    catalog: &BoxCatalog,
    config: &EngineConfig,
) -> LayoutResult<Vec<LayoutWarning>> {
    let frame = resolve_frame_with(&pallet.corners, config)?;
    let mut warnings = Vec::new();

    let cos_angle = frame.perpendicularity();
    if cos_angle > config.perpendicular_tolerance {
        warnings.push(LayoutWarning::NonPerpendicularCorners { cos_angle });
    }

    if pallet.stack.is_empty() {
        warnings.push(LayoutWarning::EmptyStack);
    }

    for (index, layer) in pallet.layers.iter().enumerate() {
        if !pallet.stack.iter().any(|i| i == index) {
            warnings.push(LayoutWarning::UnusedLayer {
                layer: layer.name.clone(),
            });
        }
        match validate_layer(layer, &frame, catalog, config) {
            Ok(layer_warnings) => warnings.extend(layer_warnings),
            Err(e) => warnings.push(LayoutWarning::UncheckedLayer {
                layer: layer.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    Ok(warnings)
}
