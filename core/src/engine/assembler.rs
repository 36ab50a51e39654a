//! Final coordinate list for one pallet or a whole configuration set.

use super::layer::resolve_layer_placements;
use super::stack::resolve_stack_heights;
use super::{LayoutError, LayoutResult};
use crate::config::EngineConfig;
use crate::geometry::{resolve_frame_with, Coordinate3};
use crate::model::{BoxCatalog, BoxDimensions, ConfigurationSet, PalletConfiguration};
use crate::validation::validate_pallet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Where and how a box is set down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropLocation {
    #[serde(flatten)]
    pub position: Coordinate3,
    pub rotated: bool,
    /// Gripper angle at drop: 90° when rotated, plus the pallet's orientation.
    pub angle_deg: f64,
}

/// One placed box instance. The emission order of these is the pick/place sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBoxCoordinate {
    pub box_name: String,
    pub pick_location: Coordinate3,
    pub drop_location: DropLocation,
    pub dimensions: BoxDimensions,
    pub pallet_index: usize,
    pub stack_index: usize,
    /// Straight-line distance from pick to drop, in mm.
    pub linear_path_distance: f64,
}

/// Resolve a single pallet with default settings. Tagged as pallet 0.
pub fn assemble_coordinates(
    pallet: &PalletConfiguration,
    catalog: &BoxCatalog,
) -> LayoutResult<Vec<ResolvedBoxCoordinate>> {
    assemble_coordinates_with(pallet, 0, catalog, &EngineConfig::default())
}

/// Resolve a single pallet. Fails as a whole: no partial list is ever returned.
pub fn assemble_coordinates_with(
    pallet: &PalletConfiguration,
    pallet_index: usize,
    catalog: &BoxCatalog,
    config: &EngineConfig,
) -> LayoutResult<Vec<ResolvedBoxCoordinate>> {
    let frame = resolve_frame_with(&pallet.corners, config)?;
    let z_levels = resolve_stack_heights(&pallet.stack, &pallet.layers, catalog, frame.base_z)?;

    debug!(
        "Resolving pallet '{}': {:.1} x {:.1} mm, {} stack positions",
        pallet.name,
        frame.x_extent(),
        frame.y_extent(),
        pallet.stack.len()
    );

    if config.validate {
        match validate_pallet(pallet, catalog, config) {
            Ok(warnings) => {
                for w in warnings {
                    warn!("Pallet '{}': {}", pallet.name, w);
                }
            }
            Err(e) => warn!("Pallet '{}': validation skipped: {}", pallet.name, e),
        }
    }

    let pallet_angle = frame.angle_deg();
    let mut coordinates = Vec::new();

    for ((stack_index, layer_index), z) in pallet.stack.iter().enumerate().zip(z_levels) {
        let layer = &pallet.layers[layer_index];
        let placements = resolve_layer_placements(layer, &frame, catalog)?;

        for placement in placements {
            let offset = placement.horizontal_offset;
            let mut drop = Coordinate3::from(frame.to_absolute(offset.x, offset.y));
            drop.z = z;

            let pick = placement.box_type.pick_location;
            let turn = if placement.rotated { 90.0 } else { 0.0 };
            coordinates.push(ResolvedBoxCoordinate {
                box_name: placement.box_type.name.clone(),
                pick_location: pick,
                drop_location: DropLocation {
                    position: drop,
                    rotated: placement.rotated,
                    angle_deg: turn + pallet_angle,
                },
                dimensions: placement.box_type.dimensions,
                pallet_index,
                stack_index,
                linear_path_distance: pick.distance(&drop),
            });
        }
    }

    Ok(coordinates)
}

/// A pallet that could not be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Pallet {pallet_index} ('{pallet_name}'): {error}")]
pub struct PalletFailure {
    pub pallet_index: usize,
    pub pallet_name: String,
    #[source]
    pub error: LayoutError,
}

/// Outcome of resolving every pallet of a configuration set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub coordinates: Vec<ResolvedBoxCoordinate>,
    pub failures: Vec<PalletFailure>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_saved(self, config: ConfigurationSet) -> SavedConfiguration {
        SavedConfiguration {
            complete: self.is_complete(),
            config,
            box_coordinates: self.coordinates,
        }
    }
}

/// Configuration together with its resolved sequence, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfiguration {
    pub config: ConfigurationSet,
    pub box_coordinates: Vec<ResolvedBoxCoordinate>,
    pub complete: bool,
}

pub fn resolve_configuration(set: &ConfigurationSet) -> Resolution {
    resolve_configuration_with(set, &EngineConfig::default())
}

/// Resolve each pallet independently. A failing pallet is recorded and skipped;
/// the others are still resolved.
pub fn resolve_configuration_with(set: &ConfigurationSet, config: &EngineConfig) -> Resolution {
    let mut resolution = Resolution::default();

    for (pallet_index, pallet) in set.pallets.iter().enumerate() {
        match assemble_coordinates_with(pallet, pallet_index, &set.boxes, config) {
            Ok(coordinates) => resolution.coordinates.extend(coordinates),
            Err(error) => {
                let failure = PalletFailure {
                    pallet_index,
                    pallet_name: pallet.name.clone(),
                    error,
                };
                warn!("{}", failure);
                resolution.failures.push(failure);
            }
        }
    }

    debug!(
        "Configuration '{}': {} boxes resolved, {} pallets failed",
        set.name,
        resolution.coordinates.len(),
        resolution.failures.len()
    );
    resolution
}
