//! Oriented pallet frame derived from three taught corners.
//!
//! `corner2` is the shared corner and becomes the frame origin. The x axis runs
//! towards `corner3`, the y axis towards `corner1`. The corners are trusted as
//! entered: the axes are not re-orthogonalized, so a skewed pallet yields a skewed
//! frame (see [`PlanarFrame::perpendicularity`]).

use super::{planar_angle_deg, Point3, Vector3};
use crate::config::EngineConfig;
use crate::engine::{LayoutError, LayoutResult};
use crate::model::PalletCorners;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanarFrame {
    pub origin: Point3,
    /// Unit vector along `corner3 - corner2`.
    pub x_axis: Vector3,
    /// Unit vector along `corner1 - corner2`.
    pub y_axis: Vector3,
    /// `|corner1 - corner2|`, the extent along `y_axis`.
    pub width: f64,
    /// `|corner3 - corner2|`, the extent along `x_axis`.
    pub length: f64,
    /// Mean Z of the three corners.
    pub base_z: f64,
}

impl PlanarFrame {
    /// Physical extent along `x_axis`.
    pub fn x_extent(&self) -> f64 {
        self.length
    }

    /// Physical extent along `y_axis`.
    pub fn y_extent(&self) -> f64 {
        self.width
    }

    /// Orientation of the x axis in the machine XY plane, in degrees.
    pub fn angle_deg(&self) -> f64 {
        planar_angle_deg(&self.x_axis)
    }

    /// Centre of the pallet top, halfway along both edges from the origin.
    pub fn center(&self) -> Point3 {
        self.origin + self.x_axis * (self.length * 0.5) + self.y_axis * (self.width * 0.5)
    }

    /// |cos θ| between the two edges. 0 for a perfectly square corner.
    pub fn perpendicularity(&self) -> f64 {
        self.x_axis.dot(&self.y_axis).abs()
    }

    /// Map an offset expressed along the frame axes to an absolute point.
    pub fn to_absolute(&self, along_x: f64, along_y: f64) -> Point3 {
        self.origin + self.x_axis * along_x + self.y_axis * along_y
    }
}

/// Resolve a frame with the default tolerance.
pub fn resolve_frame(corners: &PalletCorners) -> LayoutResult<PlanarFrame> {
    resolve_frame_with(corners, &EngineConfig::default())
}

pub fn resolve_frame_with(corners: &PalletCorners, config: &EngineConfig) -> LayoutResult<PlanarFrame> {
    let eps = config.epsilon;
    if !corners.is_finite() {
        return Err(LayoutError::DegenerateGeometry(
            "corner coordinates must be finite".to_string(),
        ));
    }

    let origin = corners.corner2.to_point();
    let width_vector = corners.corner1.to_point() - origin;
    let length_vector = corners.corner3.to_point() - origin;

    let width = width_vector.norm();
    let length = length_vector.norm();

    if width < eps {
        return Err(LayoutError::DegenerateGeometry(format!(
            "corner1 and corner2 coincide (edge length {:.6} mm)",
            width
        )));
    }
    if length < eps {
        return Err(LayoutError::DegenerateGeometry(format!(
            "corner3 and corner2 coincide (edge length {:.6} mm)",
            length
        )));
    }

    let x_axis = length_vector / length;
    let y_axis = width_vector / width;

    if x_axis.cross(&y_axis).norm() < config.parallel_tolerance {
        return Err(LayoutError::DegenerateGeometry(
            "pallet edges are parallel".to_string(),
        ));
    }

    Ok(PlanarFrame {
        origin,
        x_axis,
        y_axis,
        width,
        length,
        base_z: base_z(corners),
    })
}

/// Pallet surface height: the mean of the three corner heights.
pub fn base_z(corners: &PalletCorners) -> f64 {
    (corners.corner1.z + corners.corner2.z + corners.corner3.z) / 3.0
}

