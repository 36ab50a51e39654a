//! Horizontal placement of the boxes of one layer.
//!
//! Fractional positions come from the editor, whose origin is the pallet's
//! top-left corner with y growing downwards. The frame's y axis runs from
//! `corner2` towards `corner1`, i.e. bottom to top, hence the `1 - y` flip.

use super::LayoutResult;
use crate::geometry::{Coordinate2, PlanarFrame};
use crate::model::{BoxCatalog, BoxDimensions, BoxType, Layer};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlacement<'a> {
    pub box_type: &'a BoxType,
    /// Box centre along the frame axes, relative to the frame origin, in mm.
    pub horizontal_offset: Coordinate2,
    pub rotated: bool,
}

impl ResolvedPlacement<'_> {
    /// Rotation-adjusted `(width, length)`: width runs along the x axis.
    pub fn footprint(&self) -> (f64, f64) {
        self.box_type.dimensions.footprint(self.rotated)
    }
}

/// Centre offset of a box whose top-left corner sits at `position`.
///
/// No clamping: positions outside `[0, 1]` produce offsets outside the pallet.
pub fn horizontal_offset(
    position: Coordinate2,
    dimensions: &BoxDimensions,
    rotated: bool,
    frame: &PlanarFrame,
) -> Coordinate2 {
    let (box_width, box_length) = dimensions.footprint(rotated);
    Coordinate2::new(
        frame.x_extent() * position.x + box_width / 2.0,
        frame.y_extent() * (1.0 - position.y) - box_length / 2.0,
    )
}

/// Resolve every placement of `layer`, preserving placement order.
pub fn resolve_layer_placements<'a>(
    layer: &Layer,
    frame: &PlanarFrame,
    catalog: &'a BoxCatalog,
) -> LayoutResult<Vec<ResolvedPlacement<'a>>> {
    layer
        .placements
        .iter()
        .map(|placement| -> LayoutResult<ResolvedPlacement<'a>> {
            let box_type = catalog.resolve(&placement.box_name, &layer.name)?;
            Ok(ResolvedPlacement {
                box_type,
                horizontal_offset: horizontal_offset(
                    placement.position,
                    &box_type.dimensions,
                    placement.rotated,
                    frame,
                ),
                rotated: placement.rotated,
            })
        })
        .collect()
}
