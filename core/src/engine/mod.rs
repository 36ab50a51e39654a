//! Pallet layout resolution.
//!
//! Turns a [`PalletConfiguration`](crate::model::PalletConfiguration) into the
//! ordered list of absolute pick and drop coordinates the motion controller
//! executes. Every function here is pure: inputs are borrowed read-only and a
//! fresh output is returned on each call.
//!
//! Data flows one way:
//! corners → frame → (layer placements × frame) → horizontal offsets,
//! (stack × layer heights) → Z levels, and both plus pick locations → coordinates.

pub mod assembler;
pub mod layer;
pub mod stack;

#[cfg(test)]
mod tests_assembler;

pub use assembler::{
    assemble_coordinates, assemble_coordinates_with, resolve_configuration,
    resolve_configuration_with, DropLocation, PalletFailure, Resolution, ResolvedBoxCoordinate,
    SavedConfiguration,
};
pub use layer::{horizontal_offset, resolve_layer_placements, ResolvedPlacement};
pub use stack::resolve_stack_heights;

use thiserror::Error;

/// Errors raised while resolving a pallet. Each one is fatal for that pallet only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Degenerate pallet geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Stack position {position} references layer {index}, but the pallet has {layer_count} layers")]
    InvalidStackReference {
        position: usize,
        index: usize,
        layer_count: usize,
    },

    #[error("Layer '{layer}' references unknown box '{box_name}'")]
    InvalidBoxReference { layer: String, box_name: String },

    #[error("Box '{0}' already exists")]
    DuplicateBox(String),

    #[error("Box '{name}' has invalid dimensions {length} x {width} x {height}")]
    InvalidDimensions {
        name: String,
        length: f64,
        width: f64,
        height: f64,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
