pub mod config;
pub mod engine;
pub mod geometry;
pub mod model;
pub mod validation;

pub use config::EngineConfig;
pub use engine::{
    assemble_coordinates, assemble_coordinates_with, resolve_configuration, LayoutError,
    LayoutResult, Resolution, ResolvedBoxCoordinate,
};
