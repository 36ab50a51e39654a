//! Palletizer configuration data model.

pub mod catalog;
pub mod types;


pub use catalog::BoxCatalog;
pub use types::{
    BoxDimensions, BoxType, ConfigurationSet, Layer, LayerPlacement, PalletConfiguration,
    PalletCorners, Stack,
};
