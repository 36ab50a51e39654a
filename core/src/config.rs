//! Engine tuning knobs.
//!
//! None of these change the placement formulas; they only control tolerances
//! and whether advisory layout checks run during assembly.

use crate::geometry::EPSILON;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Length tolerance in mm for degenerate edges and footprint overlap.
    pub epsilon: f64,
    /// Smallest sine of the angle between pallet edges; below it the edges count
    /// as parallel.
    pub parallel_tolerance: f64,
    /// Largest |cos θ| between pallet edges accepted without a warning.
    pub perpendicular_tolerance: f64,
    /// Run advisory layout checks while assembling and log their findings.
    pub validate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            parallel_tolerance: 1e-6,
            // roughly 2 degrees off square
            perpendicular_tolerance: 0.035,
            validate: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_validation(mut self) -> Self {
        self.validate = true;
        self
    }
}
