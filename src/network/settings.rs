//! Planning-problem settings carried by the network.

use crate::model::ModelError;
use serde::{Deserialize, Serialize};

/// Scalars that define the planning problem around the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningSettings {
    /// Number of discrete planning periods every per-period series must span.
    pub horizon: usize,
    /// Per-period discount applied to future costs, in `(0, 1]`.
    pub discount_factor: f64,
}

impl Default for PlanningSettings {
    fn default() -> Self {
        Self { horizon: 1, discount_factor: 1.0 }
    }
}

impl PlanningSettings {
    pub fn new(horizon: usize, discount_factor: f64) -> Result<Self, ModelError> {
        let settings = Self { horizon, discount_factor };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.horizon == 0 {
            return Err(ModelError::BadParameter {
                name: "horizon",
                value: 0.0,
                reason: "must span at least one period",
            });
        }
        if !(self.discount_factor > 0.0 && self.discount_factor <= 1.0) {
            return Err(ModelError::BadParameter {
                name: "discount_factor",
                value: self.discount_factor,
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}
