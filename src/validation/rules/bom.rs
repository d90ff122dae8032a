//! Validation rule for circular recipes.

use crate::model::{ModelError, Node};
use crate::network::SupplyChainNetwork;
use crate::validation::error::{ValidationError, ValidationErrorType};

/// A plant's recipes must admit a production order: no product may be an
/// input to itself, directly or through intermediates.
pub(crate) fn validate_bom(network: &SupplyChainNetwork) -> Vec<ValidationError> {
    network
        .plants()
        .filter_map(|plant| match plant.production_order() {
            Ok(_) => None,
            Err(ModelError::BomCycle { product, .. }) => Some(ValidationError::new(
                plant.key().to_string(),
                ValidationErrorType::BomCycle,
                format!(
                    "BOM Cycle: product '{}' is consumed, directly or through intermediates, by its own recipe.",
                    product
                ),
            )),
            Err(other) => Some(ValidationError::new(
                plant.key().to_string(),
                ValidationErrorType::BomCycle,
                other.to_string(),
            )),
        })
        .collect()
}
