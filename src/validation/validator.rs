//! The central validator that orchestrates the execution of all integrity rules.
use super::error::ValidationError;
use super::rules::{bom, horizon, references};
use crate::network::SupplyChainNetwork;
use tracing::debug;

/// The integrity pass over a fully assembled network.
///
/// Registration never checks cross-references, so a network can be built in
/// any order. This struct runs once building is done and collects every
/// finding before the network is handed to a consumer. It does not judge
/// economic feasibility.
pub struct Validator<'a> {
    network: &'a SupplyChainNetwork,
}

impl<'a> Validator<'a> {
    /// Creates a new validator for the given network.
    pub fn new(network: &'a SupplyChainNetwork) -> Self {
        Self { network }
    }

    /// Executes all registered rules against the network.
    ///
    /// # Returns
    /// - `Ok(())` if no integrity concern is found.
    /// - `Err(Vec<ValidationError>)` containing every finding.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        errors.extend(references::validate_lanes(self.network));
        errors.extend(references::validate_demands(self.network));
        errors.extend(references::validate_node_products(self.network));
        errors.extend(horizon::validate_horizon(self.network));
        errors.extend(bom::validate_bom(self.network));

        debug!(
            lanes = self.network.lanes().len(),
            demands = self.network.demands().len(),
            findings = errors.len(),
            "validated network"
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
