//! Validation rule for per-period series coverage.

use crate::model::Node;
use crate::network::SupplyChainNetwork;
use crate::validation::error::{ValidationError, ValidationErrorType};

/// "Cover the Horizon": a lane series is either empty (its default applies to
/// every period) or at least `horizon` long. Demand series have no default
/// and must always be at least `horizon` long.
///
/// Accessors fail on periods past the end of a series, so a short series
/// would otherwise surface only once a consumer reaches that period.
pub(crate) fn validate_horizon(network: &SupplyChainNetwork) -> Vec<ValidationError> {
    let horizon = network.horizon();
    let mut errors = Vec::new();
    let mut check = |subject: String, series: &str, len: usize, empty_is_default: bool| {
        if len < horizon && !(empty_is_default && len == 0) {
            errors.push(ValidationError::new(
                subject,
                ValidationErrorType::ShortSeries,
                format!(
                    "Short Series: '{}' covers {} period(s) but the horizon is {}.",
                    series, len, horizon
                ),
            ));
        }
    };

    for (i, lane) in network.lanes().iter().enumerate() {
        check(format!("lane #{}", i), "can_ship", lane.can_ship.len(), true);
        check(format!("lane #{}", i), "initial_arrivals", lane.initial_arrivals.len(), true);
    }
    for (i, demand) in network.demands().iter().enumerate() {
        check(format!("demand #{}", i), "demand", demand.demand.len(), false);
    }
    for customer in network.customers() {
        for (product, series) in customer.demands() {
            check(customer.key().to_string(), &format!("demand of {}", product), series.len(), false);
        }
    }
    errors
}
