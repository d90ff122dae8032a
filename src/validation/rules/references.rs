//! Validation rules for references between entities.

use crate::model::{Node, NodeKey, ProductKey};
use crate::network::SupplyChainNetwork;
use crate::validation::error::{ValidationError, ValidationErrorType};

/// "No Dangling Ends": every lane endpoint must be a registered node.
pub(crate) fn validate_lanes(network: &SupplyChainNetwork) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, lane) in network.lanes().iter().enumerate() {
        for (role, key) in [("origin", &lane.origin), ("destination", &lane.destination)] {
            if network.node(key).is_none() {
                errors.push(dangling(format!("lane #{}", i), role, key));
            }
        }
    }
    errors
}

/// Every demand must name a registered customer and a registered product.
pub(crate) fn validate_demands(network: &SupplyChainNetwork) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, demand) in network.demands().iter().enumerate() {
        let subject = format!("demand #{}", i);
        if network.node(&demand.customer).is_none() {
            errors.push(dangling(subject.clone(), "customer", &demand.customer));
        }
        if !network.has_product(&demand.product) {
            errors.push(unregistered(subject, "demand", &demand.product));
        }
    }
    errors
}

/// Per-product attributes and recipes may only mention registered products.
///
/// A BOM input that is not in the product set is legal to build but almost
/// always a typo, so it is reported here rather than rejected on insert.
pub(crate) fn validate_node_products(network: &SupplyChainNetwork) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for node in network.nodes() {
        let subject = node.key().to_string();
        for product in node.configured_products() {
            if !network.has_product(product) {
                errors.push(unregistered(subject.clone(), "attribute", product));
            }
        }
    }
    for plant in network.plants() {
        let subject = plant.key().to_string();
        let mut mentioned: Vec<&ProductKey> = plant.bill_of_materials().products().collect();
        mentioned.sort();
        for product in mentioned {
            if !network.has_product(product) {
                errors.push(unregistered(subject.clone(), "bill of materials", product));
            }
        }
    }
    errors
}

fn dangling(subject: String, role: &str, key: &NodeKey) -> ValidationError {
    ValidationError::new(
        subject,
        ValidationErrorType::DanglingReference,
        format!("Dangling Reference: {} {} is not registered in the network.", role, key),
    )
}

fn unregistered(subject: String, place: &str, product: &ProductKey) -> ValidationError {
    ValidationError::new(
        subject,
        ValidationErrorType::UnregisteredProduct,
        format!("Unregistered Product: {} refers to product '{}', which is not registered.", place, product),
    )
}
