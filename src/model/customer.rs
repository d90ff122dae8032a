//! Customers: sinks of demand.

use super::error::{period_value, ModelError};
use super::identity::{name_identity, Location, NodeKind, Product, ProductKey};
use super::node::{Facility, Node, ProductMap};
use serde::{Deserialize, Serialize};

/// A customer and the per-period quantities it requests.
///
/// `demands` is a convenience copy held on the node. It is independent of
/// the `Demand` records registered on the network: neither is derived from
/// the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    facility: Facility,
    demands: ProductMap<Vec<f64>>,
}

name_identity!(Customer => facility.name);

impl Customer {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self { facility: Facility::new(name, location), demands: ProductMap::new() }
    }

    /// Records that this customer buys `product`, one quantity per period.
    pub fn add_product(&mut self, product: &Product, demand: Vec<f64>) -> &mut Self {
        self.demands.insert(product.key(), demand);
        self
    }

    pub fn demands(&self) -> &ProductMap<Vec<f64>> {
        &self.demands
    }

    /// Quantity of `product` requested in `period`; `None` if the product is not requested.
    pub fn demand_at(&self, product: &Product, period: usize) -> Option<Result<f64, ModelError>> {
        self.demands
            .get(product.name())
            .map(|series| period_value(series, period, "customer demand"))
    }
}

impl Node for Customer {
    fn kind(&self) -> NodeKind {
        NodeKind::Customer
    }

    fn facility(&self) -> &Facility {
        &self.facility
    }

    fn configured_products(&self) -> Vec<&ProductKey> {
        self.demands.keys().collect()
    }
}
