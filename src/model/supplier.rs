//! Suppliers: sources of products at a per-unit cost.

use super::identity::{name_identity, Location, NodeKind, Product, ProductKey};
use super::node::{Facility, Node, ProductMap};
use serde::{Deserialize, Serialize};

/// Terms under which a supplier offers one product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplierProduct {
    pub unit_cost: f64,
    pub maximum_throughput: f64,
}

impl SupplierProduct {
    /// Unlimited supply at `unit_cost`.
    pub fn new(unit_cost: f64) -> Self {
        Self { unit_cost, maximum_throughput: f64::INFINITY }
    }

    pub fn with_maximum_throughput(mut self, maximum_throughput: f64) -> Self {
        self.maximum_throughput = maximum_throughput;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    facility: Facility,
    unit_cost: ProductMap<f64>,
    maximum_throughput: ProductMap<f64>,
}

name_identity!(Supplier => facility.name);

impl Supplier {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            facility: Facility::new(name, location),
            unit_cost: ProductMap::new(),
            maximum_throughput: ProductMap::new(),
        }
    }

    /// Declares that this supplier can provide `product`. Re-adding replaces the terms.
    pub fn add_product(&mut self, product: &Product, terms: SupplierProduct) -> &mut Self {
        self.unit_cost.insert(product.key(), terms.unit_cost);
        self.maximum_throughput.insert(product.key(), terms.maximum_throughput);
        self
    }

    pub fn unit_cost(&self, product: &Product) -> Option<f64> {
        self.unit_cost.get(product.name()).copied()
    }

    pub fn supplies(&self, product: &Product) -> bool {
        self.unit_cost.contains_key(product.name())
    }
}

impl Node for Supplier {
    fn kind(&self) -> NodeKind {
        NodeKind::Supplier
    }

    fn facility(&self) -> &Facility {
        &self.facility
    }

    fn maximum_throughput(&self) -> Option<&ProductMap<f64>> {
        Some(&self.maximum_throughput)
    }

    fn configured_products(&self) -> Vec<&ProductKey> {
        self.unit_cost.keys().collect()
    }
}
