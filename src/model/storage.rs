//! Storage locations: warehouses and distribution centres.

use super::identity::{name_identity, Location, NodeKind, Product, ProductKey};
use super::node::{Facility, Node, ProductMap, SiteCosts};
use serde::{Deserialize, Serialize};

/// Per-product configuration of a storage location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageProduct {
    pub initial_inventory: f64,
    pub unit_handling_cost: f64,
    pub maximum_throughput: f64,
    pub maximum_units: f64,
    pub additional_stock_cover: f64,
}

impl Default for StorageProduct {
    fn default() -> Self {
        Self {
            initial_inventory: 0.0,
            unit_handling_cost: 0.0,
            maximum_throughput: f64::INFINITY,
            maximum_units: f64::INFINITY,
            additional_stock_cover: 0.0,
        }
    }
}

impl StorageProduct {
    pub fn with_initial_inventory(mut self, units: f64) -> Self {
        self.initial_inventory = units;
        self
    }

    pub fn with_unit_handling_cost(mut self, cost: f64) -> Self {
        self.unit_handling_cost = cost;
        self
    }

    pub fn with_maximum_throughput(mut self, units: f64) -> Self {
        self.maximum_throughput = units;
        self
    }

    pub fn with_maximum_units(mut self, units: f64) -> Self {
        self.maximum_units = units;
        self
    }

    pub fn with_additional_stock_cover(mut self, periods: f64) -> Self {
        self.additional_stock_cover = periods;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    facility: Facility,
    pub costs: SiteCosts,
    initial_inventory: ProductMap<f64>,
    unit_handling_cost: ProductMap<f64>,
    maximum_throughput: ProductMap<f64>,
    maximum_units: ProductMap<f64>,
    additional_stock_cover: ProductMap<f64>,
}

name_identity!(Storage => facility.name);

impl Storage {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            facility: Facility::new(name, location),
            costs: SiteCosts::default(),
            initial_inventory: ProductMap::new(),
            unit_handling_cost: ProductMap::new(),
            maximum_throughput: ProductMap::new(),
            maximum_units: ProductMap::new(),
            additional_stock_cover: ProductMap::new(),
        }
    }

    pub fn with_costs(mut self, costs: SiteCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Declares that `product` can be stored here. Re-adding replaces the terms.
    pub fn add_product(&mut self, product: &Product, terms: StorageProduct) -> &mut Self {
        let key = product.key();
        self.initial_inventory.insert(key.clone(), terms.initial_inventory);
        self.unit_handling_cost.insert(key.clone(), terms.unit_handling_cost);
        self.maximum_throughput.insert(key.clone(), terms.maximum_throughput);
        self.maximum_units.insert(key.clone(), terms.maximum_units);
        self.additional_stock_cover.insert(key, terms.additional_stock_cover);
        self
    }

    pub fn initial_inventory(&self, product: &Product) -> Option<f64> {
        self.initial_inventory.get(product.name()).copied()
    }

    pub fn unit_handling_cost(&self, product: &Product) -> Option<f64> {
        self.unit_handling_cost.get(product.name()).copied()
    }
}

impl Node for Storage {
    fn kind(&self) -> NodeKind {
        NodeKind::Storage
    }

    fn facility(&self) -> &Facility {
        &self.facility
    }

    fn maximum_throughput(&self) -> Option<&ProductMap<f64>> {
        Some(&self.maximum_throughput)
    }

    fn maximum_storage(&self) -> Option<&ProductMap<f64>> {
        Some(&self.maximum_units)
    }

    fn additional_stock_cover(&self) -> Option<&ProductMap<f64>> {
        Some(&self.additional_stock_cover)
    }

    fn configured_products(&self) -> Vec<&ProductKey> {
        self.initial_inventory.keys().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse() -> Storage {
        Storage::new("DC North", Location::new(0.9, 0.2))
    }

    #[test]
    fn test_defaults_before_and_after_configuration() {
        let mut dc = warehouse();
        let p = Product::new("widget", 0.5);
        let q = Product::new("gadget", 0.5);
        assert_eq!(dc.get_maximum_storage(&p), Ok(f64::INFINITY));
        assert_eq!(dc.get_additional_stock_cover(&p), Ok(0.0));

        dc.add_product(
            &p,
            StorageProduct::default()
                .with_initial_inventory(40.0)
                .with_maximum_units(100.0)
                .with_maximum_throughput(25.0)
                .with_additional_stock_cover(2.0),
        );

        assert_eq!(dc.get_maximum_storage(&p), Ok(100.0));
        assert_eq!(dc.get_maximum_throughput(&p), Ok(25.0));
        assert_eq!(dc.get_additional_stock_cover(&p), Ok(2.0));
        assert_eq!(dc.initial_inventory(&p), Some(40.0));
        assert_eq!(dc.unit_handling_cost(&p), Some(0.0));

        assert_eq!(dc.get_maximum_storage(&q), Ok(f64::INFINITY));
        assert_eq!(dc.get_additional_stock_cover(&q), Ok(0.0));
        assert_eq!(dc.initial_inventory(&q), None);
    }

    #[test]
    fn test_site_costs_default_to_open_and_unclosable() {
        let dc = warehouse();
        assert!(dc.costs.initial_opened);
        assert!(dc.costs.closing_cost.is_infinite());
        assert_eq!(dc.costs.fixed_cost, 0.0);
    }
}
