//! The `Node` capability contract shared by every facility variant.

use super::error::{Attribute, ModelError};
use super::identity::{Location, NodeKey, NodeKind, Product, ProductKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A per-product attribute mapping.
pub type ProductMap<T> = BTreeMap<ProductKey, T>;

/// Name and location, embedded in every facility variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub(crate) name: String,
    pub location: Location,
}

impl Facility {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self { name: name.into(), location }
    }
}

/// Facility-level open/close economics shared by plants and storages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCosts {
    pub fixed_cost: f64,
    pub opening_cost: f64,
    /// Infinite by default: a site that starts open cannot be closed.
    pub closing_cost: f64,
    pub initial_opened: bool,
}

impl Default for SiteCosts {
    fn default() -> Self {
        Self {
            fixed_cost: 0.0,
            opening_cost: 0.0,
            closing_cost: f64::INFINITY,
            initial_opened: true,
        }
    }
}

/// What every facility can answer.
///
/// A variant exposes a per-product mapping by returning `Some` from the
/// matching hook. The `get_*` accessors do a two-level lookup: a variant
/// without the mapping fails with `MissingCapability`, a product missing from
/// an existing mapping gets the permissive default.
pub trait Node {
    fn kind(&self) -> NodeKind;

    fn facility(&self) -> &Facility;

    fn name(&self) -> &str {
        &self.facility().name
    }

    fn location(&self) -> &Location {
        &self.facility().location
    }

    fn key(&self) -> NodeKey {
        NodeKey::new(self.kind(), self.name())
    }

    fn maximum_throughput(&self) -> Option<&ProductMap<f64>> {
        None
    }

    fn maximum_storage(&self) -> Option<&ProductMap<f64>> {
        None
    }

    fn additional_stock_cover(&self) -> Option<&ProductMap<f64>> {
        None
    }

    /// Products this node holds any per-product attribute for.
    fn configured_products(&self) -> Vec<&ProductKey>;

    /// Maximum units of `product` through this node per period. Infinite when unconfigured.
    fn get_maximum_throughput(&self, product: &Product) -> Result<f64, ModelError> {
        let map = self.maximum_throughput().ok_or_else(|| missing(self, Attribute::MaximumThroughput))?;
        Ok(map.get(product.name()).copied().unwrap_or(f64::INFINITY))
    }

    /// Maximum units of `product` held at this node. Infinite when unconfigured.
    fn get_maximum_storage(&self, product: &Product) -> Result<f64, ModelError> {
        let map = self.maximum_storage().ok_or_else(|| missing(self, Attribute::MaximumStorage))?;
        Ok(map.get(product.name()).copied().unwrap_or(f64::INFINITY))
    }

    /// Extra periods of cover to keep for `product`. Zero when unconfigured.
    fn get_additional_stock_cover(&self, product: &Product) -> Result<f64, ModelError> {
        let map = self
            .additional_stock_cover()
            .ok_or_else(|| missing(self, Attribute::AdditionalStockCover))?;
        Ok(map.get(product.name()).copied().unwrap_or(0.0))
    }
}

fn missing<N: Node + ?Sized>(node: &N, attribute: Attribute) -> ModelError {
    ModelError::MissingCapability { node: node.key(), attribute }
}
