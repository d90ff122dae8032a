//! Demand records: what a customer needs of a product, period by period.

use super::customer::Customer;
use super::error::{period_value, ModelError};
use super::identity::{NodeKey, NodeKind, Product, ProductKey};
use super::node::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub customer: NodeKey,
    pub product: ProductKey,
    /// Fraction of demand that must be met. 1.0 tolerates no shortfall.
    pub service_level: f64,
    pub demand: Vec<f64>,
    /// Weight of this record when demand is given as scenarios.
    pub probability: f64,
}

impl Demand {
    /// A certain demand (probability 1.0).
    pub fn new(customer: &Customer, product: &Product, demand: Vec<f64>, service_level: f64) -> Self {
        Self {
            customer: customer.key(),
            product: product.key(),
            service_level,
            demand,
            probability: 1.0,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Rejects out-of-range parameters before the record is stored anywhere.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.customer.kind != NodeKind::Customer {
            return Err(ModelError::WrongNodeKind {
                node: self.customer.clone(),
                expected: NodeKind::Customer,
            });
        }
        unit_interval("service_level", self.service_level)?;
        unit_interval("probability", self.probability)
    }

    pub fn matches(&self, customer: &Customer, product: &Product) -> bool {
        self.customer.kind == customer.kind()
            && self.customer.name == customer.name()
            && self.product.0 == product.name()
    }

    pub fn quantity_at(&self, period: usize) -> Result<f64, ModelError> {
        period_value(&self.demand, period, "demand")
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ModelError> {
    // Written so that NaN fails too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::BadParameter { name, value, reason: "must be between 0 and 1" })
    }
}
