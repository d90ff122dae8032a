//! Lanes: directed transport or production links between two nodes.

use super::error::{period_value, ModelError};
use super::identity::NodeKey;
use super::node::Node;
use serde::{Deserialize, Serialize};

/// A directed edge from `origin` to `destination`.
///
/// Endpoints are held by identity, so a lane stays valid however the nodes
/// are later configured. The per-period series are either empty (the
/// default applies to every period) or must span the whole horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub origin: NodeKey,
    pub destination: NodeKey,
    pub fixed_cost: f64,
    pub unit_cost: f64,
    pub min_quantity: f64,
    /// Transit lead time in periods.
    pub time: u32,
    /// Units already scheduled to arrive, per period.
    pub initial_arrivals: Vec<i64>,
    pub can_ship: Vec<bool>,
}

impl Lane {
    pub fn new<O, D>(origin: &O, destination: &D) -> Self
    where
        O: Node + ?Sized,
        D: Node + ?Sized,
    {
        Self::between(origin.key(), destination.key())
    }

    pub fn between(origin: NodeKey, destination: NodeKey) -> Self {
        Self {
            origin,
            destination,
            fixed_cost: 0.0,
            unit_cost: 0.0,
            min_quantity: 0.0,
            time: 0,
            initial_arrivals: Vec::new(),
            can_ship: Vec::new(),
        }
    }

    pub fn with_fixed_cost(mut self, cost: f64) -> Self {
        self.fixed_cost = cost;
        self
    }

    pub fn with_unit_cost(mut self, cost: f64) -> Self {
        self.unit_cost = cost;
        self
    }

    pub fn with_min_quantity(mut self, units: f64) -> Self {
        self.min_quantity = units;
        self
    }

    pub fn with_time(mut self, periods: u32) -> Self {
        self.time = periods;
        self
    }

    pub fn with_initial_arrivals(mut self, arrivals: Vec<i64>) -> Self {
        self.initial_arrivals = arrivals;
        self
    }

    pub fn with_can_ship(mut self, can_ship: Vec<bool>) -> Self {
        self.can_ship = can_ship;
        self
    }

    /// Whether units may be sent in `period`. Always true when no schedule is set.
    ///
    /// A non-empty schedule must cover `period`.
    pub fn can_ship_at(&self, period: usize) -> Result<bool, ModelError> {
        if self.can_ship.is_empty() {
            return Ok(true);
        }
        period_value(&self.can_ship, period, "can_ship")
    }

    /// Units scheduled to arrive in `period`. Always zero when no arrivals are set.
    ///
    /// A non-empty series must cover `period`.
    pub fn get_arrivals(&self, period: usize) -> Result<i64, ModelError> {
        if self.initial_arrivals.is_empty() {
            return Ok(0);
        }
        period_value(&self.initial_arrivals, period, "initial_arrivals")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Plant, Supplier};
    use rstest::rstest;

    fn lane() -> Lane {
        let s = Supplier::new("Mine", Location::new(0.0, 0.0));
        let p = Plant::new("Mill", Location::new(0.1, 0.1));
        Lane::new(&s, &p)
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(52)]
    #[case(10_000)]
    fn test_empty_series_use_defaults(#[case] period: usize) {
        let l = lane();
        assert_eq!(l.can_ship_at(period), Ok(true));
        assert_eq!(l.get_arrivals(period), Ok(0));
    }

    #[test]
    fn test_series_are_indexed_by_period() {
        let l = lane()
            .with_can_ship(vec![true, false, true])
            .with_initial_arrivals(vec![0, 12, 0]);
        assert_eq!(l.can_ship_at(1), Ok(false));
        assert_eq!(l.can_ship_at(2), Ok(true));
        assert_eq!(l.get_arrivals(1), Ok(12));
    }

    #[test]
    fn test_short_series_fail_instead_of_wrapping() {
        let l = lane().with_can_ship(vec![false]).with_initial_arrivals(vec![5, 5]);
        assert_eq!(
            l.can_ship_at(1),
            Err(ModelError::PeriodOutOfRange { series: "can_ship", period: 1, len: 1 })
        );
        assert!(matches!(l.get_arrivals(2), Err(ModelError::PeriodOutOfRange { len: 2, .. })));
    }

    #[test]
    fn test_endpoints_are_node_keys() {
        let l = lane().with_unit_cost(2.5).with_time(3);
        assert_eq!(l.origin.name, "Mine");
        assert_eq!(l.destination.to_string(), "plant 'Mill'");
        assert_eq!(l.unit_cost, 2.5);
        assert_eq!(l.time, 3);
    }
}
