//! Defines the error type shared by the model and network modules.
use super::identity::{NodeKey, NodeKind, ProductKey};
use std::fmt;
use thiserror::Error;

/// A per-product attribute mapping that a node variant may or may not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    MaximumThroughput,
    MaximumStorage,
    AdditionalStockCover,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::MaximumThroughput => "maximum throughput",
            Attribute::MaximumStorage => "maximum storage",
            Attribute::AdditionalStockCover => "additional stock cover",
        })
    }
}

/// Every synchronous failure the network layer can report.
///
/// None of these are transient: each one is a caller error and is surfaced
/// to the operation that triggered it without touching any state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{attribute} is not defined for {node}")]
    MissingCapability { node: NodeKey, attribute: Attribute },

    #[error("invalid {name} = {value}: {reason}")]
    BadParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("plant '{plant}' has no bill of materials entry for input '{input}' of output '{output}'")]
    MissingBomEntry {
        plant: String,
        output: ProductKey,
        input: ProductKey,
    },

    /// A non-empty series was indexed past its end. Series must span the horizon.
    #[error("period {period} is outside the {series} series of length {len}")]
    PeriodOutOfRange {
        series: &'static str,
        period: usize,
        len: usize,
    },

    #[error("bill of materials of plant '{plant}' contains a cycle through '{product}'")]
    BomCycle { plant: String, product: ProductKey },

    #[error("{node} cannot be used where a {expected} is required")]
    WrongNodeKind { node: NodeKey, expected: NodeKind },

    /// A loaded entity is filed under a key other than its own name.
    #[error("entry stored under '{key}' is named '{name}'")]
    KeyMismatch { key: String, name: String },
}

/// Returns `series[period]`, or a `PeriodOutOfRange` error naming the series.
pub(crate) fn period_value<T: Copy>(
    series: &[T],
    period: usize,
    name: &'static str,
) -> Result<T, ModelError> {
    series
        .get(period)
        .copied()
        .ok_or(ModelError::PeriodOutOfRange {
            series: name,
            period,
            len: series.len(),
        })
}
