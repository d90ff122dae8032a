//! In-memory model of a multi-echelon, multi-period, multi-product supply
//! chain: facilities as nodes, lanes as directed edges, and time-indexed
//! customer demand.
//!
//! The crate only builds and queries the network. Solving flows over it is
//! left to whatever engine consumes the finished [`SupplyChainNetwork`].
//!
//! - [`model`]: products, facility variants, lanes, demand records
//! - [`network`]: the aggregate root and its lane adjacency index
//! - [`validation`]: integrity checks on an assembled network
//! - [`analysis`]: great-circle distances for pricing lanes

pub mod analysis;
pub mod model;
pub mod network;
pub mod validation;

pub use model::{
    Customer, Demand, Lane, Location, ModelError, Node, NodeKey, NodeKind, Plant, Product, Storage,
    Supplier,
};
pub use network::{LaneId, PlanningSettings, SupplyChainNetwork};
