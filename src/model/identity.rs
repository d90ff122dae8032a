//! Identity types: products, coordinates, and the keys that name nodes.
//!
//! Every product and facility is identified by its name alone. Collections in
//! the network are keyed explicitly by [`ProductKey`] / [`NodeKey`] so that no
//! mutable attribute can leak into a key.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Implements `PartialEq`, `Eq` and `Hash` on the name field only.
macro_rules! name_identity {
    ($ty:ty => $($field:ident).+) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.$($field).+ == other.$($field).+
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&self.$($field).+, state);
            }
        }
    };
}
pub(crate) use name_identity;

/// The name of a product, used as the key of every per-product mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductKey(pub String);

impl Borrow<str> for ProductKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A product moving through the network.
///
/// Two products with the same name are the same product, whatever their
/// holding cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    name: String,
    /// Cost of holding one unit in stock for one period.
    pub unit_holding_cost: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_holding_cost: f64) -> Self {
        Self { name: name.into(), unit_holding_cost }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> ProductKey {
        ProductKey(self.name.clone())
    }
}

name_identity!(Product => name);

/// A coordinate pair. Latitude and longitude are in radians.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, name: None }
    }

    pub fn named(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self { latitude, longitude, name: Some(name.into()) }
    }
}

/// The four facility variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Supplier,
    Plant,
    Storage,
    Customer,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Supplier => "supplier",
            NodeKind::Plant => "plant",
            NodeKind::Storage => "storage",
            NodeKind::Customer => "customer",
        })
    }
}

/// Identity of a node: its variant plus its name.
///
/// A supplier and a customer that happen to share a name are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeKey {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into() }
    }
}

// Hash on the name only; equality still separates variants.
impl Hash for NodeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}
