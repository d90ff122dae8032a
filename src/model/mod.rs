//! Entity types of the supply-chain network: products, the four facility
//! variants, lanes between them, and customer demand.
pub mod bom;
pub mod customer;
pub mod demand;
pub mod error;
pub mod identity;
pub mod lane;
pub mod node;
pub mod plant;
pub mod storage;
pub mod supplier;

// Re-export key types for convenient access
pub use bom::{BillOfMaterials, RecipeTable};
pub use customer::Customer;
pub use demand::Demand;
pub use error::{Attribute, ModelError};
pub use identity::{Location, NodeKey, NodeKind, Product, ProductKey};
pub use lane::Lane;
pub use node::{Facility, Node, ProductMap, SiteCosts};
pub use plant::{Plant, PlantProduct};
pub use storage::{Storage, StorageProduct};
pub use supplier::{Supplier, SupplierProduct};
