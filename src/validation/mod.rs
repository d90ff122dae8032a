//! Integrity checks for an assembled network.
//!
//! This module provides the `Validator`, which runs a series of structural
//! checks after the network is built and *before* it is handed to a
//! consumer: dangling references, unregistered products, series that do not
//! span the horizon, and circular recipes.

// Publicly export the primary components for use by other modules.
pub use self::error::{ValidationError, ValidationErrorType};
pub use self::validator::Validator;

// --- MODULE DECLARATIONS ---
mod error;
mod validator;
mod rules {
    pub mod bom;
    pub mod horizon;
    pub mod references;
}
