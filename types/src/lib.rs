//! Fundamental types for the Ballast ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, 256-bit amounts with the fixed-point scale, and the
//! deployment-time token parameters.

pub mod account;
pub mod amount;
pub mod error;
pub mod params;

pub use account::Account;
pub use amount::{Amount, BASIS_POINTS, SCALE};
pub use error::TypesError;
pub use params::TokenParams;
