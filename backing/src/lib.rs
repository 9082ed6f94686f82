//! The external asset interface the bonded token orchestrates.
//!
//! The token never moves backing units itself; it only calls into a
//! [`BackingAsset`]. Anything implementing the trait (a chain client, an
//! in-memory ledger for tests) can back a token. [`InMemoryAsset`] is a
//! standard transferable-balance asset with allowances.

pub mod asset;
pub mod error;
pub mod memory;

pub use asset::BackingAsset;
pub use error::BackingError;
pub use memory::InMemoryAsset;
