//! Account-balance ledger for the bonded token.
//!
//! Every balance mutation goes through [`BalanceLedger`], which keeps the
//! per-account map and the aggregate supply in lockstep:
//! `total_supply == Σ balances` holds after every successful call, and a
//! failed call leaves both untouched.
//!
//! The crate also holds the two per-account side tables the transfer path
//! consults: delegated allowances and the tax-exclusion registry.

pub mod allowance;
pub mod balances;
pub mod error;
pub mod exclusion;

pub use allowance::AllowanceBook;
pub use balances::BalanceLedger;
pub use error::LedgerError;
pub use exclusion::ExclusionRegistry;
