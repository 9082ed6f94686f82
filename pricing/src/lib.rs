//! Pricing: the bonding-curve oracle and the transfer-tax rule.
//!
//! Price is a derived value, never stored:
//! `price = floor(backing_held × SCALE / total_supply)`
//!
//! This crate handles:
//! - Price computation from live backing and supply
//! - Mint and redeem conversions at a given price
//! - Splitting a transfer into burn, collector share and net amount
//!
//! Every function is pure, so the mutating token operations and their
//! previews share one code path and stay bit-identical.

pub mod curve;
pub mod error;
pub mod tax;

pub use curve::{mint_quote, price, redeem_quote, MintQuote, RedeemQuote};
pub use error::PricingError;
pub use tax::{TaxSchedule, TaxSplit};
