//! Bonded token: a ledger token minted against, and redeemable for, a
//! backing asset at a bonding-curve price.
//!
//! `price = floor(backing_held × SCALE / total_supply)`
//!
//! Mints and redemptions move both sides of that ratio together and leave
//! the price unchanged. Burns, including the burned half of the transfer
//! tax, shrink supply with backing untouched, so the price only ever rises.
//!
//! This crate handles:
//! - One-time seeding of the ledger by the owner
//! - Mint and redeem against the backing asset
//! - Transfers with the burn-and-collect tax and the exclusion registry
//! - Owner administration (exclusions, tax collector, emergency withdrawal)
//! - Reentrancy protection and events

pub mod capability;
pub mod config;
pub mod error;
pub mod event;
pub mod guard;
pub mod state;
pub mod token;
mod transfer;

pub use capability::{Burnable, OwnerGated, ReentrancyGuarded, Transferable};
pub use config::{ConfigError, TokenConfig};
pub use error::TokenError;
pub use event::{EventBus, TokenEvent};
pub use guard::{Entered, ReentrancyGuard};
pub use state::LedgerState;
pub use token::{AuditReport, BondedToken, Stats, TokenMetadata};
