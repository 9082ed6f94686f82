//! Nullable infrastructure for deterministic testing.
//!
//! The bonded token's only external dependency is its backing asset. This
//! crate provides a test-friendly implementation that:
//! - Holds real balances and allowances in memory
//! - Can be told to fail its next transfers, by error or by `false`
//! - Can run a callback in the middle of a transfer, to drive reentrant calls
//! - Records every transfer it was asked to perform
//!
//! Usage: swap a real asset client for a `NullAsset` in tests.

pub mod asset;

pub use asset::{AssetCall, FailureMode, NullAsset};
