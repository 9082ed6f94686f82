//! Narrow capability traits composed into the token service.
//!
//! Each trait covers one concern. [`crate::BondedToken`] implements all
//! four; callers can depend on just the capability they use.

use ballast_types::{Account, Amount};

use crate::error::TokenError;
use crate::guard::{Entered, ReentrancyGuard};

/// Standard transferable-balance operations.
pub trait Transferable {
    fn total_supply(&self) -> Amount;

    fn balance_of(&self, account: &Account) -> Amount;

    fn allowance(&self, owner: &Account, spender: &Account) -> Amount;

    /// Set `spender`'s allowance on `caller`'s balance (overwrites).
    fn approve(&self, caller: &Account, spender: &Account, amount: Amount)
        -> Result<bool, TokenError>;

    /// Move `amount` from `caller` to `to`, applying transfer tax unless
    /// either side is excluded.
    fn transfer(&self, caller: &Account, to: &Account, amount: Amount)
        -> Result<bool, TokenError>;

    /// Like [`Transferable::transfer`] from `from`, consuming `caller`'s
    /// allowance on `from`.
    fn transfer_from(
        &self,
        caller: &Account,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<bool, TokenError>;
}

/// Holder-initiated supply destruction.
pub trait Burnable {
    fn burn(&self, caller: &Account, amount: Amount) -> Result<(), TokenError>;

    /// Burn from `from`, consuming `caller`'s allowance on `from`.
    fn burn_from(&self, caller: &Account, from: &Account, amount: Amount)
        -> Result<(), TokenError>;
}

/// A single designated owner gates administrative operations.
pub trait OwnerGated {
    fn owner(&self) -> Account;

    fn ensure_owner(&self, caller: &Account) -> Result<(), TokenError> {
        if *caller != self.owner() {
            return Err(TokenError::Unauthorized(*caller));
        }
        Ok(())
    }
}

/// Mutating operations run under a scoped reentrancy guard.
pub trait ReentrancyGuarded {
    fn reentrancy_guard(&self) -> &ReentrancyGuard;

    fn enter(&self) -> Result<Entered<'_>, TokenError> {
        let entered = self.reentrancy_guard().enter();
        if entered.is_err() {
            tracing::warn!("reentrant call rejected");
        }
        entered
    }
}
