//! Delegated spending allowances.

use std::collections::HashMap;

use ballast_types::{Account, Amount};

use crate::error::LedgerError;

/// `(owner, spender) → remaining allowance`.
///
/// An allowance of `Amount::MAX` is treated as unlimited and is never
/// decremented by [`AllowanceBook::spend`].
#[derive(Clone, Debug, Default)]
pub struct AllowanceBook {
    allowances: HashMap<(Account, Account), Amount>,
}

impl AllowanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowance(&self, owner: &Account, spender: &Account) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the allowance (not additive).
    pub fn approve(&mut self, owner: &Account, spender: &Account, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    /// Verify that `spend(owner, spender, amount)` would succeed.
    pub fn check_spend(
        &self,
        owner: &Account,
        spender: &Account,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Consume `amount` of the allowance.
    pub fn spend(
        &mut self,
        owner: &Account,
        spender: &Account,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.check_spend(owner, spender, amount)?;
        let available = self.allowance(owner, spender);
        if available != Amount::MAX {
            self.approve(owner, spender, available - amount);
        }
        Ok(())
    }
}
