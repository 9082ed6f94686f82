//! In-memory transferable asset.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ballast_ledger::{AllowanceBook, BalanceLedger};
use ballast_types::{Account, Amount};

use crate::asset::BackingAsset;
use crate::error::BackingError;

#[derive(Default)]
struct AssetBook {
    balances: BalanceLedger,
    allowances: AllowanceBook,
}

/// A thread-safe in-memory asset with balances and allowances.
///
/// Suitable as the backing asset of a token in tests and simulations, and
/// as a foreign asset for emergency-withdrawal scenarios.
pub struct InMemoryAsset {
    id: Account,
    book: Mutex<AssetBook>,
}

impl InMemoryAsset {
    pub fn new(id: Account) -> Self {
        Self {
            id,
            book: Mutex::new(AssetBook::default()),
        }
    }

    /// Create `amount` new units in `to`.
    pub fn mint(&self, to: &Account, amount: Amount) -> Result<(), BackingError> {
        self.book().balances.credit(to, amount)?;
        Ok(())
    }

    pub fn approve(&self, owner: &Account, spender: &Account, amount: Amount) {
        self.book().allowances.approve(owner, spender, amount);
    }

    pub fn allowance(&self, owner: &Account, spender: &Account) -> Amount {
        self.book().allowances.allowance(owner, spender)
    }

    pub fn total_supply(&self) -> Amount {
        self.book().balances.total_supply()
    }

    fn book(&self) -> MutexGuard<'_, AssetBook> {
        // Every mutation validates before writing, so a poisoned book is
        // still consistent.
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BackingAsset for InMemoryAsset {
    fn asset_id(&self) -> Account {
        self.id
    }

    fn balance_of(&self, account: &Account) -> Amount {
        self.book().balances.balance_of(account)
    }

    fn transfer_from(
        &self,
        spender: &Account,
        owner: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<bool, BackingError> {
        if to.is_zero() {
            return Err(BackingError::Rejected("transfer to the null account".into()));
        }
        let mut book = self.book();
        book.allowances.check_spend(owner, spender, amount)?;
        book.balances.check_debit(owner, amount)?;
        book.allowances.spend(owner, spender, amount)?;
        book.balances.move_balance(owner, to, amount)?;
        Ok(true)
    }

    fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<bool, BackingError> {
        if to.is_zero() {
            return Err(BackingError::Rejected("transfer to the null account".into()));
        }
        self.book().balances.move_balance(from, to, amount)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u64) -> Account {
        Account::from_low_u64(n)
    }

    fn funded(holder: Account, amount: u64) -> InMemoryAsset {
        let asset = InMemoryAsset::new(acct(0xa55e7));
        asset.mint(&holder, Amount::from(amount)).unwrap();
        asset
    }

    #[test]
    fn transfer_moves_balance() {
        let asset = funded(acct(1), 100);
        assert!(asset.transfer(&acct(1), &acct(2), Amount::from(40)).unwrap());
        assert_eq!(asset.balance_of(&acct(1)), Amount::from(60));
        assert_eq!(asset.balance_of(&acct(2)), Amount::from(40));
        assert_eq!(asset.total_supply(), Amount::from(100));
    }

    #[test]
    fn transfer_beyond_balance_fails() {
        let asset = funded(acct(1), 10);
        let err = asset.transfer(&acct(1), &acct(2), Amount::from(11)).unwrap_err();
        assert_eq!(
            err,
            BackingError::InsufficientBalance {
                needed: Amount::from(11),
                available: Amount::from(10),
            }
        );
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let asset = funded(acct(1), 100);
        asset.approve(&acct(1), &acct(9), Amount::from(50));
        assert!(asset
            .transfer_from(&acct(9), &acct(1), &acct(2), Amount::from(30))
            .unwrap());
        assert_eq!(asset.allowance(&acct(1), &acct(9)), Amount::from(20));
        assert_eq!(asset.balance_of(&acct(2)), Amount::from(30));
    }

    #[test]
    fn transfer_from_without_allowance_fails_cleanly() {
        let asset = funded(acct(1), 100);
        let result = asset.transfer_from(&acct(9), &acct(1), &acct(2), Amount::from(1));
        assert!(matches!(result, Err(BackingError::InsufficientAllowance { .. })));
        assert_eq!(asset.balance_of(&acct(1)), Amount::from(100));
    }

    #[test]
    fn transfer_from_with_allowance_but_no_funds_keeps_allowance() {
        let asset = funded(acct(1), 5);
        asset.approve(&acct(1), &acct(9), Amount::from(50));
        let result = asset.transfer_from(&acct(9), &acct(1), &acct(2), Amount::from(10));
        assert!(matches!(result, Err(BackingError::InsufficientBalance { .. })));
        assert_eq!(asset.allowance(&acct(1), &acct(9)), Amount::from(50));
    }

    #[test]
    fn null_recipient_rejected() {
        let asset = funded(acct(1), 5);
        assert!(matches!(
            asset.transfer(&acct(1), &Account::ZERO, Amount::from(1)),
            Err(BackingError::Rejected(_))
        ));
    }
}
