//! Per-account balances and the aggregate supply counter.

use std::collections::HashMap;

use ballast_types::{Account, Amount};

use crate::error::LedgerError;

/// Sparse account → balance map plus `total_supply`.
///
/// Absent keys read as zero and zeroed balances are dropped from the map,
/// so `len()` counts holders, not every account ever touched.
#[derive(Clone, Debug, Default)]
pub struct BalanceLedger {
    balances: HashMap<Account, Amount>,
    total_supply: Amount,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Number of accounts holding a non-zero balance.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterate over all non-zero balances.
    pub fn iter(&self) -> impl Iterator<Item = (&Account, &Amount)> {
        self.balances.iter()
    }

    /// Checked sum of every balance. `None` only if the map is corrupt
    /// enough to overflow 256 bits.
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::zero(), |acc, b| acc.checked_add(*b))
    }

    /// Verify that `credit(account, amount)` would succeed, without mutating.
    pub fn check_credit(&self, account: &Account, amount: Amount) -> Result<(), LedgerError> {
        self.total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Verify that `debit(account, amount)` would succeed, without mutating.
    pub fn check_debit(&self, account: &Account, amount: Amount) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *account,
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Mint `amount` into `account`, growing supply by the same amount.
    pub fn credit(&mut self, account: &Account, amount: Amount) -> Result<(), LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.total_supply = supply;
        self.store(account, balance);
        Ok(())
    }

    /// Remove `amount` from `account` and from supply. A debit with no
    /// matching credit is a burn.
    pub fn debit(&mut self, account: &Account, amount: Amount) -> Result<(), LedgerError> {
        self.check_debit(account, amount)?;
        let balance = self.balance_of(account) - amount;
        // Σ balances == total_supply and balance >= amount, so supply >= amount.
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        self.total_supply = supply;
        self.store(account, balance);
        Ok(())
    }

    /// Move `amount` from `from` to `to` with no tax; supply is unchanged.
    pub fn move_balance(
        &mut self,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.check_debit(from, amount)?;
        if from == to {
            return Ok(());
        }
        let from_balance = self.balance_of(from) - amount;
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.store(from, from_balance);
        self.store(to, to_balance);
        Ok(())
    }

    fn store(&mut self, account: &Account, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, balance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u64) -> Account {
        Account::from_low_u64(n)
    }

    fn amt(n: u64) -> Amount {
        Amount::from(n)
    }

    #[test]
    fn empty_ledger_reads_zero() {
        let ledger = BalanceLedger::new();
        assert_eq!(ledger.balance_of(&acct(1)), Amount::zero());
        assert_eq!(ledger.total_supply(), Amount::zero());
        assert!(ledger.is_empty());
    }

    #[test]
    fn credit_grows_balance_and_supply() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), amt(100)).unwrap();
        ledger.credit(&acct(2), amt(50)).unwrap();
        ledger.credit(&acct(1), amt(25)).unwrap();
        assert_eq!(ledger.balance_of(&acct(1)), amt(125));
        assert_eq!(ledger.balance_of(&acct(2)), amt(50));
        assert_eq!(ledger.total_supply(), amt(175));
        assert_eq!(ledger.sum_of_balances(), Some(amt(175)));
    }

    #[test]
    fn debit_shrinks_balance_and_supply() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), amt(100)).unwrap();
        ledger.debit(&acct(1), amt(40)).unwrap();
        assert_eq!(ledger.balance_of(&acct(1)), amt(60));
        assert_eq!(ledger.total_supply(), amt(60));
    }

    #[test]
    fn debit_beyond_balance_fails_without_mutation() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), amt(100)).unwrap();
        let err = ledger.debit(&acct(1), amt(101)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account: acct(1),
                needed: amt(101),
                available: amt(100),
            }
        );
        assert_eq!(ledger.balance_of(&acct(1)), amt(100));
        assert_eq!(ledger.total_supply(), amt(100));
    }

    #[test]
    fn full_debit_drops_the_entry() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), amt(10)).unwrap();
        ledger.debit(&acct(1), amt(10)).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_supply(), Amount::zero());
    }

    #[test]
    fn move_preserves_supply() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), amt(100)).unwrap();
        ledger.move_balance(&acct(1), &acct(2), amt(30)).unwrap();
        assert_eq!(ledger.balance_of(&acct(1)), amt(70));
        assert_eq!(ledger.balance_of(&acct(2)), amt(30));
        assert_eq!(ledger.total_supply(), amt(100));
    }

    #[test]
    fn move_to_self_is_noop() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), amt(100)).unwrap();
        ledger.move_balance(&acct(1), &acct(1), amt(100)).unwrap();
        assert_eq!(ledger.balance_of(&acct(1)), amt(100));
        assert!(ledger.move_balance(&acct(1), &acct(1), amt(101)).is_err());
    }

    #[test]
    fn credit_overflow_rejected() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(&acct(1), Amount::MAX).unwrap();
        assert_eq!(ledger.credit(&acct(2), amt(1)), Err(LedgerError::Overflow));
        assert_eq!(ledger.check_credit(&acct(1), amt(1)), Err(LedgerError::Overflow));
        assert_eq!(ledger.balance_of(&acct(2)), Amount::zero());
        assert_eq!(ledger.total_supply(), Amount::MAX);
    }
}
