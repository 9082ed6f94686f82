//! Accounts exempt from transfer tax.

use std::collections::HashSet;

use ballast_types::Account;

/// Set of tax-exempt accounts. Absent accounts are not excluded.
#[derive(Clone, Debug, Default)]
pub struct ExclusionRegistry {
    excluded: HashSet<Account>,
}

impl ExclusionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_excluded(&self, account: &Account) -> bool {
        self.excluded.contains(account)
    }

    /// True if a transfer between `from` and `to` is untaxed.
    pub fn exempts(&self, from: &Account, to: &Account) -> bool {
        self.is_excluded(from) || self.is_excluded(to)
    }

    /// Set the flag for `account`. Returns whether the flag changed.
    pub fn set(&mut self, account: &Account, excluded: bool) -> bool {
        if excluded {
            self.excluded.insert(*account)
        } else {
            self.excluded.remove(account)
        }
    }

    /// Move an exemption from `old` to `new` in one step.
    ///
    /// Used when the tax collector changes: the old collector loses its flag
    /// and the new one gains it. Reassigning to the same account keeps it
    /// excluded.
    pub fn reassign(&mut self, old: &Account, new: &Account) {
        self.excluded.remove(old);
        self.excluded.insert(*new);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.excluded.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u64) -> Account {
        Account::from_low_u64(n)
    }

    #[test]
    fn absent_account_is_not_excluded() {
        let registry = ExclusionRegistry::new();
        assert!(!registry.is_excluded(&acct(1)));
        assert!(!registry.exempts(&acct(1), &acct(2)));
    }

    #[test]
    fn either_side_exempts() {
        let mut registry = ExclusionRegistry::new();
        registry.set(&acct(1), true);
        assert!(registry.exempts(&acct(1), &acct(2)));
        assert!(registry.exempts(&acct(2), &acct(1)));
        assert!(!registry.exempts(&acct(2), &acct(3)));
    }

    #[test]
    fn set_reports_change() {
        let mut registry = ExclusionRegistry::new();
        assert!(registry.set(&acct(1), true));
        assert!(!registry.set(&acct(1), true));
        assert!(registry.set(&acct(1), false));
        assert!(!registry.set(&acct(1), false));
    }

    #[test]
    fn reassign_moves_flag() {
        let mut registry = ExclusionRegistry::new();
        registry.set(&acct(1), true);
        registry.reassign(&acct(1), &acct(2));
        assert!(!registry.is_excluded(&acct(1)));
        assert!(registry.is_excluded(&acct(2)));
    }

    #[test]
    fn reassign_to_same_account_keeps_flag() {
        let mut registry = ExclusionRegistry::new();
        registry.set(&acct(1), true);
        registry.reassign(&acct(1), &acct(1));
        assert!(registry.is_excluded(&acct(1)));
    }
}
