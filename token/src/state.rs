//! Mutable ledger state owned by one token.

use ballast_ledger::{AllowanceBook, BalanceLedger, ExclusionRegistry};
use ballast_types::Account;

/// Everything a token mutates, in one place.
///
/// Constructed once with the token and only changed through the token's
/// operations. `owner` and the holding account are immutable and live on
/// the token itself.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub balances: BalanceLedger,
    pub allowances: AllowanceBook,
    pub excluded: ExclusionRegistry,
    pub tax_collector: Account,
    pub initialized: bool,
}

impl LedgerState {
    /// Fresh state: no supply, `holding` and `tax_collector` exempt from tax.
    pub fn new(holding: Account, tax_collector: Account) -> Self {
        let mut excluded = ExclusionRegistry::new();
        excluded.set(&holding, true);
        excluded.set(&tax_collector, true);
        Self {
            balances: BalanceLedger::new(),
            allowances: AllowanceBook::new(),
            excluded,
            tax_collector,
            initialized: false,
        }
    }
}
