use ballast_types::{Account, Amount};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient balance for {account}: need {needed}, available {available}")]
    InsufficientBalance {
        account: Account,
        needed: Amount,
        available: Amount,
    },

    #[error("insufficient allowance: need {needed}, available {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    #[error("arithmetic overflow in ledger mutation")]
    Overflow,
}
