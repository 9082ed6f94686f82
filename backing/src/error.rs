use ballast_ledger::LedgerError;
use ballast_types::Amount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackingError {
    #[error("insufficient asset balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("insufficient asset allowance: need {needed}, available {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    #[error("asset arithmetic overflow")]
    Overflow,

    #[error("asset rejected transfer: {0}")]
    Rejected(String),
}

impl From<LedgerError> for BackingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                needed, available, ..
            } => BackingError::InsufficientBalance { needed, available },
            LedgerError::InsufficientAllowance { needed, available } => {
                BackingError::InsufficientAllowance { needed, available }
            }
            LedgerError::Overflow => BackingError::Overflow,
        }
    }
}
