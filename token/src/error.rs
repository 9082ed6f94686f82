//! Token-level errors.
//!
//! Every variant is a rejected operation: state is left exactly as it was
//! before the call began.

use ballast_backing::BackingError;
use ballast_ledger::LedgerError;
use ballast_pricing::PricingError;
use ballast_types::{Account, Amount, TypesError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has not been initialized")]
    NotInitialized,

    #[error("token is already initialized")]
    AlreadyInitialized,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("amount converts to zero at the current price")]
    AmountTooSmall,

    #[error("insufficient balance for {account}: need {needed}, available {available}")]
    InsufficientBalance {
        account: Account,
        needed: Amount,
        available: Amount,
    },

    #[error("insufficient allowance: need {needed}, available {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    #[error("insufficient backing held: need {needed}, available {available}")]
    InsufficientBacking { needed: Amount, available: Amount },

    #[error("the null account is not allowed here")]
    InvalidAccount,

    #[error("backing asset transfer failed: {0}")]
    BackingTransferFailed(String),

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("division by zero: total supply is zero")]
    DivisionByZero,

    #[error("reentrant call rejected")]
    ReentrancyDetected,

    #[error("caller {0} is not the owner")]
    Unauthorized(Account),

    #[error("the backing asset cannot be withdrawn")]
    CannotWithdrawBacking,

    #[error("invalid token parameters: {0}")]
    InvalidParams(String),
}

impl From<LedgerError> for TokenError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                account,
                needed,
                available,
            } => TokenError::InsufficientBalance {
                account,
                needed,
                available,
            },
            LedgerError::InsufficientAllowance { needed, available } => {
                TokenError::InsufficientAllowance { needed, available }
            }
            LedgerError::Overflow => TokenError::ArithmeticOverflow,
        }
    }
}

impl From<PricingError> for TokenError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::DivisionByZero => TokenError::DivisionByZero,
            PricingError::Overflow => TokenError::ArithmeticOverflow,
            e @ PricingError::InvalidSchedule { .. } => TokenError::InvalidParams(e.to_string()),
        }
    }
}

impl From<BackingError> for TokenError {
    fn from(err: BackingError) -> Self {
        TokenError::BackingTransferFailed(err.to_string())
    }
}

impl From<TypesError> for TokenError {
    fn from(err: TypesError) -> Self {
        TokenError::InvalidParams(err.to_string())
    }
}
