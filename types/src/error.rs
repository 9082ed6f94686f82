//! Errors raised while constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("invalid token parameters: {0}")]
    InvalidParams(String),
}
