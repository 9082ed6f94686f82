//! Pricing-specific errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("division by zero: supply or price is zero")]
    DivisionByZero,

    #[error("arithmetic overflow in pricing computation")]
    Overflow,

    #[error("tax rate {rate_bps} exceeds denominator {basis_points}")]
    InvalidSchedule { rate_bps: u32, basis_points: u32 },
}
