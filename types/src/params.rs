//! Deployment-time token parameters.
//!
//! The tax rate and the seed pair are fixed when a token is constructed and
//! never change afterwards; no operation takes a per-call override.

use serde::{Deserialize, Serialize};

use crate::amount::{Amount, BASIS_POINTS, SCALE};
use crate::error::TypesError;

/// Engine parameters fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    /// Transfer tax numerator, in basis points of `basis_points`.
    /// Default: 100 (1%).
    pub tax_rate_bps: u32,

    /// Tax denominator. Default: 10 000.
    pub basis_points: u32,

    /// Backing-asset amount pulled from the owner by `initialize`.
    pub seed_backing: Amount,

    /// Ledger amount credited to the owner by `initialize`.
    /// Equal to `seed_backing` so the opening price is exactly `SCALE`.
    pub seed_ledger: Amount,
}

impl TokenParams {
    pub fn new(tax_rate_bps: u32, basis_points: u32, seed: Amount) -> Self {
        Self {
            tax_rate_bps,
            basis_points,
            seed_backing: seed,
            seed_ledger: seed,
        }
    }

    /// Check the parameter set can drive the pricing and tax arithmetic.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.basis_points == 0 {
            return Err(TypesError::InvalidParams("basis_points must be non-zero".into()));
        }
        if self.tax_rate_bps > self.basis_points {
            return Err(TypesError::InvalidParams(format!(
                "tax_rate_bps {} exceeds basis_points {}",
                self.tax_rate_bps, self.basis_points
            )));
        }
        if self.seed_backing.is_zero() || self.seed_ledger.is_zero() {
            return Err(TypesError::InvalidParams("seed amounts must be non-zero".into()));
        }
        if self.seed_backing != self.seed_ledger {
            return Err(TypesError::InvalidParams(format!(
                "seed_backing {} must equal seed_ledger {}",
                self.seed_backing, self.seed_ledger
            )));
        }
        Ok(())
    }
}

impl Default for TokenParams {
    fn default() -> Self {
        Self::new(100, BASIS_POINTS, SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = TokenParams::default();
        assert_eq!(params.tax_rate_bps, 100);
        assert_eq!(params.basis_points, 10_000);
        assert_eq!(params.seed_backing, SCALE);
        params.validate().unwrap();
    }

    #[test]
    fn zero_denominator_rejected() {
        let params = TokenParams::new(0, 0, SCALE);
        assert!(params.validate().is_err());
    }

    #[test]
    fn tax_above_denominator_rejected() {
        let params = TokenParams::new(10_001, 10_000, SCALE);
        assert!(params.validate().is_err());
    }

    #[test]
    fn full_tax_is_allowed() {
        TokenParams::new(10_000, 10_000, SCALE).validate().unwrap();
    }

    #[test]
    fn mismatched_seed_rejected() {
        let mut params = TokenParams::default();
        params.seed_ledger = SCALE * 2;
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_seed_rejected() {
        let params = TokenParams::new(100, 10_000, Amount::zero());
        assert!(params.validate().is_err());
    }
}
