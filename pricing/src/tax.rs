//! Transfer-tax split: half burned, half to the collector.

use ballast_types::{Amount, TokenParams};

use crate::error::PricingError;

/// The fixed tax rate of a token, as a fraction of `basis_points`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaxSchedule {
    rate_bps: u32,
    basis_points: u32,
}

/// How a taxed transfer of `amount` is divided.
///
/// `burned + collected == tax` and `tax + net == amount`. The collector
/// takes the odd unit when `tax` is odd.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaxSplit {
    pub amount: Amount,
    pub tax: Amount,
    pub burned: Amount,
    pub collected: Amount,
    pub net: Amount,
}

impl TaxSplit {
    /// The split of an exempt transfer: everything is net.
    pub fn untaxed(amount: Amount) -> Self {
        Self {
            amount,
            tax: Amount::zero(),
            burned: Amount::zero(),
            collected: Amount::zero(),
            net: amount,
        }
    }

    pub fn is_taxed(&self) -> bool {
        !self.tax.is_zero()
    }
}

impl TaxSchedule {
    pub fn new(rate_bps: u32, basis_points: u32) -> Result<Self, PricingError> {
        if basis_points == 0 || rate_bps > basis_points {
            return Err(PricingError::InvalidSchedule {
                rate_bps,
                basis_points,
            });
        }
        Ok(Self {
            rate_bps,
            basis_points,
        })
    }

    pub fn from_params(params: &TokenParams) -> Result<Self, PricingError> {
        Self::new(params.tax_rate_bps, params.basis_points)
    }

    pub fn rate_bps(&self) -> u32 {
        self.rate_bps
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points
    }

    /// `tax = floor(amount × rate / basis_points)`, `burned = floor(tax / 2)`,
    /// `collected = tax − burned`, `net = amount − tax`.
    pub fn split(&self, amount: Amount) -> Result<TaxSplit, PricingError> {
        let tax = amount
            .checked_mul(Amount::from(self.rate_bps))
            .ok_or(PricingError::Overflow)?
            / Amount::from(self.basis_points);
        let burned = tax / 2;
        let collected = tax - burned;
        // rate <= basis_points, so tax <= amount.
        let net = amount - tax;
        Ok(TaxSplit {
            amount,
            tax,
            burned,
            collected,
            net,
        })
    }
}
