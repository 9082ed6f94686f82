//! Bonding-curve price and mint/redeem conversions.

use ballast_types::{Amount, SCALE};

use crate::error::PricingError;

/// Result of converting a backing deposit into ledger units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintQuote {
    /// Price before the deposit lands.
    pub price: Amount,
    /// Backing units deposited.
    pub backing_amount: Amount,
    /// Ledger units credited. May be zero; callers reject that.
    pub ledger_amount: Amount,
}

/// Result of converting ledger units back into backing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedeemQuote {
    pub price: Amount,
    pub ledger_amount: Amount,
    /// Backing units paid out. May be zero; callers reject that.
    pub backing_amount: Amount,
}

/// `floor(backing_held × SCALE / supply)`.
///
/// Fails with `DivisionByZero` when `supply` is zero. After initialization
/// this only happens if holders burn the entire supply.
pub fn price(backing_held: Amount, supply: Amount) -> Result<Amount, PricingError> {
    mul_div(backing_held, SCALE, supply)
}

/// Quote a mint of `backing_amount` against the pre-deposit state.
///
/// `ledger = floor(backing_amount × SCALE / price)`
pub fn mint_quote(
    backing_held: Amount,
    supply: Amount,
    backing_amount: Amount,
) -> Result<MintQuote, PricingError> {
    let price = price(backing_held, supply)?;
    let ledger_amount = mul_div(backing_amount, SCALE, price)?;
    Ok(MintQuote {
        price,
        backing_amount,
        ledger_amount,
    })
}

/// Quote a redemption of `ledger_amount` against current state.
///
/// `backing = floor(ledger_amount × price / SCALE)`
pub fn redeem_quote(
    backing_held: Amount,
    supply: Amount,
    ledger_amount: Amount,
) -> Result<RedeemQuote, PricingError> {
    let price = price(backing_held, supply)?;
    let backing_amount = mul_div(ledger_amount, price, SCALE)?;
    Ok(RedeemQuote {
        price,
        ledger_amount,
        backing_amount,
    })
}

/// `floor(a × b / d)` with checked multiplication.
fn mul_div(a: Amount, b: Amount, d: Amount) -> Result<Amount, PricingError> {
    if d.is_zero() {
        return Err(PricingError::DivisionByZero);
    }
    let product = a.checked_mul(b).ok_or(PricingError::Overflow)?;
    Ok(product / d)
}
