//! Token amounts and fixed-point constants.
//!
//! Amounts are 256-bit unsigned integers so that `amount × SCALE` never
//! overflows within any realistic supply. The smallest unit is 1 raw; a
//! price of `SCALE` denotes 1.0 backing unit per ledger unit.

pub use primitive_types::U256 as Amount;

/// Fixed-point denominator for prices: 10^18.
pub const SCALE: Amount = Amount([1_000_000_000_000_000_000, 0, 0, 0]);

/// Default tax-rate denominator (1 bp = 1/10 000).
pub const BASIS_POINTS: u32 = 10_000;

/// `whole × 10^18` raw units. Used for whole-token quantities in tests and
/// configuration defaults.
pub fn units(whole: u64) -> Amount {
    Amount::from(whole) * SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_ten_to_the_eighteen() {
        assert_eq!(SCALE, Amount::exp10(18));
    }

    #[test]
    fn units_scales_whole_tokens() {
        assert_eq!(units(0), Amount::zero());
        assert_eq!(units(3), Amount::from(3_000_000_000_000_000_000u128));
    }
}
