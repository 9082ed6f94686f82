use proptest::prelude::*;

use ballast_types::{Account, Amount, TokenParams};

proptest! {
    /// Account::is_zero is true only for all-zero bytes.
    #[test]
    fn account_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        let account = Account::new(bytes);
        prop_assert_eq!(account.is_zero(), bytes == [0u8; 20]);
    }

    /// The hex display form parses back to the same account.
    #[test]
    fn account_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let account = Account::new(bytes);
        let parsed: Account = account.to_string().parse().unwrap();
        prop_assert_eq!(parsed, account);
    }

    /// Any tax rate within its denominator validates; anything above does not.
    #[test]
    fn params_validate_tax_bounds(
        basis_points in 1u32..100_000,
        tax_rate_bps in 0u32..200_000,
        seed in 1u128..u128::MAX,
    ) {
        let params = TokenParams::new(tax_rate_bps, basis_points, Amount::from(seed));
        prop_assert_eq!(params.validate().is_ok(), tax_rate_bps <= basis_points);
    }
}
