#![no_main]

use libfuzzer_sys::fuzz_target;

use ballast_pricing::{mint_quote, price, redeem_quote, TaxSchedule};
use ballast_types::Amount;

// Quotes and tax splits over arbitrary 256-bit inputs must return an error
// rather than panic, and a successful tax split must add up.
fuzz_target!(|input: ([u64; 4], [u64; 4], [u64; 4], u32, u32)| {
    let (backing, supply, amount, rate_bps, basis_points) = input;
    let (backing, supply, amount) = (Amount(backing), Amount(supply), Amount(amount));

    let _ = price(backing, supply);
    let _ = mint_quote(backing, supply, amount);
    let _ = redeem_quote(backing, supply, amount);

    if let Ok(schedule) = TaxSchedule::new(rate_bps, basis_points) {
        if let Ok(split) = schedule.split(amount) {
            assert_eq!(split.burned + split.collected, split.tax);
            assert_eq!(split.net + split.tax, amount);
        }
    }
});
