#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ballast_backing::InMemoryAsset;
use ballast_token::{BondedToken, Burnable, Transferable};
use ballast_types::amount::units;
use ballast_types::{Account, Amount, TokenParams};

const OWNER: u64 = 1;
const HOLDING: u64 = 2;
const COLLECTOR: u64 = 3;

#[derive(Arbitrary, Debug)]
enum Op {
    Mint { who: u8, amount: u64 },
    Redeem { who: u8, amount: u64 },
    Transfer { from: u8, to: u8, amount: u64 },
    TransferFrom { spender: u8, from: u8, to: u8, amount: u64 },
    Approve { owner: u8, spender: u8, amount: u64 },
    Burn { who: u8, amount: u64 },
    Exclude { who: u8, excluded: bool },
    SetCollector { who: u8 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    tax_rate_bps: u16,
    ops: Vec<Op>,
}

// Actors 1..=6 are real accounts; 0 maps to the null account.
fn actor(n: u8) -> Account {
    Account::from_low_u64(u64::from(n % 7))
}

// Scale fuzz amounts up so they are comparable to the seed.
fn amount(n: u64) -> Amount {
    Amount::from(n) * Amount::from(1_000_000u64)
}

// Any operation sequence, successful or not, must keep the ledger sound and
// never lower the price.
fuzz_target!(|input: Input| {
    let asset = Arc::new(InMemoryAsset::new(Account::from_low_u64(0xba5e)));
    for n in 1..=6 {
        let account = Account::from_low_u64(n);
        let _ = asset.mint(&account, units(1_000_000_000));
        asset.approve(&account, &Account::from_low_u64(HOLDING), Amount::MAX);
    }
    let params = TokenParams::new(u32::from(input.tax_rate_bps) % 10_001, 10_000, units(1));
    let Ok(token) = BondedToken::new(
        params,
        Account::from_low_u64(OWNER),
        Account::from_low_u64(HOLDING),
        Account::from_low_u64(COLLECTOR),
        asset,
    ) else {
        return;
    };
    let owner = Account::from_low_u64(OWNER);
    if token.initialize(&owner).is_err() {
        return;
    }

    for op in input.ops {
        let before = token.get_current_price().ok();
        let _ = match op {
            Op::Mint { who, amount: n } => token.mint(&actor(who), amount(n)).map(|_| ()),
            Op::Redeem { who, amount: n } => token.redeem(&actor(who), amount(n)).map(|_| ()),
            Op::Transfer { from, to, amount: n } => {
                token.transfer(&actor(from), &actor(to), amount(n)).map(|_| ())
            }
            Op::TransferFrom { spender, from, to, amount: n } => token
                .transfer_from(&actor(spender), &actor(from), &actor(to), amount(n))
                .map(|_| ()),
            Op::Approve { owner, spender, amount: n } => {
                token.approve(&actor(owner), &actor(spender), amount(n)).map(|_| ())
            }
            Op::Burn { who, amount: n } => token.burn(&actor(who), amount(n)),
            Op::Exclude { who, excluded } => token.set_excluded(&owner, &actor(who), excluded),
            Op::SetCollector { who } => token.set_tax_collector(&owner, &actor(who)),
        };

        let report = token.audit();
        assert!(report.is_sound(), "unsound ledger: {report:?}");
        if let (Some(before), Some(after)) = (before, report.price) {
            assert!(after >= before, "price fell from {before} to {after}");
        }
    }
});
