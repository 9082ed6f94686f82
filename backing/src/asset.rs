//! Transferable-asset trait.

use ballast_types::{Account, Amount};

use crate::error::BackingError;

/// A standard transferable-balance asset.
///
/// Both transfer methods may signal failure either by returning `Ok(false)`
/// or by returning an error; the token treats the two identically.
pub trait BackingAsset: Send + Sync {
    /// Identity of this asset, used to tell the backing asset apart from
    /// any other asset held by the token's holding account.
    fn asset_id(&self) -> Account;

    fn balance_of(&self, account: &Account) -> Amount;

    /// Move `amount` from `owner` to `to`, consuming `spender`'s allowance
    /// on `owner`.
    fn transfer_from(
        &self,
        spender: &Account,
        owner: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<bool, BackingError>;

    /// Move `amount` from `from` to `to` on `from`'s own authority.
    fn transfer(&self, from: &Account, to: &Account, amount: Amount)
        -> Result<bool, BackingError>;
}
