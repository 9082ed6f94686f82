//! The bonded-token service.
//!
//! One [`BondedToken`] owns one ledger: balances, allowances, the exclusion
//! registry and the tax collector. Backing units never live in this struct;
//! they are read live from the backing asset's balance of the holding
//! account, and moved only by calls into [`BackingAsset`].
//!
//! Every mutating operation follows the same shape:
//! 1. enter the reentrancy guard,
//! 2. validate against a read snapshot (all checks that could fail),
//! 3. perform the external backing call, if any, with no lock held,
//! 4. apply the ledger mutation, which can no longer fail,
//! 5. log and emit events.
//!
//! A failure at steps 1–3 leaves state untouched.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ballast_backing::{BackingAsset, BackingError};
use ballast_pricing::{mint_quote, price, redeem_quote, TaxSchedule, TaxSplit};
use ballast_types::{Account, Amount, TokenParams, SCALE};
use tracing::{info, warn};

use crate::capability::{OwnerGated, ReentrancyGuarded};
use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::event::{EventBus, TokenEvent};
use crate::guard::ReentrancyGuard;
use crate::state::LedgerState;

/// Display metadata of a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Ballast".into(),
            symbol: "BLST".into(),
            decimals: 18,
        }
    }
}

/// Snapshot returned by [`BondedToken::get_stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub backing_held: Amount,
    pub supply: Amount,
    pub price: Amount,
}

/// Result of re-checking the ledger invariants against live state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub supply: Amount,
    /// `None` if the balances overflow when summed.
    pub sum_of_balances: Option<Amount>,
    pub backing_held: Amount,
    /// `None` when supply is zero.
    pub price: Option<Amount>,
}

impl AuditReport {
    /// `total_supply == Σ balances`.
    pub fn conserves_supply(&self) -> bool {
        self.sum_of_balances == Some(self.supply)
    }

    /// `backing_held >= floor(supply × price / SCALE)`.
    ///
    /// `price` is derived from the same `backing_held` and `supply`, so
    /// this holds for any state with consistent arithmetic. Under-backing
    /// is caught by [`AuditReport::at_or_above_par`].
    pub fn backing_sufficient(&self) -> bool {
        let Some(price) = self.price else {
            return true;
        };
        match self.supply.checked_mul(price) {
            Some(owed) => owed / SCALE <= self.backing_held,
            None => false,
        }
    }

    /// `backing_held >= supply`, i.e. the price has never dropped below
    /// the opening `SCALE`. Mints never credit more than they deposit at a
    /// price of at least `SCALE`, redemptions never pay less, and burns
    /// only shrink supply, so any ledger unit created without backing
    /// shows up here.
    pub fn at_or_above_par(&self) -> bool {
        self.backing_held >= self.supply
    }

    pub fn is_sound(&self) -> bool {
        self.conserves_supply() && self.backing_sufficient() && self.at_or_above_par()
    }
}

/// A ledger token minted against, and redeemable for, a backing asset at
/// the bonding-curve price, with a burn-and-collect tax on transfers.
pub struct BondedToken {
    metadata: TokenMetadata,
    params: TokenParams,
    tax: TaxSchedule,
    owner: Account,
    holding: Account,
    backing: Arc<dyn BackingAsset>,
    state: RwLock<LedgerState>,
    guard: ReentrancyGuard,
    events: EventBus,
}

impl BondedToken {
    /// Create an uninitialized token.
    ///
    /// `holding` is the token's own account on the backing asset; deposits
    /// land there and redemptions are paid from it. `holding` and
    /// `tax_collector` start out excluded from tax.
    pub fn new(
        params: TokenParams,
        owner: Account,
        holding: Account,
        tax_collector: Account,
        backing: Arc<dyn BackingAsset>,
    ) -> Result<Self, TokenError> {
        params.validate()?;
        let tax = TaxSchedule::from_params(&params)?;
        if owner.is_zero() || holding.is_zero() || tax_collector.is_zero() {
            return Err(TokenError::InvalidAccount);
        }
        // Holding never owns the token or collects tax, so its exclusion never moves.
        if owner == holding || tax_collector == holding {
            return Err(TokenError::InvalidAccount);
        }
        Ok(Self {
            metadata: TokenMetadata::default(),
            params,
            tax,
            owner,
            holding,
            backing,
            state: RwLock::new(LedgerState::new(holding, tax_collector)),
            guard: ReentrancyGuard::new(),
            events: EventBus::new(),
        })
    }

    /// Create an uninitialized token from a loaded configuration.
    pub fn from_config(
        config: &TokenConfig,
        owner: Account,
        holding: Account,
        tax_collector: Account,
        backing: Arc<dyn BackingAsset>,
    ) -> Result<Self, TokenError> {
        config
            .validate()
            .map_err(|e| TokenError::InvalidParams(e.to_string()))?;
        Ok(Self::new(config.params(), owner, holding, tax_collector, backing)?
            .with_metadata(config.metadata()))
    }

    pub fn with_metadata(mut self, metadata: TokenMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Register an event listener. Listeners are fixed once the token is
    /// shared.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Initialization guard ─────────────────────────────────────────────

    /// Seed the ledger: pull `seed_backing` from the owner and credit the
    /// owner `seed_ledger`, fixing the opening price at `SCALE`.
    ///
    /// Succeeds at most once; every later call fails with
    /// `AlreadyInitialized` whoever makes it.
    pub fn initialize(&self, caller: &Account) -> Result<(), TokenError> {
        let _entered = self.enter()?;
        {
            let state = self.read_state();
            if state.initialized {
                return Err(TokenError::AlreadyInitialized);
            }
            self.ensure_owner(caller)?;
            if !state.balances.total_supply().is_zero() {
                return Err(TokenError::AlreadyInitialized);
            }
            state.balances.check_credit(caller, self.params.seed_ledger)?;
        }

        self.pull_backing(caller, self.params.seed_backing)?;
        {
            let mut state = self.write_state();
            state.balances.credit(caller, self.params.seed_ledger)?;
            state.initialized = true;
        }

        info!(
            owner = %caller,
            seed_backing = %self.params.seed_backing,
            seed_ledger = %self.params.seed_ledger,
            "token initialized"
        );
        self.emit(TokenEvent::Initialized {
            owner: *caller,
            seed_backing: self.params.seed_backing,
            seed_ledger: self.params.seed_ledger,
        });
        self.emit(TokenEvent::Transfer {
            from: None,
            to: Some(*caller),
            amount: self.params.seed_ledger,
        });
        Ok(())
    }

    // ── Mint / redeem ────────────────────────────────────────────────────

    /// Deposit `backing_amount` and receive ledger units at the price
    /// before the deposit. Returns the ledger units credited.
    pub fn mint(&self, caller: &Account, backing_amount: Amount) -> Result<Amount, TokenError> {
        let _entered = self.enter()?;
        if caller.is_zero() || *caller == self.holding {
            return Err(TokenError::InvalidAccount);
        }
        let backing_held = self.backing_held();
        let quote = {
            let state = self.read_state();
            if !state.initialized {
                return Err(TokenError::NotInitialized);
            }
            if backing_amount.is_zero() {
                return Err(TokenError::ZeroAmount);
            }
            let quote = mint_quote(backing_held, state.balances.total_supply(), backing_amount)?;
            if quote.ledger_amount.is_zero() {
                return Err(TokenError::AmountTooSmall);
            }
            state.balances.check_credit(caller, quote.ledger_amount)?;
            quote
        };

        self.pull_backing(caller, backing_amount)?;
        self.write_state()
            .balances
            .credit(caller, quote.ledger_amount)?;

        info!(
            account = %caller,
            backing = %backing_amount,
            minted = %quote.ledger_amount,
            price = %quote.price,
            "minted"
        );
        self.emit(TokenEvent::Minted {
            account: *caller,
            backing_amount,
            ledger_amount: quote.ledger_amount,
        });
        self.emit(TokenEvent::Transfer {
            from: None,
            to: Some(*caller),
            amount: quote.ledger_amount,
        });
        Ok(quote.ledger_amount)
    }

    /// Burn `ledger_amount` of the caller's units and pay out backing at
    /// the current price. Returns the backing paid.
    pub fn redeem(&self, caller: &Account, ledger_amount: Amount) -> Result<Amount, TokenError> {
        let _entered = self.enter()?;
        if caller.is_zero() || *caller == self.holding {
            return Err(TokenError::InvalidAccount);
        }
        let backing_held = self.backing_held();
        let quote = {
            let state = self.read_state();
            if !state.initialized {
                return Err(TokenError::NotInitialized);
            }
            if ledger_amount.is_zero() {
                return Err(TokenError::ZeroAmount);
            }
            state.balances.check_debit(caller, ledger_amount)?;
            let quote = redeem_quote(backing_held, state.balances.total_supply(), ledger_amount)?;
            if quote.backing_amount.is_zero() {
                return Err(TokenError::AmountTooSmall);
            }
            if backing_held < quote.backing_amount {
                return Err(TokenError::InsufficientBacking {
                    needed: quote.backing_amount,
                    available: backing_held,
                });
            }
            quote
        };

        // Pay first; the debit below is only applied once the asset has
        // confirmed the payout.
        self.push_backing(caller, quote.backing_amount)?;
        self.write_state().balances.debit(caller, ledger_amount)?;

        info!(
            account = %caller,
            burned = %ledger_amount,
            backing = %quote.backing_amount,
            price = %quote.price,
            "redeemed"
        );
        self.emit(TokenEvent::Redeemed {
            account: *caller,
            ledger_amount,
            backing_amount: quote.backing_amount,
        });
        self.emit(TokenEvent::Transfer {
            from: Some(*caller),
            to: None,
            amount: ledger_amount,
        });
        Ok(quote.backing_amount)
    }

    // ── Administration ───────────────────────────────────────────────────

    /// Owner-only: set or clear the tax exemption of `account`.
    pub fn set_excluded(
        &self,
        caller: &Account,
        account: &Account,
        excluded: bool,
    ) -> Result<(), TokenError> {
        let _entered = self.enter()?;
        self.ensure_owner(caller)?;
        if account.is_zero() {
            return Err(TokenError::InvalidAccount);
        }
        self.write_state().excluded.set(account, excluded);

        info!(account = %account, excluded, "exclusion updated");
        self.emit(TokenEvent::ExclusionUpdated {
            account: *account,
            excluded,
        });
        Ok(())
    }

    /// Owner-only: replace the tax collector. The exemption moves with the
    /// role in the same step.
    pub fn set_tax_collector(&self, caller: &Account, collector: &Account) -> Result<(), TokenError> {
        let _entered = self.enter()?;
        self.ensure_owner(caller)?;
        if collector.is_zero() || *collector == self.holding {
            return Err(TokenError::InvalidAccount);
        }
        let previous = {
            let mut state = self.write_state();
            let previous = state.tax_collector;
            state.excluded.reassign(&previous, collector);
            state.tax_collector = *collector;
            previous
        };

        info!(previous = %previous, current = %collector, "tax collector updated");
        self.emit(TokenEvent::TaxCollectorUpdated {
            previous,
            current: *collector,
        });
        Ok(())
    }

    /// Owner-only: send `amount` of a foreign asset held by the holding
    /// account to the owner. The backing asset itself is never withdrawable.
    pub fn emergency_withdraw(
        &self,
        caller: &Account,
        asset: &dyn BackingAsset,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let _entered = self.enter()?;
        self.ensure_owner(caller)?;
        let asset_id = asset.asset_id();
        if asset_id == self.backing.asset_id() {
            return Err(TokenError::CannotWithdrawBacking);
        }
        if amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }
        settle("transfer", asset.transfer(&self.holding, &self.owner, amount))?;

        info!(asset = %asset_id, amount = %amount, "emergency withdrawal");
        self.emit(TokenEvent::EmergencyWithdrawal {
            asset: asset_id,
            amount,
        });
        Ok(())
    }

    // ── Views and previews ───────────────────────────────────────────────

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    /// The token's own account on the backing asset.
    pub fn holding_account(&self) -> Account {
        self.holding
    }

    pub fn tax_collector(&self) -> Account {
        self.read_state().tax_collector
    }

    pub fn is_excluded(&self, account: &Account) -> bool {
        self.read_state().excluded.is_excluded(account)
    }

    pub fn is_initialized(&self) -> bool {
        self.read_state().initialized
    }

    /// Backing units currently held, read live from the backing asset.
    pub fn backing_held(&self) -> Amount {
        self.backing.balance_of(&self.holding)
    }

    pub fn get_current_price(&self) -> Result<Amount, TokenError> {
        let backing_held = self.backing_held();
        let supply = self.read_state().balances.total_supply();
        Ok(price(backing_held, supply)?)
    }

    pub fn get_stats(&self) -> Result<Stats, TokenError> {
        let backing_held = self.backing_held();
        let supply = self.read_state().balances.total_supply();
        Ok(Stats {
            backing_held,
            supply,
            price: price(backing_held, supply)?,
        })
    }

    /// Ledger units `mint(backing_amount)` would credit right now. Zero
    /// means the mint would fail with `AmountTooSmall`.
    pub fn preview_mint(&self, backing_amount: Amount) -> Result<Amount, TokenError> {
        let backing_held = self.backing_held();
        let supply = self.read_state().balances.total_supply();
        Ok(mint_quote(backing_held, supply, backing_amount)?.ledger_amount)
    }

    /// Backing `redeem(ledger_amount)` would pay right now.
    pub fn preview_redeem(&self, ledger_amount: Amount) -> Result<Amount, TokenError> {
        let backing_held = self.backing_held();
        let supply = self.read_state().balances.total_supply();
        Ok(redeem_quote(backing_held, supply, ledger_amount)?.backing_amount)
    }

    /// The tax split of a transfer of `amount` between non-excluded parties.
    pub fn preview_transfer(&self, amount: Amount) -> Result<TaxSplit, TokenError> {
        Ok(self.tax.split(amount)?)
    }

    /// Re-check supply conservation and backing sufficiency.
    pub fn audit(&self) -> AuditReport {
        let backing_held = self.backing_held();
        let state = self.read_state();
        let supply = state.balances.total_supply();
        AuditReport {
            supply,
            sum_of_balances: state.balances.sum_of_balances(),
            backing_held,
            price: price(backing_held, supply).ok(),
        }
    }

    // ── Internals ────────────────────────────────────────────────────────

    pub(crate) fn read_state(&self) -> RwLockReadGuard<'_, LedgerState> {
        // Mutations validate before writing, so a poisoned lock still
        // guards consistent state.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_state(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn emit(&self, event: TokenEvent) {
        self.events.emit(&event);
    }

    /// Apply a transfer of `amount` from `from` to `to`, taxed unless
    /// either side is excluded.
    pub(crate) fn apply_transfer(
        &self,
        state: &mut LedgerState,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<TaxSplit, TokenError> {
        if from.is_zero() || to.is_zero() {
            return Err(TokenError::InvalidAccount);
        }
        state.balances.check_debit(from, amount)?;
        let split = if state.excluded.exempts(from, to) {
            TaxSplit::untaxed(amount)
        } else {
            self.tax.split(amount)?
        };

        // burned + collected + net == amount <= balance, and every credit
        // moves existing supply, so none of these can fail.
        let collector = state.tax_collector;
        if !split.burned.is_zero() {
            state.balances.debit(from, split.burned)?;
        }
        if !split.collected.is_zero() {
            state.balances.move_balance(from, &collector, split.collected)?;
        }
        state.balances.move_balance(from, to, split.net)?;
        Ok(split)
    }

    fn pull_backing(&self, from: &Account, amount: Amount) -> Result<(), TokenError> {
        settle(
            "transfer_from",
            self.backing
                .transfer_from(&self.holding, from, &self.holding, amount),
        )
    }

    fn push_backing(&self, to: &Account, amount: Amount) -> Result<(), TokenError> {
        settle("transfer", self.backing.transfer(&self.holding, to, amount))
    }
}

/// Fold a `false` return and an error into `BackingTransferFailed`.
fn settle(op: &str, result: Result<bool, BackingError>) -> Result<(), TokenError> {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(op, "asset transfer returned false");
            Err(TokenError::BackingTransferFailed(format!("{op} returned false")))
        }
        Err(e) => {
            warn!(op, error = %e, "asset transfer failed");
            Err(e.into())
        }
    }
}

impl OwnerGated for BondedToken {
    fn owner(&self) -> Account {
        self.owner
    }
}

impl ReentrancyGuarded for BondedToken {
    fn reentrancy_guard(&self) -> &ReentrancyGuard {
        &self.guard
    }
}
