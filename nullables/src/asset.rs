//! Nullable backing asset with scripted failures and reentrancy hooks.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ballast_backing::{BackingAsset, BackingError, InMemoryAsset};
use ballast_types::{Account, Amount};

/// How a scripted transfer failure is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMode {
    /// The transfer returns `Ok(false)`.
    ReturnFalse,
    /// The transfer returns an error.
    Error,
}

/// A transfer request observed by the asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetCall {
    TransferFrom {
        spender: Account,
        owner: Account,
        to: Account,
        amount: Amount,
    },
    Transfer {
        from: Account,
        to: Account,
        amount: Amount,
    },
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// A deterministic backing asset for testing.
///
/// Balances behave exactly like [`InMemoryAsset`]; failures and hooks are
/// consumed in the order they were queued.
pub struct NullAsset {
    inner: InMemoryAsset,
    failures: Mutex<VecDeque<FailureMode>>,
    hooks: Mutex<VecDeque<Hook>>,
    calls: Mutex<Vec<AssetCall>>,
}

impl NullAsset {
    pub fn new(id: Account) -> Self {
        Self {
            inner: InMemoryAsset::new(id),
            failures: Mutex::new(VecDeque::new()),
            hooks: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create `amount` units in `to`.
    pub fn fund(&self, to: &Account, amount: Amount) {
        self.inner
            .mint(to, amount)
            .unwrap_or_else(|e| panic!("funding {to} failed: {e}"));
    }

    pub fn approve(&self, owner: &Account, spender: &Account, amount: Amount) {
        self.inner.approve(owner, spender, amount);
    }

    pub fn allowance(&self, owner: &Account, spender: &Account) -> Amount {
        self.inner.allowance(owner, spender)
    }

    /// Make the next transfer (of either kind) fail.
    pub fn fail_next(&self, mode: FailureMode) {
        lock(&self.failures).push_back(mode);
    }

    /// Run `hook` inside the next transfer, before any balance moves.
    pub fn on_next_transfer(&self, hook: impl Fn() + Send + Sync + 'static) {
        lock(&self.hooks).push_back(Box::new(hook));
    }

    /// Every transfer requested so far, including failed ones.
    pub fn calls(&self) -> Vec<AssetCall> {
        lock(&self.calls).clone()
    }

    fn intercept(&self, call: AssetCall) -> Option<Result<bool, BackingError>> {
        lock(&self.calls).push(call);
        let hook = lock(&self.hooks).pop_front();
        if let Some(hook) = hook {
            hook();
        }
        match lock(&self.failures).pop_front() {
            Some(FailureMode::ReturnFalse) => Some(Ok(false)),
            Some(FailureMode::Error) => {
                Some(Err(BackingError::Rejected("scripted failure".into())))
            }
            None => None,
        }
    }
}

impl BackingAsset for NullAsset {
    fn asset_id(&self) -> Account {
        self.inner.asset_id()
    }

    fn balance_of(&self, account: &Account) -> Amount {
        self.inner.balance_of(account)
    }

    fn transfer_from(
        &self,
        spender: &Account,
        owner: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<bool, BackingError> {
        let call = AssetCall::TransferFrom {
            spender: *spender,
            owner: *owner,
            to: *to,
            amount,
        };
        if let Some(scripted) = self.intercept(call) {
            return scripted;
        }
        self.inner.transfer_from(spender, owner, to, amount)
    }

    fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<bool, BackingError> {
        let call = AssetCall::Transfer {
            from: *from,
            to: *to,
            amount,
        };
        if let Some(scripted) = self.intercept(call) {
            return scripted;
        }
        self.inner.transfer(from, to, amount)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
