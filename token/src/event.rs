//! Events emitted after completed state transitions.

use ballast_types::{Account, Amount};

/// Token-level events that observers can subscribe to via the [`EventBus`].
///
/// Events are passive records; the token never reads them back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenEvent {
    /// Ledger units moved. `from: None` is a mint, `to: None` a burn.
    Transfer {
        from: Option<Account>,
        to: Option<Account>,
        amount: Amount,
    },
    /// An allowance was set.
    Approval {
        owner: Account,
        spender: Account,
        amount: Amount,
    },
    /// The owner seeded the ledger.
    Initialized {
        owner: Account,
        seed_backing: Amount,
        seed_ledger: Amount,
    },
    /// Backing was deposited and ledger units credited.
    Minted {
        account: Account,
        backing_amount: Amount,
        ledger_amount: Amount,
    },
    /// Ledger units were burned and backing paid out.
    Redeemed {
        account: Account,
        ledger_amount: Amount,
        backing_amount: Amount,
    },
    /// A taxed transfer completed.
    TaxCollected {
        from: Account,
        to: Account,
        amount: Amount,
        tax: Amount,
        burned: Amount,
    },
    TaxCollectorUpdated {
        previous: Account,
        current: Account,
    },
    ExclusionUpdated {
        account: Account,
        excluded: bool,
    },
    /// A foreign asset was swept to the owner.
    EmergencyWithdrawal {
        asset: Account,
        amount: Amount,
    },
}

/// Synchronous fan-out event bus for token events.
///
/// Listeners are invoked inline on the emitting thread while the emitting
/// operation still holds the reentrancy guard; a listener that calls a
/// mutating operation gets `ReentrancyDetected`.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&TokenEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &TokenEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&TokenEvent::ExclusionUpdated {
            account: Account::from_low_u64(1),
            excluded: true,
        });

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&TokenEvent::Transfer {
            from: None,
            to: Some(Account::from_low_u64(1)),
            amount: Amount::one(),
        });
    }

    #[test]
    fn listener_receives_the_emitted_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let sink = Arc::clone(&seen);
        bus.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));

        let event = TokenEvent::TaxCollectorUpdated {
            previous: Account::from_low_u64(1),
            current: Account::from_low_u64(2),
        };
        bus.emit(&event);

        assert_eq!(*seen.lock().unwrap(), vec![event]);
    }
}
