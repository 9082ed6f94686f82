//! Taxed transfers, allowances and burns.

use ballast_pricing::TaxSplit;
use ballast_types::{Account, Amount};
use tracing::debug;

use crate::capability::{Burnable, ReentrancyGuarded, Transferable};
use crate::error::TokenError;
use crate::event::TokenEvent;
use crate::token::BondedToken;

impl BondedToken {
    fn announce_transfer(&self, from: &Account, to: &Account, split: &TaxSplit, collector: &Account) {
        debug!(
            from = %from,
            to = %to,
            amount = %split.amount,
            tax = %split.tax,
            burned = %split.burned,
            "transfer"
        );
        self.emit(TokenEvent::Transfer {
            from: Some(*from),
            to: Some(*to),
            amount: split.net,
        });
        if !split.is_taxed() {
            return;
        }
        if !split.burned.is_zero() {
            self.emit(TokenEvent::Transfer {
                from: Some(*from),
                to: None,
                amount: split.burned,
            });
        }
        if !split.collected.is_zero() {
            self.emit(TokenEvent::Transfer {
                from: Some(*from),
                to: Some(*collector),
                amount: split.collected,
            });
        }
        self.emit(TokenEvent::TaxCollected {
            from: *from,
            to: *to,
            amount: split.amount,
            tax: split.tax,
            burned: split.burned,
        });
    }

    fn announce_burn(&self, from: &Account, amount: Amount) {
        debug!(from = %from, amount = %amount, "burn");
        self.emit(TokenEvent::Transfer {
            from: Some(*from),
            to: None,
            amount,
        });
    }
}

impl Transferable for BondedToken {
    fn total_supply(&self) -> Amount {
        self.read_state().balances.total_supply()
    }

    fn balance_of(&self, account: &Account) -> Amount {
        self.read_state().balances.balance_of(account)
    }

    fn allowance(&self, owner: &Account, spender: &Account) -> Amount {
        self.read_state().allowances.allowance(owner, spender)
    }

    fn approve(&self, caller: &Account, spender: &Account, amount: Amount) -> Result<bool, TokenError> {
        let _entered = self.enter()?;
        if caller.is_zero() || spender.is_zero() {
            return Err(TokenError::InvalidAccount);
        }
        self.write_state().allowances.approve(caller, spender, amount);

        debug!(owner = %caller, spender = %spender, amount = %amount, "approval");
        self.emit(TokenEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
        Ok(true)
    }

    fn transfer(&self, caller: &Account, to: &Account, amount: Amount) -> Result<bool, TokenError> {
        let _entered = self.enter()?;
        let (split, collector) = {
            let mut state = self.write_state();
            let split = self.apply_transfer(&mut state, caller, to, amount)?;
            (split, state.tax_collector)
        };
        self.announce_transfer(caller, to, &split, &collector);
        Ok(true)
    }

    fn transfer_from(
        &self,
        caller: &Account,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<bool, TokenError> {
        let _entered = self.enter()?;
        let (split, collector) = {
            let mut state = self.write_state();
            state.allowances.check_spend(from, caller, amount)?;
            let split = self.apply_transfer(&mut state, from, to, amount)?;
            state.allowances.spend(from, caller, amount)?;
            (split, state.tax_collector)
        };
        self.announce_transfer(from, to, &split, &collector);
        Ok(true)
    }
}

impl Burnable for BondedToken {
    fn burn(&self, caller: &Account, amount: Amount) -> Result<(), TokenError> {
        let _entered = self.enter()?;
        if caller.is_zero() {
            return Err(TokenError::InvalidAccount);
        }
        self.write_state().balances.debit(caller, amount)?;
        self.announce_burn(caller, amount);
        Ok(())
    }

    fn burn_from(&self, caller: &Account, from: &Account, amount: Amount) -> Result<(), TokenError> {
        let _entered = self.enter()?;
        if from.is_zero() {
            return Err(TokenError::InvalidAccount);
        }
        {
            let mut state = self.write_state();
            state.allowances.check_spend(from, caller, amount)?;
            state.balances.debit(from, amount)?;
            state.allowances.spend(from, caller, amount)?;
        }
        self.announce_burn(from, amount);
        Ok(())
    }
}
