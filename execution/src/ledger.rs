//! Bankroll movements.
//!
//! Every chip that leaves or reaches a bankroll goes through [Ledger], so the
//! table never debits past zero and every credit is logged.

use crate::TableError;
use crapstable_types::craps::{Money, Player};
use tracing::debug;

pub trait Ledger {
    /// Take `amount` from the bankroll, or fail without touching it.
    fn debit(&mut self, amount: Money) -> Result<(), TableError>;

    fn credit(&mut self, amount: Money);

    /// Check that `amount` could be debited.
    fn ensure_funds(&self, amount: Money) -> Result<(), TableError>;
}

impl Ledger for Player {
    fn debit(&mut self, amount: Money) -> Result<(), TableError> {
        self.ensure_funds(amount)?;
        self.bankroll -= amount;
        debug!(player = %self.id, %amount, bankroll = %self.bankroll, "debit");
        Ok(())
    }

    fn credit(&mut self, amount: Money) {
        if amount.is_positive() {
            self.bankroll += amount;
            debug!(player = %self.id, %amount, bankroll = %self.bankroll, "credit");
        }
    }

    fn ensure_funds(&self, amount: Money) -> Result<(), TableError> {
        if amount > self.bankroll {
            return Err(TableError::InsufficientFunds {
                available: self.bankroll,
                required: amount,
            });
        }
        Ok(())
    }
}
