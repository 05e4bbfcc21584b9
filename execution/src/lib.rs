//! Craps table engine: bet catalogue, dice, the puck and per-roll settlement.

pub mod dice;
pub mod ledger;
pub mod registry;
pub mod resolution;
pub mod state_machine;
pub mod table;

mod error;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod integration_tests;

pub use dice::{DiceSource, SecureDice, SeededDice};
pub use error::TableError;
pub use ledger::Ledger;
pub use registry::{BetRegistry, RegistryError};
pub use resolution::{Settlement, SettlementKind};
pub use state_machine::{GameStateMachine, Transition, TransitionError};
pub use table::{Table, Turn};
