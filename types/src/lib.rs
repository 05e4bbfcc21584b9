//! Common types for the crapstable engine.
//!
//! Everything here is plain data: the table state, rolls, bets, players and
//! configuration. Behavior lives in `crapstable-execution`.

pub mod craps;

pub use craps::*;
