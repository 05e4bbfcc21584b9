use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{Bet, BetDefinition};

/// Big 6 and Big 8: even money on the number before a 7, working on every roll.
pub struct BigResolver;

impl Resolver for BigResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let Some(number) = def.number else {
            return Outcome::Continue;
        };
        match ctx.roll.total {
            total if total == number => Outcome::win(def.payout.apply(bet.amount)),
            7 => Outcome::Loss,
            _ => Outcome::Continue,
        }
    }
}
