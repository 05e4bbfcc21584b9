use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{Bet, BetDefinition};

/// Hard 4, 6, 8 and 10.
pub struct HardWayResolver;

impl Resolver for HardWayResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let Some(number) = def.number else {
            return Outcome::Continue;
        };
        let roll = ctx.roll;
        if roll.total == number && roll.is_hard {
            Outcome::win(def.payout.apply(bet.amount))
        } else if roll.total == number || roll.is_seven() {
            Outcome::Loss
        } else {
            Outcome::Continue
        }
    }
}
