use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{Bet, BetCategory, BetDefinition};

/// Field and single-number propositions. Always decided on the next roll.
pub struct OneRollResolver;

impl Resolver for OneRollResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let total = ctx.roll.total;
        if def.category == BetCategory::Field {
            return match ctx.config.field_paytable.multiplier(total) {
                0 => Outcome::Loss,
                multiplier => Outcome::win(bet.amount.times(multiplier)),
            };
        }
        if def.winning_totals.contains(&total) {
            Outcome::win(def.payout.apply(bet.amount))
        } else {
            Outcome::Loss
        }
    }
}
