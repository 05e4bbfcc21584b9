use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{Bet, BetDefinition};

/// Horn, World, C&E and the other bets that spread one stake over several
/// totals.
///
/// The stake is divided across the legs by weight. The matching leg returns
/// `leg_stake * (ratio + 1)`; everything else on the bet is lost. A return
/// that only covers the stake (World on a 7) is a push.
pub struct SplitResolver;

impl Resolver for SplitResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let total_weight: u32 = def.legs.iter().map(|leg| leg.weight).sum();
        if total_weight == 0 {
            return Outcome::Push;
        }
        let total = ctx.roll.total;
        let Some(leg) = def.legs.iter().find(|leg| leg.totals.contains(&total)) else {
            return Outcome::Loss;
        };

        let leg_stake = bet.amount.mul_ratio(leg.weight, total_weight);
        let returned = leg_stake + leg.payout.apply(leg_stake);
        let net = returned - bet.amount;
        if net.is_positive() {
            Outcome::win(net)
        } else {
            Outcome::Push
        }
    }
}
