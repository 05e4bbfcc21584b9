use super::{Outcome, Resolver, RollContext};
use crate::registry::true_odds_for;
use crapstable_types::craps::{Bet, BetDefinition, Side};

/// Free odds behind a line or come bet, paid at true odds.
///
/// The bet carries the number it backs. Right-side odds are off during the
/// come-out: they are returned if the roll decides their number.
pub struct OddsResolver;

impl Resolver for OddsResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let total = ctx.roll.total;
        let number = match bet.number() {
            Some(number) => number,
            None if ctx.in_point() => ctx.point.number(),
            None => return Outcome::Push,
        };
        let Some(odds) = true_odds_for(def.side, number) else {
            return Outcome::Push;
        };

        let decided = total == number || total == 7;
        if def.side == Side::Right && !ctx.in_point() {
            return if decided {
                Outcome::Push
            } else {
                Outcome::Continue
            };
        }

        let wins = match def.side {
            Side::Right => total == number,
            Side::Wrong => total == 7,
        };
        if wins {
            Outcome::win(odds.apply(bet.amount))
        } else if decided {
            Outcome::Loss
        } else {
            Outcome::Continue
        }
    }
}
