use super::{number_bit, Outcome, Resolver, RollContext};
use crate::registry::fire_payout;
use crapstable_types::craps::{Bet, BetDefinition};

/// Shooter-long side bets: Fire and All/Tall/Small.
///
/// Fire is settled at the seven-out on the number of different points the
/// shooter made. All/Tall/Small record every required total rolled and pay as
/// soon as the set is complete; an incomplete set loses at the seven-out.
pub struct BonusResolver;

/// Progress mask for a set of totals.
pub fn required_mask(totals: &[u8]) -> u16 {
    totals.iter().fold(0, |mask, total| mask | number_bit(*total))
}

impl Resolver for BonusResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        if def.payout.is_variable() {
            if !ctx.is_seven_out() {
                return Outcome::Continue;
            }
            return match fire_payout(ctx.made_points.count_ones()) {
                0 => Outcome::Loss,
                multiplier => Outcome::win(bet.amount.times(multiplier)),
            };
        }

        if ctx.is_seven_out() {
            return Outcome::Loss;
        }
        let required = required_mask(def.winning_totals);
        let progress = bet.progress | (number_bit(ctx.roll.total) & required);
        if required != 0 && progress & required == required {
            Outcome::win(def.payout.apply(bet.amount))
        } else if progress != bet.progress {
            Outcome::Progress(progress)
        } else {
            Outcome::Continue
        }
    }
}
