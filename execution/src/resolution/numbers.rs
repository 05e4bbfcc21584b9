use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{
    Bet, BetDefinition, CommissionTiming, Money, Side, BPS_DENOMINATOR,
};

/// Place, Buy, Lay and Place-to-Lose: one number against the 7.
///
/// Winners stay up. Buy and lay winners pay the registry ratio less the
/// commission on the payout, unless it was collected at placement.
pub struct NumberResolver;

/// Commission on `payout` at `bps` basis points.
pub fn commission_on(payout: Money, bps: u16) -> Money {
    payout.mul_ratio(bps as u32, BPS_DENOMINATOR)
}

impl Resolver for NumberResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let Some(number) = def.number else {
            return Outcome::Continue;
        };
        let total = ctx.roll.total;
        let (wins, loses) = match def.side {
            Side::Right => (total == number, total == 7),
            Side::Wrong => (total == 7, total == number),
        };

        if wins {
            let payout = def.payout.apply(bet.amount);
            let commission = match ctx.config.commission_timing {
                CommissionTiming::OnWin if def.has_commission() => {
                    commission_on(payout, def.commission_bps)
                }
                _ => Money::ZERO,
            };
            Outcome::Win { payout, commission }
        } else if loses {
            Outcome::Loss
        } else {
            Outcome::Continue
        }
    }
}
