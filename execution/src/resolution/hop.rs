use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{Bet, BetDefinition};

/// Hop bets: the whole stake on one exact pair of faces.
pub struct HopResolver;

impl Resolver for HopResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let Some((a, b)) = def.dice else {
            return Outcome::Push;
        };
        let (d1, d2) = (ctx.roll.die1, ctx.roll.die2);
        if (d1, d2) == (a, b) || (d1, d2) == (b, a) {
            Outcome::win(def.payout.apply(bet.amount))
        } else {
            Outcome::Loss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{bet, context};
    use crate::BetRegistry;
    use crapstable_types::craps::{GameState, Money, Point, Roll, TableConfig};

    fn resolve(bet_type: &str, roll: (u8, u8)) -> Outcome {
        let registry = BetRegistry::standard();
        let config = TableConfig::default();
        let roll = Roll::from_dice(roll.0, roll.1);
        let ctx = context(&roll, GameState::ComeOut, Point::Off, &config);
        let def = registry.get(bet_type).unwrap();
        HopResolver.resolve(def, &bet(1, bet_type, 2, &[]), &ctx)
    }

    #[test]
    fn test_hop_either_order() {
        assert_eq!(resolve("HOP_2_5", (2, 5)), Outcome::win(Money::from_int(30)));
        assert_eq!(resolve("HOP_2_5", (5, 2)), Outcome::win(Money::from_int(30)));
        assert_eq!(resolve("HOP_2_5", (3, 4)), Outcome::Loss);
    }

    #[test]
    fn test_hop_pair() {
        assert_eq!(resolve("HOP_4_4", (4, 4)), Outcome::win(Money::from_int(60)));
        assert_eq!(resolve("HOP_4_4", (2, 6)), Outcome::Loss);
    }
}
