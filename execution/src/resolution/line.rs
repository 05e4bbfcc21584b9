use super::{Outcome, Resolver, RollContext};
use crapstable_types::craps::{Bet, BetCategory, BetDefinition, Side};

/// Pass, Don't Pass, Come and Don't Come.
///
/// Come bets play their own come-out on the roll after they are placed and
/// then travel to the number rolled.
pub struct LineResolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    Win,
    Lose,
    Push,
    /// The total becomes the bet's point.
    Point,
    Undecided,
}

/// First roll of a line or come bet.
fn first_roll(side: Side, total: u8) -> Decision {
    match (side, total) {
        (Side::Right, 7 | 11) | (Side::Wrong, 2 | 3) => Decision::Win,
        (Side::Right, 2 | 3 | 12) | (Side::Wrong, 7 | 11) => Decision::Lose,
        (Side::Wrong, 12) => Decision::Push,
        _ => Decision::Point,
    }
}

/// A line or come bet whose point is `number`.
fn on_number(side: Side, number: u8, total: u8) -> Decision {
    match side {
        Side::Right if total == number => Decision::Win,
        Side::Right if total == 7 => Decision::Lose,
        Side::Wrong if total == 7 => Decision::Win,
        Side::Wrong if total == number => Decision::Lose,
        _ => Decision::Undecided,
    }
}

impl Resolver for LineResolver {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome {
        let total = ctx.roll.total;
        let travelling = def.category == BetCategory::Come;
        let decision = match bet.number() {
            Some(number) if travelling => on_number(def.side, number, total),
            None if travelling => first_roll(def.side, total),
            _ if ctx.in_point() => on_number(def.side, ctx.point.number(), total),
            _ => first_roll(def.side, total),
        };
        match decision {
            Decision::Win => Outcome::win(def.payout.apply(bet.amount)),
            Decision::Lose => Outcome::Loss,
            Decision::Push => Outcome::Push,
            Decision::Point if travelling => Outcome::Travel(total),
            Decision::Point | Decision::Undecided => Outcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{bet, context};
    use crate::BetRegistry;
    use crapstable_types::craps::{GameState, Money, Point, Roll, TableConfig};

    fn resolve(bet_type: &str, numbers: &[u8], roll: (u8, u8), state: GameState, point: Point) -> Outcome {
        let registry = BetRegistry::standard();
        let config = TableConfig::default();
        let roll = Roll::from_dice(roll.0, roll.1);
        let ctx = context(&roll, state, point, &config);
        let def = registry.get(bet_type).unwrap();
        LineResolver.resolve(def, &bet(1, bet_type, 10, numbers), &ctx)
    }

    fn come_out(bet_type: &str, roll: (u8, u8)) -> Outcome {
        resolve(bet_type, &[], roll, GameState::ComeOut, Point::Off)
    }

    #[test]
    fn test_pass_line_come_out() {
        let ten = Outcome::win(Money::from_int(10));
        assert_eq!(come_out("PASS_LINE", (3, 4)), ten);
        assert_eq!(come_out("PASS_LINE", (5, 6)), ten);
        assert_eq!(come_out("PASS_LINE", (1, 1)), Outcome::Loss);
        assert_eq!(come_out("PASS_LINE", (1, 2)), Outcome::Loss);
        assert_eq!(come_out("PASS_LINE", (6, 6)), Outcome::Loss);
        assert_eq!(come_out("PASS_LINE", (2, 2)), Outcome::Continue);
    }

    #[test]
    fn test_dont_pass_come_out() {
        let ten = Outcome::win(Money::from_int(10));
        assert_eq!(come_out("DONT_PASS", (3, 4)), Outcome::Loss);
        assert_eq!(come_out("DONT_PASS", (5, 6)), Outcome::Loss);
        assert_eq!(come_out("DONT_PASS", (1, 1)), ten);
        assert_eq!(come_out("DONT_PASS", (1, 2)), ten);
        assert_eq!(come_out("DONT_PASS", (6, 6)), Outcome::Push);
        assert_eq!(come_out("DONT_PASS", (4, 5)), Outcome::Continue);
    }

    #[test]
    fn test_line_bets_with_point_on() {
        let ten = Outcome::win(Money::from_int(10));
        let point = |bet_type, roll| resolve(bet_type, &[], roll, GameState::Point, Point::Five);
        assert_eq!(point("PASS_LINE", (2, 3)), ten);
        assert_eq!(point("PASS_LINE", (3, 4)), Outcome::Loss);
        assert_eq!(point("PASS_LINE", (5, 6)), Outcome::Continue);
        assert_eq!(point("PASS_LINE", (6, 6)), Outcome::Continue);
        assert_eq!(point("DONT_PASS", (3, 4)), ten);
        assert_eq!(point("DONT_PASS", (1, 4)), Outcome::Loss);
    }

    #[test]
    fn test_come_first_roll() {
        let point = |bet_type, roll| resolve(bet_type, &[], roll, GameState::Point, Point::Four);
        assert_eq!(point("COME", (3, 4)), Outcome::win(Money::from_int(10)));
        assert_eq!(point("COME", (6, 6)), Outcome::Loss);
        assert_eq!(point("COME", (4, 4)), Outcome::Travel(8));
        // the table point is not the come bet's concern
        assert_eq!(point("COME", (2, 2)), Outcome::Travel(4));
        assert_eq!(point("DONT_COME", (6, 6)), Outcome::Push);
        assert_eq!(point("DONT_COME", (1, 2)), Outcome::win(Money::from_int(10)));
        assert_eq!(point("DONT_COME", (5, 5)), Outcome::Travel(10));
    }

    #[test]
    fn test_travelled_come() {
        let ten = Outcome::win(Money::from_int(10));
        let with = |bet_type, roll, state, point| resolve(bet_type, &[9], roll, state, point);
        assert_eq!(with("COME", (4, 5), GameState::Point, Point::Six), ten);
        assert_eq!(with("COME", (3, 4), GameState::Point, Point::Six), Outcome::Loss);
        assert_eq!(with("COME", (3, 3), GameState::Point, Point::Six), Outcome::Continue);
        // come bets keep working through the come-out
        assert_eq!(with("COME", (3, 4), GameState::ComeOut, Point::Off), Outcome::Loss);
        assert_eq!(with("COME", (5, 4), GameState::ComeOut, Point::Off), ten);
        assert_eq!(with("DONT_COME", (3, 4), GameState::Point, Point::Six), ten);
        assert_eq!(with("DONT_COME", (6, 3), GameState::Point, Point::Six), Outcome::Loss);
        assert_eq!(with("DONT_COME", (6, 6), GameState::Point, Point::Six), Outcome::Continue);
    }
}
