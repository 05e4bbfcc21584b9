use std::fmt;

use super::{now_millis, BetCategory, Money, Side, Working};

/// Table-unique bet identifier.
pub type BetId = u64;

/// Payout ratio expressed "numerator to denominator" (winnings only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Payout {
    pub numerator: u32,
    pub denominator: u32,
}

impl Payout {
    /// 0/0: odds depend on the point and are computed at resolution time.
    pub const VARIABLE: Payout = Payout::new(0, 0);
    pub const EVEN: Payout = Payout::new(1, 1);

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.denominator == 0
    }

    /// The same odds from the other side of the table (2:1 becomes 1:2).
    pub fn inverse(&self) -> Self {
        Payout::new(self.denominator, self.numerator)
    }

    /// Winnings for `stake` (stake not included).
    pub fn apply(&self, stake: Money) -> Money {
        stake.mul_ratio(self.numerator, self.denominator)
    }
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_variable() {
            f.write_str("true odds")
        } else {
            write!(f, "{}:{}", self.numerator, self.denominator)
        }
    }
}

/// One leg of a split (composite) bet such as the Horn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitLeg {
    pub totals: &'static [u8],
    pub payout: Payout,
    /// Share of the stake carried by this leg, relative to the other legs.
    pub weight: u32,
}

/// Canonical, immutable description of a bet type.
#[derive(Clone, Debug, PartialEq)]
pub struct BetDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub category: BetCategory,
    pub side: Side,
    pub payout: Payout,
    pub working: Working,
    /// The number the bet is keyed to (place, buy, lay, hard ways, big 6/8).
    pub number: Option<u8>,
    /// Winning totals for one-roll bets; required totals for All/Tall/Small.
    pub winning_totals: &'static [u8],
    pub legs: &'static [SplitLeg],
    /// Exact dice for hop bets, in either order.
    pub dice: Option<(u8, u8)>,
    /// Contract bet that an odds bet is laid behind.
    pub base: Option<&'static str>,
    pub requires_point: bool,
    pub requires_come_out: bool,
    pub commission_bps: u16,
    /// House edge in percent of the amount wagered.
    pub house_edge: f64,
    pub description: &'static str,
}

impl BetDefinition {
    pub fn is_one_roll(&self) -> bool {
        self.working == Working::OneRoll
    }

    pub fn has_commission(&self) -> bool {
        self.commission_bps > 0
    }
}

/// A wager sitting on the felt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bet {
    pub id: BetId,
    pub bet_type: String,
    pub amount: Money,
    pub player_id: String,
    /// Off bets are skipped by resolution.
    pub working: bool,
    /// Come point once travelled, the come point odds are behind, or hop dice.
    pub numbers: Vec<u8>,
    /// Milliseconds since the Unix epoch
    pub placed_at: u64,
    /// Totals seen so far (All/Tall/Small bets), one bit per total.
    pub progress: u16,
    /// Commission charged at placement; returned if the bet is taken down.
    pub prepaid_commission: Money,
}

impl Bet {
    pub fn new(
        id: BetId,
        bet_type: impl Into<String>,
        amount: Money,
        player_id: impl Into<String>,
        numbers: Vec<u8>,
    ) -> Self {
        Self {
            id,
            bet_type: bet_type.into(),
            amount,
            player_id: player_id.into(),
            working: true,
            numbers,
            placed_at: now_millis(),
            progress: 0,
            prepaid_commission: Money::ZERO,
        }
    }

    /// First associated number (come point, keyed number).
    pub fn number(&self) -> Option<u8> {
        self.numbers.first().copied()
    }

    /// Everything this bet has cost the player so far.
    pub fn at_risk(&self) -> Money {
        self.amount + self.prepaid_commission
    }
}
