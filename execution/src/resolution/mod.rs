//! Per-roll bet settlement.
//!
//! Each bet category maps to one [Resolver]. Resolvers are pure: they read the
//! bet, its definition and the roll, and return an [Outcome]. [settle_player]
//! applies outcomes to the bankroll and the bet list.

mod big;
mod bonus;
mod hardway;
mod hop;
mod line;
mod numbers;
mod odds;
mod one_roll;
mod split;

pub use big::BigResolver;
pub use bonus::BonusResolver;
pub use hardway::HardWayResolver;
pub use hop::HopResolver;
pub use line::LineResolver;
pub use numbers::{commission_on, NumberResolver};
pub use odds::OddsResolver;
pub use one_roll::OneRollResolver;
pub use split::SplitResolver;

use crate::{ledger::Ledger, BetRegistry};
use crapstable_types::craps::{
    Bet, BetCategory, BetDefinition, BetId, GameState, Money, Player, Point, Roll, TableConfig,
    Working,
};
use std::fmt;
use tracing::{debug, warn};

/// Everything a resolver may look at besides the bet itself.
///
/// `state` and `point` are the values from before the roll.
#[derive(Clone, Copy, Debug)]
pub struct RollContext<'a> {
    pub roll: &'a Roll,
    pub state: GameState,
    pub point: Point,
    /// Bit `n` set for every point `n` the current shooter has made.
    pub made_points: u16,
    pub config: &'a TableConfig,
}

impl<'a> RollContext<'a> {
    pub fn new(
        roll: &'a Roll,
        state: GameState,
        point: Point,
        made_points: u16,
        config: &'a TableConfig,
    ) -> Self {
        Self {
            roll,
            state,
            point,
            made_points,
            config,
        }
    }

    /// A 7 with the point on.
    pub fn is_seven_out(&self) -> bool {
        self.state == GameState::Point && self.point.is_on() && self.roll.total == 7
    }

    pub fn in_point(&self) -> bool {
        self.state == GameState::Point && self.point.is_on()
    }
}

/// Bit for `number` in a made-points or progress mask.
pub fn number_bit(number: u8) -> u16 {
    if number < 16 {
        1 << number
    } else {
        0
    }
}

/// Result of one bet against one roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Winnings (stake excluded) and the commission taken out of them.
    Win { payout: Money, commission: Money },
    Loss,
    /// Stake returned, no winnings.
    Push,
    /// Still working, unchanged.
    Continue,
    /// A come bet moving to its number.
    Travel(u8),
    /// Still working with an updated progress mask.
    Progress(u16),
}

impl Outcome {
    pub fn win(payout: Money) -> Self {
        Outcome::Win {
            payout,
            commission: Money::ZERO,
        }
    }
}

/// Resolution strategy for one family of bets.
pub trait Resolver: Sync {
    fn resolve(&self, def: &BetDefinition, bet: &Bet, ctx: &RollContext<'_>) -> Outcome;
}

/// The resolver for a bet category.
pub fn resolver_for(category: BetCategory) -> &'static dyn Resolver {
    match category {
        BetCategory::Line | BetCategory::Come => &LineResolver,
        BetCategory::Odds => &OddsResolver,
        BetCategory::Place | BetCategory::Buy | BetCategory::Lay | BetCategory::PlaceToLose => {
            &NumberResolver
        }
        BetCategory::HardWay => &HardWayResolver,
        BetCategory::Field | BetCategory::Proposition => &OneRollResolver,
        BetCategory::Horn | BetCategory::Combination => &SplitResolver,
        BetCategory::Hop => &HopResolver,
        BetCategory::Big => &BigResolver,
        BetCategory::Bonus => &BonusResolver,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettlementKind {
    Won {
        net: Money,
        commission: Money,
        stays_up: bool,
    },
    Lost,
    Pushed,
    /// Come bet travelled to its number.
    Moved(u8),
    /// Taken down at the seven-out and refunded.
    TakenDown,
    /// Could not be resolved; any positive stake was refunded.
    Voided { reason: String },
}

/// What happened to one bet on one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub player_id: String,
    pub bet_id: BetId,
    pub bet_type: String,
    pub stake: Money,
    /// Amount returned to the bankroll by this settlement.
    pub credited: Money,
    pub kind: SettlementKind,
}

impl Settlement {
    pub fn is_error(&self) -> bool {
        matches!(self.kind, SettlementKind::Voided { .. })
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (player, bet_type) = (&self.player_id, &self.bet_type);
        match &self.kind {
            SettlementKind::Won {
                net,
                commission,
                stays_up,
            } => {
                write!(f, "{player}: {bet_type} wins {net}")?;
                if commission.is_positive() {
                    write!(f, " after {commission} commission")?;
                }
                if *stays_up {
                    write!(f, " (bet stays up)")
                } else {
                    write!(f, " ({} returned)", self.credited)
                }
            }
            SettlementKind::Lost => write!(f, "{player}: {bet_type} loses {}", self.stake),
            SettlementKind::Pushed => {
                write!(f, "{player}: {bet_type} pushes, {} returned", self.credited)
            }
            SettlementKind::Moved(number) => write!(f, "{player}: {bet_type} moves to {number}"),
            SettlementKind::TakenDown => write!(
                f,
                "{player}: {bet_type} taken down on the seven-out, {} returned",
                self.credited
            ),
            SettlementKind::Voided { reason } => write!(
                f,
                "error: {player}: {bet_type} (bet {}) voided: {reason}",
                self.bet_id
            ),
        }
    }
}

fn settlement(bet: &Bet, credited: Money, kind: SettlementKind) -> Settlement {
    Settlement {
        player_id: bet.player_id.clone(),
        bet_id: bet.id,
        bet_type: bet.bet_type.clone(),
        stake: bet.amount,
        credited,
        kind,
    }
}

fn void(player: &mut Player, bet: &Bet, reason: String) -> Settlement {
    let refund = bet.at_risk().max(Money::ZERO);
    player.credit(refund);
    warn!(player = %player.id, bet_id = bet.id, bet_type = %bet.bet_type, %reason, "bet voided");
    settlement(bet, refund, SettlementKind::Voided { reason })
}

/// Give back everything a bet has cost without deciding it.
fn return_stake(player: &mut Player, bet: &Bet) -> Settlement {
    let refund = bet.at_risk();
    player.credit(refund);
    debug!(player = %player.id, bet_type = %bet.bet_type, %refund, "push");
    settlement(bet, refund, SettlementKind::Pushed)
}

/// True if `bets` still holds the flat bet that `odds` backs.
fn has_base(registry: &BetRegistry, def: &BetDefinition, odds: &Bet, bets: &[Bet]) -> bool {
    let Some(base) = def.base else {
        return false;
    };
    let behind_line = registry
        .get(base)
        .is_some_and(|base_def| base_def.category == BetCategory::Line);
    bets.iter()
        .any(|bet| bet.bet_type == base && (behind_line || bet.number() == odds.number()))
}

/// Ids of the odds bets in `bets` with no flat bet left behind them.
pub fn stranded_odds(registry: &BetRegistry, bets: &[Bet]) -> Vec<BetId> {
    bets.iter()
        .filter(|bet| {
            registry.get(&bet.bet_type).is_some_and(|def| {
                def.category == BetCategory::Odds && !has_base(registry, def, bet, bets)
            })
        })
        .map(|bet| bet.id)
        .collect()
}

/// Settle every bet a player has on the felt against one roll.
///
/// Bets are visited in placement order. Unknown or malformed bets are voided
/// and dropped without stopping the rest. Odds never outlive the flat bet they
/// back: odds without one are returned instead of resolved, and odds that were
/// off when their flat bet was decided come down with it.
pub fn settle_player(
    player: &mut Player,
    registry: &BetRegistry,
    ctx: &RollContext<'_>,
) -> Vec<Settlement> {
    let mut settlements = Vec::new();
    let bets = std::mem::take(&mut player.bets);
    let stranded = stranded_odds(registry, &bets);
    let mut kept = Vec::with_capacity(bets.len());

    for mut bet in bets {
        let Some(def) = registry.get(&bet.bet_type) else {
            let reason = format!("unknown bet type {}", bet.bet_type);
            settlements.push(void(player, &bet, reason));
            continue;
        };
        if !bet.amount.is_positive() {
            let reason = format!("non-positive amount {}", bet.amount);
            settlements.push(void(player, &bet, reason));
            continue;
        }
        if stranded.contains(&bet.id) {
            settlements.push(return_stake(player, &bet));
            continue;
        }
        if !bet.working || (def.working == Working::Conditional && !ctx.in_point()) {
            kept.push(bet);
            continue;
        }

        let outcome = resolver_for(def.category).resolve(def, &bet, ctx);
        match outcome {
            Outcome::Continue => kept.push(bet),
            Outcome::Progress(mask) => {
                bet.progress = mask;
                kept.push(bet);
            }
            Outcome::Travel(number) => {
                bet.numbers = vec![number];
                debug!(player = %player.id, bet_type = %bet.bet_type, number, "travel");
                settlements.push(settlement(&bet, Money::ZERO, SettlementKind::Moved(number)));
                kept.push(bet);
            }
            Outcome::Push => settlements.push(return_stake(player, &bet)),
            Outcome::Loss => {
                debug!(player = %player.id, bet_type = %bet.bet_type, amount = %bet.amount, "loss");
                settlements.push(settlement(&bet, Money::ZERO, SettlementKind::Lost));
            }
            Outcome::Win { payout, commission } => {
                let net = (payout - commission).max(Money::ZERO);
                let stays_up = def.category.persists_on_win();
                let credited = if stays_up { net } else { bet.amount + net };
                player.credit(credited);
                debug!(
                    player = %player.id,
                    bet_type = %bet.bet_type,
                    %net,
                    %commission,
                    stays_up,
                    "win"
                );
                let kind = SettlementKind::Won {
                    net,
                    commission,
                    stays_up,
                };
                settlements.push(settlement(&bet, credited, kind));
                if stays_up {
                    kept.push(bet);
                }
            }
        }
    }

    let stranded = stranded_odds(registry, &kept);
    if !stranded.is_empty() {
        let (returned, survivors): (Vec<Bet>, Vec<Bet>) = kept
            .into_iter()
            .partition(|bet| stranded.contains(&bet.id));
        for bet in &returned {
            settlements.push(return_stake(player, bet));
        }
        kept = survivors;
    }

    if ctx.is_seven_out() {
        let mut survivors = Vec::with_capacity(kept.len());
        for bet in kept {
            let purged = registry
                .get(&bet.bet_type)
                .is_some_and(|def| def.category.purged_on_seven_out());
            if purged {
                let refund = bet.at_risk();
                player.credit(refund);
                debug!(player = %player.id, bet_type = %bet.bet_type, %refund, "taken down");
                settlements.push(settlement(&bet, refund, SettlementKind::TakenDown));
            } else {
                survivors.push(bet);
            }
        }
        kept = survivors;
    }

    player.bets = kept;
    settlements
}
