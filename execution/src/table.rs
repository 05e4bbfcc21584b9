//! The table: players, their bets, the dice and the puck.

use crate::{
    dice::{DiceSource, SecureDice},
    ledger::Ledger,
    resolution::{
        commission_on, number_bit, settle_player, stranded_odds, RollContext, Settlement,
    },
    state_machine::{GameStateMachine, Transition},
    BetRegistry, TableError,
};
use crapstable_types::craps::{
    Bet, BetCategory, BetDefinition, BetId, CommissionTiming, ConfigError, GameState, Money,
    Player, Point, Roll, SessionStatus, Side, TableConfig, MAX_NAME_LENGTH,
    MAX_PLAYER_ID_LENGTH,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything that happened on one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub roll: Roll,
    pub transition: Transition,
    pub settlements: Vec<Settlement>,
}

impl Turn {
    /// Human-readable settlement lines.
    pub fn messages(&self) -> Vec<String> {
        self.settlements.iter().map(ToString::to_string).collect()
    }
}

/// A single craps table.
///
/// The table exclusively owns its players and every bet on the felt. All
/// mutating operations either succeed completely or return a [TableError]
/// without touching any bankroll or bet list.
pub struct Table {
    config: TableConfig,
    registry: Arc<BetRegistry>,
    dice: Box<dyn DiceSource + Send>,
    machine: GameStateMachine,
    players: HashMap<String, Player>,
    /// Player ids in seat order.
    seats: Vec<String>,
    /// Seat index of the shooter.
    shooter: Option<usize>,
    last_roll: Option<Roll>,
    /// Points made by the current shooter, one bit per number.
    made_points: u16,
    /// Rolls thrown by the current shooter.
    shooter_rolls: u32,
    next_bet_id: BetId,
}

impl Table {
    /// A table with the standard layout and secure dice.
    pub fn new(min_bet: Money, max_bet: Money, max_odds: u32) -> Self {
        Self::build(
            TableConfig::new(min_bet, max_bet, max_odds),
            Arc::new(BetRegistry::standard()),
            Box::new(SecureDice::new()),
        )
    }

    pub fn from_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_dice(config, SecureDice::new())
    }

    pub fn with_dice(
        config: TableConfig,
        dice: impl DiceSource + Send + 'static,
    ) -> Result<Self, ConfigError> {
        Self::with_parts(config, Arc::new(BetRegistry::standard()), Box::new(dice))
    }

    /// Build from a validated config, a shared registry and a dice source.
    pub fn with_parts(
        config: TableConfig,
        registry: Arc<BetRegistry>,
        dice: Box<dyn DiceSource + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, registry, dice))
    }

    fn build(
        config: TableConfig,
        registry: Arc<BetRegistry>,
        dice: Box<dyn DiceSource + Send>,
    ) -> Self {
        Self {
            config,
            registry,
            dice,
            machine: GameStateMachine::new(),
            players: HashMap::new(),
            seats: Vec::new(),
            shooter: None,
            last_roll: None,
            made_points: 0,
            shooter_rolls: 0,
            next_bet_id: 1,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<BetRegistry> {
        &self.registry
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn point(&self) -> Point {
        self.machine.point()
    }

    /// The point number, or 0 when the puck is off.
    pub fn point_number(&self) -> u8 {
        self.machine.point().number()
    }

    /// Id of the player holding the dice.
    pub fn shooter(&self) -> Option<&str> {
        self.shooter
            .and_then(|seat| self.seats.get(seat))
            .map(String::as_str)
    }

    pub fn last_roll(&self) -> Option<&Roll> {
        self.last_roll.as_ref()
    }

    pub fn made_points(&self) -> u16 {
        self.made_points
    }

    pub fn shooter_rolls(&self) -> u32 {
        self.shooter_rolls
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Players in seat order.
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.seats.iter().filter_map(|id| self.players.get(id))
    }

    pub fn bet_definition(&self, bet_type: &str) -> Option<&BetDefinition> {
        self.registry.get(bet_type)
    }

    pub fn all_bet_types(&self) -> Vec<&'static str> {
        self.registry.all_bet_types()
    }

    pub fn bets_by_category(&self) -> BTreeMap<BetCategory, Vec<&BetDefinition>> {
        self.registry.bets_by_category()
    }

    pub fn one_roll_bets(&self) -> Vec<&BetDefinition> {
        self.registry.one_roll_bets()
    }

    pub fn bets_by_house_edge(&self) -> Vec<&BetDefinition> {
        self.registry.bets_by_house_edge()
    }

    pub fn add_player(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        bankroll: Money,
    ) -> Result<(), TableError> {
        let (id, name) = (id.into(), name.into());
        if id.is_empty() || id.len() > MAX_PLAYER_ID_LENGTH {
            return Err(TableError::InvalidPlayerId(id));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(TableError::InvalidPlayerId(name));
        }
        if bankroll.is_negative() {
            return Err(TableError::InvalidBankroll(bankroll));
        }
        if self.players.contains_key(&id) {
            return Err(TableError::PlayerExists(id));
        }

        info!(player = %id, %name, %bankroll, "player added");
        self.players
            .insert(id.clone(), Player::new(id.clone(), name, bankroll));
        self.seats.push(id);
        if self.shooter.is_none() {
            self.shooter = Some(self.seats.len() - 1);
        }
        Ok(())
    }

    /// Remove a player, returning every bet they had on the felt to their bankroll.
    pub fn remove_player(&mut self, id: &str) -> Result<Player, TableError> {
        let mut player = self
            .players
            .remove(id)
            .ok_or_else(|| TableError::PlayerNotFound(id.to_string()))?;
        for bet in std::mem::take(&mut player.bets) {
            player.credit(bet.at_risk());
        }

        if let Some(seat) = self.seats.iter().position(|seat| seat == id) {
            self.seats.remove(seat);
            self.shooter = match self.shooter {
                _ if self.seats.is_empty() => None,
                Some(shooter) if seat < shooter => Some(shooter - 1),
                // The next seat takes over the hand
                Some(shooter) if seat == shooter => Some(shooter % self.seats.len()),
                other => other,
            };
        }
        info!(player = %id, bankroll = %player.bankroll, "player removed");
        Ok(player)
    }

    /// Per-player overrides of the table limits.
    pub fn set_player_limits(
        &mut self,
        id: &str,
        min_bet: Option<Money>,
        max_bet: Option<Money>,
    ) -> Result<(), TableError> {
        if let (Some(min), Some(max)) = (min_bet, max_bet) {
            if min > max {
                return Err(TableError::AboveMaximum {
                    amount: min,
                    maximum: max,
                });
            }
        }
        for limit in [min_bet, max_bet].into_iter().flatten() {
            if !limit.is_positive() {
                return Err(TableError::NonPositiveAmount(limit));
            }
        }
        let player = self.player_mut(id)?;
        player.min_bet = min_bet;
        player.max_bet = max_bet;
        Ok(())
    }

    /// Win goal and loss limit, both measured from the player's starting bankroll.
    pub fn set_session_bounds(
        &mut self,
        id: &str,
        win_goal: Option<Money>,
        loss_limit: Option<Money>,
    ) -> Result<(), TableError> {
        for bound in [win_goal, loss_limit].into_iter().flatten() {
            if !bound.is_positive() {
                return Err(TableError::NonPositiveAmount(bound));
            }
        }
        let player = self.player_mut(id)?;
        player.win_goal = win_goal;
        player.loss_limit = loss_limit;
        Ok(())
    }

    pub fn session_status(&self, id: &str) -> Result<SessionStatus, TableError> {
        self.players
            .get(id)
            .map(Player::session_status)
            .ok_or_else(|| TableError::PlayerNotFound(id.to_string()))
    }

    fn player_mut(&mut self, id: &str) -> Result<&mut Player, TableError> {
        self.players
            .get_mut(id)
            .ok_or_else(|| TableError::PlayerNotFound(id.to_string()))
    }

    fn definition(&self, bet_type: &str) -> Result<&BetDefinition, TableError> {
        self.registry
            .get(bet_type)
            .ok_or_else(|| TableError::UnknownBetType(bet_type.to_string()))
    }

    /// Commission collected up front for `amount` on `def`, if any.
    fn prepaid_commission(&self, def: &BetDefinition, amount: Money) -> Money {
        if def.has_commission() && self.config.commission_timing == CommissionTiming::AtPlacement
        {
            commission_on(def.payout.apply(amount), def.commission_bps)
        } else {
            Money::ZERO
        }
    }

    /// Check `amount` against the player's (or the table's) limits.
    fn check_limits(
        &self,
        player: &Player,
        def: &BetDefinition,
        amount: Money,
    ) -> Result<(), TableError> {
        let minimum = player.min_bet.unwrap_or(self.config.min_bet);
        let maximum = player.max_bet.unwrap_or(self.config.max_bet);
        if def.category != BetCategory::Odds && amount < minimum {
            return Err(TableError::BelowMinimum { amount, minimum });
        }
        if amount > maximum {
            return Err(TableError::AboveMaximum { amount, maximum });
        }
        Ok(())
    }

    /// Number an odds bet backs, and the most odds allowed behind it.
    fn odds_allowance(
        &self,
        player: &Player,
        def: &BetDefinition,
        numbers: &[u8],
    ) -> Result<(u8, Money), TableError> {
        let base = def.base.unwrap_or_default();
        let missing_base = || TableError::MissingBaseBet {
            bet_type: def.id.to_string(),
            base: base.to_string(),
        };
        let invalid_numbers = || TableError::InvalidNumbers {
            bet_type: def.id.to_string(),
            numbers: numbers.to_vec(),
        };
        let backs_line = self
            .registry
            .get(base)
            .is_some_and(|base_def| base_def.category == BetCategory::Line);

        let number = if backs_line {
            let point = self.point_number();
            match numbers {
                [] => point,
                [n] if *n == point => point,
                _ => return Err(invalid_numbers()),
            }
        } else {
            match numbers {
                [] => player
                    .bets_of(base)
                    .filter_map(Bet::number)
                    .last()
                    .ok_or_else(missing_base)?,
                [n] if Point::from_number(*n).is_some() => *n,
                _ => return Err(invalid_numbers()),
            }
        };

        let base_stake: Money = player
            .bets_of(base)
            .filter(|bet| backs_line || bet.number() == Some(number))
            .map(|bet| bet.amount)
            .sum();
        if !base_stake.is_positive() {
            return Err(missing_base());
        }
        Ok((number, base_stake.times(self.config.max_odds)))
    }

    /// Odds already behind `number`, excluding the bet at `skip`.
    fn existing_odds(player: &Player, bet_type: &str, number: u8, skip: Option<usize>) -> Money {
        player
            .bets
            .iter()
            .enumerate()
            .filter(|(i, bet)| {
                Some(*i) != skip && bet.bet_type == bet_type && bet.number() == Some(number)
            })
            .map(|(_, bet)| bet.amount)
            .sum()
    }

    /// Numbers stored on a new bet of type `def`.
    fn bet_numbers(def: &BetDefinition, numbers: &[u8]) -> Result<Vec<u8>, TableError> {
        let invalid = || TableError::InvalidNumbers {
            bet_type: def.id.to_string(),
            numbers: numbers.to_vec(),
        };
        if let Some(number) = def.number {
            return match numbers {
                [] => Ok(vec![number]),
                [n] if *n == number => Ok(vec![number]),
                _ => Err(invalid()),
            };
        }
        if let Some((a, b)) = def.dice {
            return match numbers {
                [] => Ok(vec![a, b]),
                [x, y] if (*x, *y) == (a, b) || (*x, *y) == (b, a) => Ok(vec![a, b]),
                _ => Err(invalid()),
            };
        }
        if numbers.is_empty() {
            Ok(Vec::new())
        } else {
            Err(invalid())
        }
    }

    /// Validate and place a bet. The stake (and any up-front commission) is
    /// debited from the player's bankroll.
    pub fn place_bet(
        &mut self,
        player_id: &str,
        bet_type: &str,
        amount: Money,
        numbers: &[u8],
    ) -> Result<&Bet, TableError> {
        let registry = Arc::clone(&self.registry);
        let player = self
            .players
            .get(player_id)
            .ok_or_else(|| TableError::PlayerNotFound(player_id.to_string()))?;
        let def = registry
            .get(bet_type)
            .ok_or_else(|| TableError::UnknownBetType(bet_type.to_string()))?;
        if !amount.is_positive() {
            return Err(TableError::NonPositiveAmount(amount));
        }
        if player.session_status() != SessionStatus::Active {
            return Err(TableError::SessionLimitReached(player_id.to_string()));
        }
        if player.bets.len() >= self.config.max_bets_per_player {
            return Err(TableError::TooManyBets {
                player: player_id.to_string(),
                limit: self.config.max_bets_per_player,
            });
        }

        let state = self.state();
        if (def.requires_point && state != GameState::Point)
            || (def.requires_come_out && state != GameState::ComeOut)
        {
            return Err(TableError::WrongPhase {
                bet_type: bet_type.to_string(),
                state,
            });
        }
        if def.category == BetCategory::Bonus && self.shooter_rolls > 0 {
            return Err(TableError::BonusClosed(bet_type.to_string()));
        }

        let numbers = if def.category == BetCategory::Odds {
            let (number, allowed) = self.odds_allowance(player, def, numbers)?;
            let requested = Self::existing_odds(player, bet_type, number, None) + amount;
            if requested > allowed {
                return Err(TableError::OddsLimitExceeded { requested, allowed });
            }
            vec![number]
        } else {
            Self::bet_numbers(def, numbers)?
        };
        self.check_limits(player, def, amount)?;

        let prepaid = self.prepaid_commission(def, amount);
        player.ensure_funds(amount + prepaid)?;

        let id = self.next_bet_id;
        self.next_bet_id += 1;
        let mut bet = Bet::new(id, def.id, amount, player_id, numbers);
        bet.prepaid_commission = prepaid;

        let player = self.player_mut(player_id)?;
        player.debit(amount + prepaid)?;
        debug!(
            player = %player_id,
            bet_type = %bet.bet_type,
            %amount,
            commission = %prepaid,
            numbers = ?bet.numbers,
            "bet placed"
        );
        player.bets.push(bet);
        let index = player.bets.len() - 1;
        Ok(&player.bets[index])
    }

    /// Contract bets may not be taken down or changed once they are in action.
    fn check_contract(&self, def: &BetDefinition, bet: &Bet) -> Result<(), TableError> {
        let locked = match def.category {
            BetCategory::Line => def.id == "PASS_LINE" && self.state() == GameState::Point,
            BetCategory::Come => def.side == Side::Right && bet.number().is_some(),
            BetCategory::Bonus => self.shooter_rolls > 0,
            _ => false,
        };
        if locked {
            return Err(TableError::ContractBet(def.id.to_string()));
        }
        Ok(())
    }

    fn latest_bet(&self, player_id: &str, bet_type: &str) -> Result<usize, TableError> {
        let player = self
            .players
            .get(player_id)
            .ok_or_else(|| TableError::PlayerNotFound(player_id.to_string()))?;
        player
            .latest_bet_index(bet_type)
            .ok_or_else(|| TableError::BetNotFound {
                player: player_id.to_string(),
                bet_type: bet_type.to_string(),
            })
    }

    /// Add `amount` to the player's most recent bet of `bet_type`.
    pub fn press_bet(
        &mut self,
        player_id: &str,
        bet_type: &str,
        amount: Money,
    ) -> Result<(), TableError> {
        let def = self.definition(bet_type)?;
        if !amount.is_positive() {
            return Err(TableError::NonPositiveAmount(amount));
        }
        let index = self.latest_bet(player_id, bet_type)?;
        let player = self
            .players
            .get(player_id)
            .ok_or_else(|| TableError::PlayerNotFound(player_id.to_string()))?;
        let bet = &player.bets[index];
        self.check_contract(def, bet)?;

        let pressed = bet.amount + amount;
        self.check_limits(player, def, pressed)?;
        if def.category == BetCategory::Odds {
            let number = bet.number().unwrap_or_default();
            let (_, allowed) = self.odds_allowance(player, def, &bet.numbers)?;
            let requested = Self::existing_odds(player, bet_type, number, Some(index)) + pressed;
            if requested > allowed {
                return Err(TableError::OddsLimitExceeded { requested, allowed });
            }
        }
        let extra_commission =
            (self.prepaid_commission(def, pressed) - bet.prepaid_commission).max(Money::ZERO);
        player.ensure_funds(amount + extra_commission)?;

        let player = self.player_mut(player_id)?;
        player.debit(amount + extra_commission)?;
        let bet = &mut player.bets[index];
        bet.amount = pressed;
        bet.prepaid_commission += extra_commission;
        debug!(player = %player_id, %bet_type, amount = %pressed, "bet pressed");
        Ok(())
    }

    /// Turn the player's most recent bet of `bet_type` on or off.
    pub fn turn_bet(
        &mut self,
        player_id: &str,
        bet_type: &str,
        working: bool,
    ) -> Result<(), TableError> {
        let def = self.definition(bet_type)?;
        let fixed = def.is_one_roll()
            || matches!(
                def.category,
                BetCategory::Line | BetCategory::Come | BetCategory::Bonus
            );
        if fixed && !working {
            return Err(TableError::CannotTurnOff(bet_type.to_string()));
        }
        let index = self.latest_bet(player_id, bet_type)?;
        let player = self.player_mut(player_id)?;
        player.bets[index].working = working;
        debug!(player = %player_id, %bet_type, working, "bet turned");
        Ok(())
    }

    /// Take down the player's most recent bet of `bet_type`, refunding it.
    /// Odds left with nothing behind them come down and are refunded too.
    pub fn remove_bet(&mut self, player_id: &str, bet_type: &str) -> Result<Bet, TableError> {
        let def = self.definition(bet_type)?;
        let index = self.latest_bet(player_id, bet_type)?;
        if let Some(bet) = self.players.get(player_id).map(|player| &player.bets[index]) {
            self.check_contract(def, bet)?;
        }

        let registry = Arc::clone(&self.registry);
        let player = self.player_mut(player_id)?;
        let bet = player.bets.remove(index);
        player.credit(bet.at_risk());
        debug!(player = %player_id, %bet_type, refund = %bet.at_risk(), "bet removed");

        let stranded = stranded_odds(&registry, &player.bets);
        if !stranded.is_empty() {
            let (odds, kept): (Vec<Bet>, Vec<Bet>) = std::mem::take(&mut player.bets)
                .into_iter()
                .partition(|odds| stranded.contains(&odds.id));
            player.bets = kept;
            for odds in odds {
                player.credit(odds.at_risk());
                debug!(
                    player = %player_id,
                    bet_type = %odds.bet_type,
                    refund = %odds.at_risk(),
                    "odds taken down with their base bet"
                );
            }
        }
        Ok(bet)
    }

    /// Throw the dice. Does not touch bets or the game state.
    pub fn roll_dice(&mut self) -> Roll {
        self.dice.roll()
    }

    /// Settle every bet on the felt against `roll`, using the state from
    /// before the roll.
    pub fn settle(&mut self, roll: &Roll) -> Vec<Settlement> {
        let ctx = RollContext::new(
            roll,
            self.machine.state(),
            self.machine.point(),
            self.made_points,
            &self.config,
        );
        let mut settlements = Vec::new();
        for id in &self.seats {
            if let Some(player) = self.players.get_mut(id) {
                settlements.extend(settle_player(player, &self.registry, &ctx));
            }
        }
        settlements
    }

    /// [Table::settle], rendered as result lines.
    pub fn resolve_all_bets(&mut self, roll: &Roll) -> Vec<String> {
        self.settle(roll).iter().map(ToString::to_string).collect()
    }

    /// Advance the puck and the shooter for `roll`. Call after settling.
    pub fn update_game_state_only(&mut self, roll: &Roll) -> Transition {
        let transition = self.machine.advance(roll);
        self.last_roll = Some(*roll);
        self.shooter_rolls += 1;
        match transition {
            Transition::PointMade(number) => self.made_points |= number_bit(number),
            Transition::SevenOut => self.next_shooter(),
            _ => {}
        }
        transition
    }

    fn next_shooter(&mut self) {
        self.made_points = 0;
        self.shooter_rolls = 0;
        if self.seats.is_empty() {
            self.shooter = None;
            return;
        }
        let next = self.shooter.map_or(0, |seat| (seat + 1) % self.seats.len());
        self.shooter = Some(next);
        info!(shooter = %self.seats[next], "new shooter");
    }

    /// Roll, settle and advance as one step.
    pub fn execute_turn(&mut self) -> Turn {
        let roll = self.roll_dice();
        let settlements = self.settle(&roll);
        let transition = self.update_game_state_only(&roll);
        Turn {
            roll,
            transition,
            settlements,
        }
    }

    /// [Table::execute_turn], with settlements rendered as result lines.
    pub fn execute_game_turn(&mut self) -> (Roll, Vec<String>) {
        let turn = self.execute_turn();
        let messages = turn.messages();
        (turn.roll, messages)
    }
}
