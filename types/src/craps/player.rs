use super::{Bet, Money};

/// Where a player stands against their session bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    WinGoalReached,
    LossLimitReached,
}

/// Player seated at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub bankroll: Money,
    /// Bankroll when the player sat down; session bounds are measured from here.
    pub starting_bankroll: Money,
    pub bets: Vec<Bet>,
    pub min_bet: Option<Money>,
    pub max_bet: Option<Money>,
    pub win_goal: Option<Money>,
    pub loss_limit: Option<Money>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, bankroll: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bankroll,
            starting_bankroll: bankroll,
            bets: Vec::new(),
            min_bet: None,
            max_bet: None,
            win_goal: None,
            loss_limit: None,
        }
    }

    /// Total stake (plus prepaid commission) currently on the felt.
    pub fn on_table(&self) -> Money {
        self.bets.iter().map(Bet::at_risk).sum()
    }

    /// Bankroll plus everything still on the felt.
    pub fn equity(&self) -> Money {
        self.bankroll + self.on_table()
    }

    /// Session result so far, counting bets on the felt at face value.
    pub fn net_result(&self) -> Money {
        self.equity() - self.starting_bankroll
    }

    pub fn session_status(&self) -> SessionStatus {
        let net = self.net_result();
        if let Some(goal) = self.win_goal {
            if net >= goal {
                return SessionStatus::WinGoalReached;
            }
        }
        if let Some(limit) = self.loss_limit {
            if -net >= limit {
                return SessionStatus::LossLimitReached;
            }
        }
        SessionStatus::Active
    }

    /// Index of the most recently placed bet of `bet_type`.
    pub fn latest_bet_index(&self, bet_type: &str) -> Option<usize> {
        self.bets.iter().rposition(|bet| bet.bet_type == bet_type)
    }

    pub fn bets_of<'a>(&'a self, bet_type: &'a str) -> impl Iterator<Item = &'a Bet> + 'a {
        self.bets.iter().filter(move |bet| bet.bet_type == bet_type)
    }
}
