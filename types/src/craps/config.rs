use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Money, DEFAULT_MAX_BETS_PER_PLAYER, DEFAULT_MAX_ODDS};

/// Field bet payout on 12 (2 always pays double).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPaytable {
    /// 2 and 12 both pay 2:1.
    Double2And12,
    /// 2 pays 2:1, 12 pays 3:1.
    #[default]
    Double2Triple12,
}

impl FieldPaytable {
    /// Winnings-to-stake multiplier for a field total (0 for a losing total).
    pub fn multiplier(self, total: u8) -> u32 {
        match (total, self) {
            (2, _) => 2,
            (12, FieldPaytable::Double2And12) => 2,
            (12, FieldPaytable::Double2Triple12) => 3,
            (3 | 4 | 9 | 10 | 11, _) => 1,
            _ => 0,
        }
    }
}

/// When the 5% vig on buy and lay bets is collected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionTiming {
    /// Charged together with the stake; winners are paid in full.
    AtPlacement,
    /// Deducted from the payout of a winning bet.
    #[default]
    OnWin,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid table config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid limits: min_bet {min} must be > 0 and <= max_bet {max}")]
    InvalidLimits { min: Money, max: Money },
    #[error("max_odds must be > 0 (got {0})")]
    InvalidOdds(u32),
    #[error("max_bets_per_player must be > 0 (got {0})")]
    InvalidBetCap(usize),
}

/// Table rules and limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_min_bet")]
    pub min_bet: Money,
    #[serde(default = "default_max_bet")]
    pub max_bet: Money,
    /// Odds multiplier over the flat bet.
    #[serde(default = "default_max_odds")]
    pub max_odds: u32,
    #[serde(default)]
    pub field_paytable: FieldPaytable,
    #[serde(default)]
    pub commission_timing: CommissionTiming,
    #[serde(default = "default_max_bets_per_player")]
    pub max_bets_per_player: usize,
}

fn default_min_bet() -> Money {
    Money::from_int(5)
}

fn default_max_bet() -> Money {
    Money::from_int(1000)
}

fn default_max_odds() -> u32 {
    DEFAULT_MAX_ODDS
}

fn default_max_bets_per_player() -> usize {
    DEFAULT_MAX_BETS_PER_PLAYER
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_bet: default_min_bet(),
            max_bet: default_max_bet(),
            max_odds: default_max_odds(),
            field_paytable: FieldPaytable::default(),
            commission_timing: CommissionTiming::default(),
            max_bets_per_player: default_max_bets_per_player(),
        }
    }
}

impl TableConfig {
    pub fn new(min_bet: Money, max_bet: Money, max_odds: u32) -> Self {
        Self {
            min_bet,
            max_bet,
            max_odds,
            ..Self::default()
        }
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_bet.is_positive() || self.min_bet > self.max_bet {
            return Err(ConfigError::InvalidLimits {
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        if self.max_odds == 0 {
            return Err(ConfigError::InvalidOdds(self.max_odds));
        }
        if self.max_bets_per_player == 0 {
            return Err(ConfigError::InvalidBetCap(self.max_bets_per_player));
        }
        Ok(())
    }
}
