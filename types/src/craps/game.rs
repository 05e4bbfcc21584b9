use serde::{Deserialize, Serialize};
use std::fmt;

/// Table phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    ComeOut,
    Point,
    /// Entered and left within a single roll; never observable between turns.
    SevenOut,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::ComeOut => "come-out",
            GameState::Point => "point",
            GameState::SevenOut => "seven-out",
        };
        f.write_str(label)
    }
}

/// The point marker.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Point {
    #[default]
    Off = 0,
    Four = 4,
    Five = 5,
    Six = 6,
    Eight = 8,
    Nine = 9,
    Ten = 10,
}

impl Point {
    /// The point for a rolled total, if that total can be a point.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            4 => Some(Point::Four),
            5 => Some(Point::Five),
            6 => Some(Point::Six),
            8 => Some(Point::Eight),
            9 => Some(Point::Nine),
            10 => Some(Point::Ten),
            _ => None,
        }
    }

    /// The point number, or 0 when the puck is off.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn is_on(self) -> bool {
        self != Point::Off
    }
}

impl TryFrom<u8> for Point {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(Point::Off),
            n => Point::from_number(n).ok_or(()),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Off => f.write_str("off"),
            point => write!(f, "{}", point.number()),
        }
    }
}

/// Bet families as laid out on the felt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BetCategory {
    Line,
    Come,
    Odds,
    Field,
    Place,
    Buy,
    Lay,
    PlaceToLose,
    HardWay,
    Proposition,
    Horn,
    Hop,
    Big,
    Combination,
    Bonus,
}

impl BetCategory {
    /// Winners stay up and are paid without returning the stake.
    pub fn persists_on_win(self) -> bool {
        matches!(
            self,
            BetCategory::Place
                | BetCategory::Buy
                | BetCategory::Lay
                | BetCategory::PlaceToLose
                | BetCategory::HardWay
        )
    }

    /// Taken down when the shooter sevens out.
    pub fn purged_on_seven_out(self) -> bool {
        self.persists_on_win()
    }
}

impl fmt::Display for BetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BetCategory::Line => "Line",
            BetCategory::Come => "Come",
            BetCategory::Odds => "Odds",
            BetCategory::Field => "Field",
            BetCategory::Place => "Place",
            BetCategory::Buy => "Buy",
            BetCategory::Lay => "Lay",
            BetCategory::PlaceToLose => "Place to Lose",
            BetCategory::HardWay => "Hard Way",
            BetCategory::Proposition => "Proposition",
            BetCategory::Horn => "Horn",
            BetCategory::Hop => "Hop",
            BetCategory::Big => "Big",
            BetCategory::Combination => "Combination",
            BetCategory::Bonus => "Bonus",
        };
        f.write_str(label)
    }
}

/// When a bet is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Working {
    /// Resolved on the next roll, whatever it is.
    OneRoll,
    /// Live on every roll while its working flag is set.
    Always,
    /// Live only while a point is established.
    Conditional,
}

/// Which way the bettor is playing the dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// With the shooter: wins on the number, loses on 7.
    Right,
    /// Against the shooter: wins on 7, loses on the number.
    Wrong,
}
