//! Come-out / point progression.

use crapstable_types::craps::{GameState, Point, Roll};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// What a roll did to the table phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// 7 or 11 on the come-out.
    Natural,
    /// 2, 3 or 12 on the come-out.
    Craps,
    PointEstablished(u8),
    PointMade(u8),
    SevenOut,
    NoChange,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Natural => f.write_str("natural"),
            Transition::Craps => f.write_str("craps"),
            Transition::PointEstablished(n) => write!(f, "point established on {n}"),
            Transition::PointMade(n) => write!(f, "point {n} made"),
            Transition::SevenOut => f.write_str("seven-out"),
            Transition::NoChange => f.write_str("no change"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("die face out of range: {die1}-{die2}")]
    InvalidDice { die1: u8, die2: u8 },
    #[error("total {total} does not match dice {die1}-{die2}")]
    TotalMismatch { die1: u8, die2: u8, total: u8 },
    #[error("hard flag {is_hard} does not match dice {die1}-{die2}")]
    HardnessMismatch { die1: u8, die2: u8, is_hard: bool },
    #[error("{transition} is not possible from {state} (point {point}) on a {total}")]
    Inconsistent {
        state: GameState,
        point: Point,
        total: u8,
        transition: Transition,
    },
}

/// Tracks the table phase and the point marker.
///
/// `SevenOut` is only ever held inside [GameStateMachine::advance]; callers
/// always observe `ComeOut` or `Point`, and the point is on iff the state is
/// `Point`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStateMachine {
    state: GameState,
    point: Point,
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self {
            state: GameState::ComeOut,
            point: Point::Off,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// The transition a roll of `total` would cause from the current state.
    pub fn transition_for(&self, total: u8) -> Transition {
        match self.state {
            GameState::Point => {
                if total == self.point.number() {
                    Transition::PointMade(total)
                } else if total == 7 {
                    Transition::SevenOut
                } else {
                    Transition::NoChange
                }
            }
            GameState::ComeOut | GameState::SevenOut => match total {
                7 | 11 => Transition::Natural,
                2 | 3 | 12 => Transition::Craps,
                n => match Point::from_number(n) {
                    Some(_) => Transition::PointEstablished(n),
                    None => Transition::NoChange,
                },
            },
        }
    }

    /// Check that `roll` is well formed and that `transition` follows from it.
    pub fn validate(&self, roll: &Roll, transition: Transition) -> Result<(), TransitionError> {
        let (die1, die2) = (roll.die1, roll.die2);
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(TransitionError::InvalidDice { die1, die2 });
        }
        if roll.total != die1 + die2 {
            return Err(TransitionError::TotalMismatch {
                die1,
                die2,
                total: roll.total,
            });
        }
        if roll.is_hard != (die1 == die2) {
            return Err(TransitionError::HardnessMismatch {
                die1,
                die2,
                is_hard: roll.is_hard,
            });
        }

        let total = roll.total;
        let in_point = self.state == GameState::Point && self.point.is_on();
        let consistent = match transition {
            Transition::Natural => !in_point && roll.is_natural(),
            Transition::Craps => !in_point && roll.is_craps(),
            Transition::PointEstablished(n) => {
                !in_point && n == total && Point::from_number(n).is_some()
            }
            Transition::PointMade(n) => in_point && n == total && n == self.point.number(),
            Transition::SevenOut => in_point && total == 7,
            Transition::NoChange => in_point && total != 7 && total != self.point.number(),
        };
        if !consistent {
            return Err(TransitionError::Inconsistent {
                state: self.state,
                point: self.point,
                total,
                transition,
            });
        }
        Ok(())
    }

    /// Apply a roll. Validation failures are logged and the transition is
    /// applied anyway so the game never stalls.
    pub fn advance(&mut self, roll: &Roll) -> Transition {
        let transition = self.transition_for(roll.total);
        if let Err(err) = self.validate(roll, transition) {
            warn!(%err, roll = %roll, "inconsistent state transition");
        }

        match transition {
            Transition::Natural | Transition::Craps | Transition::NoChange => {}
            Transition::PointEstablished(n) => {
                self.state = GameState::Point;
                self.point = Point::from_number(n).unwrap_or_default();
                info!(point = n, "point established");
            }
            Transition::PointMade(n) => {
                info!(point = n, "point made");
                self.reset();
            }
            Transition::SevenOut => {
                self.state = GameState::SevenOut;
                info!(point = %self.point, "seven-out");
                self.reset();
            }
        }
        transition
    }

    /// Put the puck back to come-out.
    pub fn reset(&mut self) {
        self.state = GameState::ComeOut;
        self.point = Point::Off;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(d1: u8, d2: u8) -> Roll {
        Roll::from_dice(d1, d2)
    }

    #[test]
    fn test_come_out_transitions() {
        let machine = GameStateMachine::new();
        assert_eq!(machine.transition_for(7), Transition::Natural);
        assert_eq!(machine.transition_for(11), Transition::Natural);
        for total in [2, 3, 12] {
            assert_eq!(machine.transition_for(total), Transition::Craps);
        }
        for total in [4, 5, 6, 8, 9, 10] {
            assert_eq!(
                machine.transition_for(total),
                Transition::PointEstablished(total)
            );
        }
    }

    #[test]
    fn test_point_lifecycle() {
        let mut machine = GameStateMachine::new();
        assert_eq!(machine.advance(&roll(3, 3)), Transition::PointEstablished(6));
        assert_eq!(machine.state(), GameState::Point);
        assert_eq!(machine.point(), Point::Six);

        assert_eq!(machine.advance(&roll(4, 4)), Transition::NoChange);
        assert_eq!(machine.advance(&roll(5, 6)), Transition::NoChange);
        assert_eq!(machine.point(), Point::Six);

        assert_eq!(machine.advance(&roll(2, 4)), Transition::PointMade(6));
        assert_eq!(machine.state(), GameState::ComeOut);
        assert_eq!(machine.point(), Point::Off);
    }

    #[test]
    fn test_seven_out_returns_to_come_out() {
        let mut machine = GameStateMachine::new();
        machine.advance(&roll(4, 6));
        assert_eq!(machine.advance(&roll(3, 4)), Transition::SevenOut);
        assert_eq!(machine.state(), GameState::ComeOut);
        assert!(!machine.point().is_on());
    }

    #[test]
    fn test_come_out_rolls_keep_state() {
        let mut machine = GameStateMachine::new();
        for (d1, d2) in [(3, 4), (5, 6), (1, 1), (1, 2), (6, 6)] {
            machine.advance(&roll(d1, d2));
            assert_eq!(machine.state(), GameState::ComeOut);
            assert_eq!(machine.point(), Point::Off);
        }
    }

    #[test]
    fn test_validate_rejects_malformed_rolls() {
        let machine = GameStateMachine::new();
        let bad_face = roll(7, 1);
        assert_eq!(
            machine.validate(&bad_face, Transition::PointEstablished(8)),
            Err(TransitionError::InvalidDice { die1: 7, die2: 1 })
        );

        let mut bad_total = roll(2, 2);
        bad_total.total = 5;
        assert!(matches!(
            machine.validate(&bad_total, Transition::PointEstablished(5)),
            Err(TransitionError::TotalMismatch { .. })
        ));

        let mut bad_hard = roll(2, 3);
        bad_hard.is_hard = true;
        assert!(matches!(
            machine.validate(&bad_hard, Transition::PointEstablished(5)),
            Err(TransitionError::HardnessMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_transition() {
        let mut machine = GameStateMachine::new();
        assert!(machine.validate(&roll(3, 4), Transition::Natural).is_ok());
        assert!(matches!(
            machine.validate(&roll(3, 4), Transition::SevenOut),
            Err(TransitionError::Inconsistent { .. })
        ));

        machine.advance(&roll(2, 2));
        assert!(machine.validate(&roll(1, 3), Transition::PointMade(4)).is_ok());
        assert!(machine.validate(&roll(3, 4), Transition::SevenOut).is_ok());
        assert!(machine.validate(&roll(5, 6), Transition::Natural).is_err());
    }

    #[test]
    fn test_invalid_roll_still_applied() {
        let mut machine = GameStateMachine::new();
        // total says 8 even though the faces are bogus
        let mut bogus = roll(7, 1);
        bogus.total = 8;
        assert_eq!(machine.advance(&bogus), Transition::PointEstablished(8));
        assert_eq!(machine.point(), Point::Eight);
    }

    #[test]
    fn test_reset_clears_point() {
        let mut machine = GameStateMachine::new();
        machine.advance(&roll(4, 5));
        assert_eq!(machine.point(), Point::Nine);
        machine.reset();
        assert_eq!(machine, GameStateMachine::new());
        assert_eq!(machine.transition_for(7), Transition::Natural);
    }

    #[test]
    fn test_validate_classifies_come_out_rolls() {
        let machine = GameStateMachine::new();
        assert!(machine.validate(&roll(5, 6), Transition::Natural).is_ok());
        assert!(machine.validate(&roll(6, 6), Transition::Craps).is_ok());
        assert!(machine.validate(&roll(6, 6), Transition::Natural).is_err());
        assert!(machine.validate(&roll(2, 5), Transition::Craps).is_err());
    }
}
