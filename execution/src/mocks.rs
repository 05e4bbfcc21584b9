use crate::{dice::DiceSource, resolution::RollContext, Table};
use crapstable_types::craps::{Bet, BetId, GameState, Money, Point, Roll, TableConfig};

/// Dice that throw a scripted sequence of rolls, starting over when exhausted
#[derive(Clone, Debug)]
pub struct FixedDice {
    faces: Vec<u8>,
    index: usize,
}

impl FixedDice {
    pub fn new(rolls: &[(u8, u8)]) -> Self {
        Self {
            faces: rolls.iter().flat_map(|(d1, d2)| [*d1, *d2]).collect(),
            index: 0,
        }
    }
}

impl DiceSource for FixedDice {
    fn roll_die(&mut self) -> u8 {
        let Some(face) = self.faces.get(self.index % self.faces.len().max(1)) else {
            return 1;
        };
        self.index += 1;
        *face
    }
}

/// Creates a bet for player `p1` with a whole-dollar stake
pub fn bet(id: BetId, bet_type: &str, amount: i64, numbers: &[u8]) -> Bet {
    Bet::new(id, bet_type, Money::from_int(amount), "p1", numbers.to_vec())
}

/// Creates a roll context for a shooter who has made no points
pub fn context<'a>(
    roll: &'a Roll,
    state: GameState,
    point: Point,
    config: &'a TableConfig,
) -> RollContext<'a> {
    RollContext::new(roll, state, point, 0, config)
}

/// Creates a $5-$1000, 3x odds table that throws `rolls` in order
pub fn create_table(rolls: &[(u8, u8)]) -> Table {
    create_table_with_config(TableConfig::default(), rolls)
}

/// Creates a table with a custom config that throws `rolls` in order
pub fn create_table_with_config(config: TableConfig, rolls: &[(u8, u8)]) -> Table {
    Table::with_dice(config, FixedDice::new(rolls)).expect("valid table config")
}

/// Creates a scripted table with one seated player `p1`
pub fn create_table_with_player(bankroll: i64, rolls: &[(u8, u8)]) -> Table {
    let mut table = create_table(rolls);
    table
        .add_player("p1", "Player One", Money::from_int(bankroll))
        .expect("player added");
    table
}

/// Routes tracing output to the test harness
#[cfg(test)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
