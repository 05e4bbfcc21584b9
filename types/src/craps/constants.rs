/// Numbers that can become the point (or a come point).
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Number of ways to roll each total with 2d6
pub const WAYS: [u8; 13] = [0, 0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];
//                          0  1  2  3  4  5  6  7  8  9 10 11 12

/// Buy/lay commission (5.00%).
pub const COMMISSION_BPS: u16 = 500;

/// Denominator for basis-point rates.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Maximum display name length for players
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum player id length
pub const MAX_PLAYER_ID_LENGTH: usize = 64;

/// Default cap on simultaneous bets per player
pub const DEFAULT_MAX_BETS_PER_PLAYER: usize = 64;

/// Default odds multiplier over the flat bet
pub const DEFAULT_MAX_ODDS: u32 = 3;

/// Returns true if `total` is 4, 5, 6, 8, 9 or 10.
pub fn is_point_number(total: u8) -> bool {
    POINT_NUMBERS.contains(&total)
}
