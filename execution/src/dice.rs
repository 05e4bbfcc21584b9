//! Dice sources.
//!
//! The table never draws randomness itself; it asks an injected [DiceSource]
//! for faces. [SecureDice] is the default for live play, [SeededDice] replays a
//! session from a seed.

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use crapstable_types::craps::Roll;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

const FACES: u8 = 6;

/// Largest byte value accepted by rejection sampling (keeps faces unbiased).
const REJECTION_LIMIT: u8 = u8::MAX - (u8::MAX % FACES);

/// Produces die faces in `1..=6`.
pub trait DiceSource {
    fn roll_die(&mut self) -> u8;

    /// Throw both dice.
    fn roll(&mut self) -> Roll {
        let die1 = self.roll_die();
        let die2 = self.roll_die();
        Roll::from_dice(die1, die2)
    }
}

/// Map a uniformly random byte to a face, or `None` if it must be redrawn.
fn face_from_byte(byte: u8) -> Option<u8> {
    (byte < REJECTION_LIMIT).then(|| byte % FACES + 1)
}

/// Operating-system CSPRNG with a non-blocking fallback.
///
/// If the OS generator ever fails, a warning is logged and the source switches
/// to a time-seeded [StdRng] for the rest of its life.
#[derive(Default)]
pub struct SecureDice {
    fallback: Option<StdRng>,
}

impl SecureDice {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_byte(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        if let Some(rng) = self.fallback.as_mut() {
            rng.fill_bytes(&mut buf);
            return buf[0];
        }
        match OsRng.try_fill_bytes(&mut buf) {
            Ok(()) => buf[0],
            Err(err) => {
                warn!(error = %err, "secure rng failed, falling back to time-seeded rng");
                let mut rng = StdRng::seed_from_u64(time_seed());
                rng.fill_bytes(&mut buf);
                self.fallback = Some(rng);
                buf[0]
            }
        }
    }
}

impl DiceSource for SecureDice {
    fn roll_die(&mut self) -> u8 {
        loop {
            if let Some(face) = face_from_byte(self.next_byte()) {
                return face;
            }
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

/// Deterministic dice from a SHA256 hash chain.
///
/// The same seed and session id always produce the same sequence of rolls.
#[derive(Clone)]
pub struct SeededDice {
    state: [u8; 32],
    index: usize,
}

impl SeededDice {
    pub fn new(seed: &[u8], session_id: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(&session_id.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    /// Convenience constructor for numeric seeds.
    pub fn from_u64(seed: u64) -> Self {
        Self::new(&seed.to_be_bytes(), 0)
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= self.state.len() {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }
}

impl DiceSource for SeededDice {
    fn roll_die(&mut self) -> u8 {
        loop {
            if let Some(face) = face_from_byte(self.next_byte()) {
                return face;
            }
        }
    }
}
