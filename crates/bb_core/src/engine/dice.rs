//! Dice rolling primitives.
//!
//! Every point of randomness in a game flows through one [`Dice`] value, so
//! a fixed seed replays an identical game. Descriptors use the tabletop
//! `[count]d<sides>` grammar; a leading `-` marks a negative-bias die whose
//! sign the *caller* applies — a roll itself is always a positive sum.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::models::player::PitchDie;

/// A parsed `[count]d<sides>` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieSpec {
    pub count: u32,
    pub sides: u32,
    pub negative: bool,
}

/// The swing die.
pub const D100: DieSpec = DieSpec { count: 1, sides: 100, negative: false };

/// The hit-table die.
pub const D20: DieSpec = DieSpec { count: 1, sides: 20, negative: false };

impl DieSpec {
    /// Whether the caller should negate the rolled value.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Smallest possible roll.
    pub fn min(&self) -> u32 {
        self.count
    }

    /// Largest possible roll.
    pub fn max(&self) -> u32 {
        self.count * self.sides
    }

    fn invalid(spec: &str, reason: &str) -> GameError {
        GameError::InvalidDieSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for DieSpec {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let body = s.strip_prefix('-').unwrap_or(s);
        let negative = body.len() != s.len();

        let (count_str, sides_str) = body
            .split_once('d')
            .ok_or_else(|| DieSpec::invalid(s, "expected the form [count]d<sides>"))?;

        let count = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse::<u32>()
                .map_err(|_| DieSpec::invalid(s, "count must be a positive integer"))?
        };
        if count == 0 {
            return Err(DieSpec::invalid(s, "count must be a positive integer"));
        }

        let sides = sides_str
            .parse::<u32>()
            .map_err(|_| DieSpec::invalid(s, "sides must be a positive integer"))?;
        if sides == 0 {
            return Err(DieSpec::invalid(s, "sides must be a positive integer"));
        }

        Ok(DieSpec { count, sides, negative })
    }
}

impl fmt::Display for DieSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        if self.count != 1 {
            write!(f, "{}", self.count)?;
        }
        write!(f, "d{}", self.sides)
    }
}

impl From<PitchDie> for DieSpec {
    fn from(die: PitchDie) -> Self {
        DieSpec {
            count: 1,
            sides: die.sides(),
            negative: die.is_negative(),
        }
    }
}

/// The game's single source of randomness: a seeded ChaCha generator.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Dice { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Take over an already-positioned generator (mid-game snapshots,
    /// shared-stream tests).
    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Dice { rng }
    }

    /// Sum of `count` uniform draws over `[1, sides]`. The sign flag is the
    /// caller's business.
    pub fn roll(&mut self, spec: &DieSpec) -> u32 {
        let mut result = 0;
        for _ in 0..spec.count {
            result += self.rng.gen_range(1..=spec.sides);
        }
        tracing::debug!("rolled {} -> {}", spec, result);
        result
    }

    /// Parse-then-roll convenience for ad-hoc descriptors.
    pub fn roll_str(&mut self, descriptor: &str) -> Result<u32> {
        let spec: DieSpec = descriptor.parse()?;
        Ok(self.roll(&spec))
    }
}
