//! # bb_core - Deterministic dice-table baseball simulation engine
//!
//! This library simulates a tabletop baseball game: two nine-player lineups
//! trade half-innings, every plate appearance is a pitch roll plus a d100
//! swing roll read against the batter's thresholds, and hits push runners
//! around a three-slot base queue.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same box score)
//! - Granular driving API (`start_inning` / `start_half` / `play_at_bat`)
//!   or one-call `play`, with an injectable per-at-bat hook for pacing
//! - Read-only `Scoreboard` snapshots for external renderers; the engine
//!   never formats output

pub mod engine;
pub mod error;
pub mod models;

pub use engine::{
    classify_swing, hit_table, resolve_at_bat, AtBat, AtBatResolution, BaseQueue, Dice, DieSpec,
    Game, GameConfig, HalfInning, HalfKind, Inning, Scoreboard, SwingCategory, TeamLine, TeamSide,
    DEFAULT_INNINGS, OUTS_PER_HALF,
};
pub use error::{GameError, Result};
pub use models::{
    BatterTrait, Handedness, HitKind, PitchDie, PlayEvent, Player, PlayerId, Position, Team,
    LINEUP_SIZE,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
