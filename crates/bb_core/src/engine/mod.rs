pub mod at_bat;
pub mod bases;
pub mod dice;
pub mod game;
pub mod tables;

pub use at_bat::{resolve_at_bat, AtBat, AtBatResolution};
pub use bases::{BaseQueue, BASES};
pub use dice::{Dice, DieSpec, D100, D20};
pub use game::{
    Game, GameConfig, HalfInning, HalfKind, Inning, Scoreboard, TeamLine, TeamSide,
    DEFAULT_INNINGS, OUTS_PER_HALF,
};
pub use tables::{classify_swing, hit_table, SwingCategory};
