use thiserror::Error;

use crate::models::player::PlayerId;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid die descriptor '{spec}': {reason}")]
    InvalidDieSpec { spec: String, reason: String },

    #[error("a lineup requires exactly 9 players, got {found}")]
    LineupSize { found: usize },

    #[error("no player {0} on the roster")]
    UnknownPlayer(PlayerId),

    #[error("roster already has a player {0}")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} is not on the bench")]
    NotOnBench(PlayerId),

    #[error("player {0} is not in the lineup")]
    NotInLineup(PlayerId),

    #[error("player {0} has no pitch die")]
    NotAPitcher(PlayerId),

    #[error("player {0} has no batting thresholds")]
    MissingThresholds(PlayerId),

    #[error("no lineup has been set")]
    LineupNotSet,

    #[error("the fielding team has no pitcher designated")]
    NoPitcherSet,

    #[error("no inning has been started")]
    NoActiveInning,

    #[error("no half-inning has been started")]
    NoActiveHalf,

    #[error("the current half-inning is already over")]
    HalfOver,

    #[error("both halves of the inning have already been played")]
    InningComplete,
}

pub type Result<T> = std::result::Result<T, GameError>;
