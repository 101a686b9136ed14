pub mod events;
pub mod player;
pub mod team;

pub use events::{HitKind, PlayEvent};
pub use player::{BatterTrait, Handedness, PitchDie, Player, PlayerId, Position};
pub use team::{Team, LINEUP_SIZE};
