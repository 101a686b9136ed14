use serde::{Deserialize, Serialize};

use super::player::Position;

/// The four hit grades, ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Single,
    Double,
    Triple,
    HomeRun,
}

impl HitKind {
    /// Bases the batter takes, 1 through 4.
    pub fn bases(&self) -> u8 {
        match self {
            HitKind::Single => 1,
            HitKind::Double => 2,
            HitKind::Triple => 3,
            HitKind::HomeRun => 4,
        }
    }

    /// One grade better, for critical hits. A home run stays a home run.
    pub fn upgraded(&self) -> HitKind {
        match self {
            HitKind::Single => HitKind::Double,
            HitKind::Double => HitKind::Triple,
            HitKind::Triple => HitKind::HomeRun,
            HitKind::HomeRun => HitKind::HomeRun,
        }
    }
}

/// One entry of a hit-table result: the hit itself, or a rider attached to
/// it.
///
/// Riders (defensive chances, extra runner advancement) have no resolution
/// tables yet; the at-bat records them as pending instead of applying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayEvent {
    Hit(HitKind),
    /// The named fielder may turn the hit into an out.
    DefensiveChance(Position),
    /// Runners take this many bases instead of the hit's usual one.
    RunnersAdvance(u8),
}

impl PlayEvent {
    /// Riders are the entries that still lack resolution rules.
    pub fn is_rider(&self) -> bool {
        !matches!(self, PlayEvent::Hit(_))
    }
}
