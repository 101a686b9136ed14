//! Single plate-appearance resolution.
//!
//! The pipeline is: pitch roll (sign-flipped for a negative-bias die) →
//! d100 swing roll → modified swing score → swing table → for hit rows, a
//! d20 on the hit table and forced base advancement. Everything the half
//! needs to update its counters comes back in one immutable [`AtBat`]
//! record.

use serde::{Deserialize, Serialize};

use crate::engine::bases::BaseQueue;
use crate::engine::dice::{Dice, DieSpec, D100, D20};
use crate::engine::tables::{classify_swing, hit_table, SwingCategory};
use crate::error::{GameError, Result};
use crate::models::events::{HitKind, PlayEvent};
use crate::models::player::{Player, PlayerId};

/// How the at-bat ended, from the half-inning's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatResolution {
    Hit(HitKind),
    Walk,
    Out,
}

impl AtBatResolution {
    pub fn is_hit(&self) -> bool {
        matches!(self, AtBatResolution::Hit(_))
    }

    pub fn is_out(&self) -> bool {
        matches!(self, AtBatResolution::Out)
    }
}

/// One resolved plate appearance. Created by [`resolve_at_bat`] and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtBat {
    pub batter: PlayerId,
    pub pitcher: PlayerId,
    /// Pitch roll with the die's sign flag already applied.
    pub pitch_value: i32,
    /// The d100 swing roll.
    pub swing_value: u32,
    /// Swing plus pitch, before the table-domain clamp.
    pub raw_mss: i32,
    /// The modified swing score actually classified (at least 1).
    pub mss: u32,
    pub category: SwingCategory,
    /// The d20 hit roll, for hit categories only.
    pub hit_roll: Option<u32>,
    /// Rider events with no resolution tables yet; recorded, not applied.
    pub pending: Vec<PlayEvent>,
    /// Runners who crossed home, batter included on a home run.
    pub scored: Vec<PlayerId>,
    pub resolution: AtBatResolution,
}

/// Resolve one plate appearance, mutating the base queue.
///
/// The batter and pitcher are passed in explicitly along with the bases the
/// current half owns; nothing here reaches back into team or game state.
pub fn resolve_at_bat(
    batter: &Player,
    pitcher: &Player,
    dice: &mut Dice,
    bases: &mut BaseQueue,
) -> Result<AtBat> {
    let pitch_die = pitcher.pitch_die.ok_or(GameError::NotAPitcher(pitcher.id))?;
    let (bt, obt) = batter
        .batting_thresholds()
        .ok_or(GameError::MissingThresholds(batter.id))?;

    let pitch_spec = DieSpec::from(pitch_die);
    let pitch_roll = dice.roll(&pitch_spec) as i32;
    let pitch_value = if pitch_spec.is_negative() { -pitch_roll } else { pitch_roll };
    tracing::debug!("pitcher {} threw {}", pitcher.id, pitch_value);

    let swing_value = dice.roll(&D100);
    tracing::debug!("batter {} swung {}", batter.id, swing_value);

    let raw_mss = swing_value as i32 + pitch_value;
    // the swing table starts at 1; a strong negative pitch can land below it
    let mss = raw_mss.max(1) as u32;
    let category = classify_swing(mss, bt, obt);
    tracing::debug!("mss {} -> {:?}", mss, category);

    let mut hit_roll = None;
    let mut pending = Vec::new();
    let mut scored = Vec::new();

    let resolution = match category {
        SwingCategory::CriticalHit | SwingCategory::OrdinaryHit => {
            let roll = dice.roll(&D20);
            hit_roll = Some(roll);
            let events = hit_table(roll);
            let mut kind = match events[0] {
                PlayEvent::Hit(primary) => primary,
                _ => unreachable!("hit table rows lead with a hit"),
            };
            pending.extend(events.into_iter().filter(PlayEvent::is_rider));
            if category == SwingCategory::CriticalHit {
                kind = kind.upgraded();
            }
            scored = bases.advance_batter(batter.id, kind.bases());
            if !pending.is_empty() {
                tracing::debug!("unresolved riders recorded: {:?}", pending);
            }
            AtBatResolution::Hit(kind)
        }
        SwingCategory::Walk => {
            scored = bases.advance_batter(batter.id, 1);
            AtBatResolution::Walk
        }
        unresolved => {
            // Oddity, PossibleError, and ProductiveOut have no subtype
            // tables yet; like a plain Out they cost the batter an out.
            if unresolved.is_unresolved() {
                tracing::debug!("category {:?} counted as a plain out", unresolved);
            }
            AtBatResolution::Out
        }
    };

    Ok(AtBat {
        batter: batter.id,
        pitcher: pitcher.id,
        pitch_value,
        swing_value,
        raw_mss,
        mss,
        category,
        hit_roll,
        pending,
        scored,
        resolution,
    })
}
