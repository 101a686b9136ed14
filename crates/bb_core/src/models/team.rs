use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, Position};
use crate::error::{GameError, Result};

/// Number of lineup slots.
pub const LINEUP_SIZE: usize = 9;

/// A roster plus its in-game bookkeeping: the active lineup, the retired
/// set, the batting-order cursor, and the designated pitcher.
///
/// The bench and bullpen are derived views, never stored. A player retired
/// from the lineup can never return to the bench or the lineup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    players: Vec<Player>,
    lineup: Vec<PlayerId>,
    retired: HashSet<PlayerId>,
    batter_cursor: usize,
    pitcher: Option<PlayerId>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Result<Self> {
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id) {
                return Err(GameError::DuplicatePlayer(player.id));
            }
        }
        Ok(Team {
            name: name.into(),
            players,
            lineup: Vec::new(),
            retired: HashSet::new(),
            batter_cursor: 0,
            pitcher: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn require_player(&self, id: PlayerId) -> Result<&Player> {
        self.player(id).ok_or(GameError::UnknownPlayer(id))
    }

    /// Set the batting order. Exactly nine ids, every one of them rostered,
    /// none retired, and each with batting thresholds.
    pub fn set_lineup(&mut self, ids: &[PlayerId]) -> Result<()> {
        if ids.len() != LINEUP_SIZE {
            return Err(GameError::LineupSize { found: ids.len() });
        }
        for &id in ids {
            let player = self.require_player(id)?;
            if self.retired.contains(&id) {
                return Err(GameError::NotOnBench(id));
            }
            if player.batting_thresholds().is_none() {
                return Err(GameError::MissingThresholds(id));
            }
        }
        self.lineup = ids.to_vec();
        Ok(())
    }

    /// Default batting order: jersey numbers 1 through 9.
    pub fn set_default_lineup(&mut self) -> Result<()> {
        let ids: Vec<PlayerId> = (1..=LINEUP_SIZE as u8).map(PlayerId).collect();
        self.set_lineup(&ids)
    }

    pub fn lineup(&self) -> &[PlayerId] {
        &self.lineup
    }

    /// Pool minus lineup minus retired.
    pub fn bench(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .map(|p| p.id)
            .filter(|id| !self.lineup.contains(id) && !self.retired.contains(id))
            .collect()
    }

    /// Every available player with a pitch die.
    pub fn bullpen(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.is_pitcher() && !self.retired.contains(&p.id))
            .collect()
    }

    pub fn starting_pitchers(&self) -> Vec<&Player> {
        self.bullpen()
            .into_iter()
            .filter(|p| p.position == Position::SP)
            .collect()
    }

    pub fn set_pitcher(&mut self, id: PlayerId) -> Result<()> {
        let player = self.require_player(id)?;
        if player.pitch_die.is_none() {
            return Err(GameError::NotAPitcher(id));
        }
        self.pitcher = Some(id);
        Ok(())
    }

    pub fn pitcher(&self) -> Option<PlayerId> {
        self.pitcher
    }

    /// Remove a player from the lineup for good. Returns the vacated slot
    /// index so a substitute can take the same batting-order position.
    pub fn retire(&mut self, id: PlayerId) -> Result<usize> {
        let slot = self
            .lineup
            .iter()
            .position(|&p| p == id)
            .ok_or(GameError::NotInLineup(id))?;
        self.lineup.remove(slot);
        self.retired.insert(id);
        Ok(slot)
    }

    /// Swap a bench player into a lineup slot, retiring the player leaving.
    pub fn substitute(&mut self, entering: PlayerId, leaving: PlayerId) -> Result<()> {
        self.require_player(entering)?;
        if !self.bench().contains(&entering) {
            return Err(GameError::NotOnBench(entering));
        }
        let slot = self.retire(leaving)?;
        self.lineup.insert(slot, entering);
        Ok(())
    }

    /// False once a player has been retired, forever.
    pub fn is_available(&self, id: PlayerId) -> bool {
        !self.retired.contains(&id)
    }

    pub fn retired(&self) -> &HashSet<PlayerId> {
        &self.retired
    }

    /// The player currently due up, if a lineup is set.
    pub fn up_to_bat(&self) -> Option<PlayerId> {
        if self.lineup.is_empty() {
            return None;
        }
        Some(self.lineup[self.batter_cursor % self.lineup.len()])
    }

    /// Move the batting order forward one slot, wrapping after the ninth.
    pub fn advance_batting_order(&mut self) {
        self.batter_cursor += 1;
    }
}
