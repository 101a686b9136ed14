//! Game progression: at-bats grouped into halves, halves into innings,
//! innings into a game.
//!
//! The machine is driven from outside: callers either step it
//! (`start_inning` / `start_half` / `play_at_bat`) or hand it dice and let
//! `play` run to completion. No state here points back at its owner — the
//! teams live on the `Game` and every resolution gets its context passed in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::at_bat::{resolve_at_bat, AtBat, AtBatResolution};
use crate::engine::bases::BaseQueue;
use crate::engine::dice::Dice;
use crate::error::{GameError, Result};
use crate::models::player::Player;
use crate::models::team::Team;

/// Regulation game length.
pub const DEFAULT_INNINGS: u32 = 9;

/// Outs that end a half-inning.
pub const OUTS_PER_HALF: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Away,
    Home,
}

impl TeamSide {
    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfKind {
    Top,
    Bottom,
}

impl HalfKind {
    /// Visitors bat in the top of an inning, the home team in the bottom.
    pub fn batting_side(self) -> TeamSide {
        match self {
            HalfKind::Top => TeamSide::Away,
            HalfKind::Bottom => TeamSide::Home,
        }
    }
}

impl fmt::Display for HalfKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HalfKind::Top => write!(f, "Top"),
            HalfKind::Bottom => write!(f, "Bottom"),
        }
    }
}

/// One team's turn at bat. Owns the bases for its duration; they start
/// empty, which is the `clear()` every half-inning owes the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HalfInning {
    pub kind: HalfKind,
    pub outs: u8,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub at_bats: Vec<AtBat>,
    pub bases: BaseQueue,
}

impl HalfInning {
    fn new(kind: HalfKind) -> Self {
        HalfInning {
            kind,
            outs: 0,
            runs: 0,
            hits: 0,
            errors: 0,
            at_bats: Vec::new(),
            bases: BaseQueue::new(),
        }
    }

    pub fn batting_side(&self) -> TeamSide {
        self.kind.batting_side()
    }

    pub fn is_over(&self) -> bool {
        self.outs >= OUTS_PER_HALF
    }

    fn apply(&mut self, at_bat: AtBat) {
        self.runs += at_bat.scored.len() as u32;
        match at_bat.resolution {
            AtBatResolution::Hit(_) => self.hits += 1,
            AtBatResolution::Walk => {}
            AtBatResolution::Out => self.outs += 1,
        }
        self.at_bats.push(at_bat);
    }
}

/// A top half and, once the top is done, a bottom half.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inning {
    pub number: u32,
    halves: Vec<HalfInning>,
}

impl Inning {
    fn new(number: u32) -> Self {
        Inning { number, halves: Vec::new() }
    }

    pub fn halves(&self) -> &[HalfInning] {
        &self.halves
    }

    pub fn current_half(&self) -> Option<&HalfInning> {
        self.halves.last()
    }

    pub fn is_over(&self) -> bool {
        self.halves.len() == 2 && self.halves[1].is_over()
    }

    fn next_half_kind(&self) -> Option<HalfKind> {
        match self.halves.len() {
            0 => Some(HalfKind::Top),
            1 => Some(HalfKind::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Innings to play. Ties after the last one stand as played — there is
    /// no extra-innings rule in this edition.
    pub innings: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { innings: DEFAULT_INNINGS }
    }
}

/// Serializable read-only snapshot for display layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub innings_scheduled: u32,
    pub away: TeamLine,
    pub home: TeamLine,
}

/// One scoreboard row: runs per inning plus the R/H/E totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLine {
    pub name: String,
    pub runs_by_inning: Vec<Option<u32>>,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

/// Two teams and the innings they play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    away: Team,
    home: Team,
    config: GameConfig,
    innings: Vec<Inning>,
    inning_count: u32,
}

impl Game {
    pub fn new(away: Team, home: Team) -> Self {
        Game::with_config(away, home, GameConfig::default())
    }

    pub fn with_config(away: Team, home: Team, config: GameConfig) -> Self {
        Game {
            away,
            home,
            config,
            innings: Vec::new(),
            inning_count: 0,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Away => &self.away,
            TeamSide::Home => &self.home,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Away => &mut self.away,
            TeamSide::Home => &mut self.home,
        }
    }

    pub fn innings(&self) -> &[Inning] {
        &self.innings
    }

    pub fn current_inning(&self) -> Option<&Inning> {
        self.innings.last()
    }

    pub fn current_half(&self) -> Option<&HalfInning> {
        self.current_inning().and_then(Inning::current_half)
    }

    /// The configured inning count has been reached and played out. A tie
    /// ends the game anyway (known gap, carried from the source rules).
    pub fn is_over(&self) -> bool {
        self.inning_count >= self.config.innings
            && self.innings.last().map_or(true, Inning::is_over)
    }

    /// Append the next inning and advance the counter.
    pub fn start_inning(&mut self) -> u32 {
        self.inning_count += 1;
        tracing::debug!("starting inning {}", self.inning_count);
        self.innings.push(Inning::new(self.inning_count));
        self.inning_count
    }

    /// Open the next half of the current inning. The new half's bases are
    /// empty.
    pub fn start_half(&mut self) -> Result<HalfKind> {
        let inning = self.innings.last_mut().ok_or(GameError::NoActiveInning)?;
        let kind = inning.next_half_kind().ok_or(GameError::InningComplete)?;
        tracing::debug!("starting {} of inning {}", kind, inning.number);
        inning.halves.push(HalfInning::new(kind));
        Ok(kind)
    }

    /// Send the next batter to the plate and resolve the at-bat.
    pub fn play_at_bat(&mut self, dice: &mut Dice) -> Result<&AtBat> {
        let inning = self.innings.last_mut().ok_or(GameError::NoActiveInning)?;
        let half = inning.halves.last_mut().ok_or(GameError::NoActiveHalf)?;
        if half.is_over() {
            return Err(GameError::HalfOver);
        }

        let (batting, fielding) = match half.batting_side() {
            TeamSide::Away => (&mut self.away, &self.home),
            TeamSide::Home => (&mut self.home, &self.away),
        };

        let batter_id = batting.up_to_bat().ok_or(GameError::LineupNotSet)?;
        batting.advance_batting_order();
        let batter = batting
            .player(batter_id)
            .ok_or(GameError::UnknownPlayer(batter_id))?;

        let pitcher_id = fielding.pitcher().ok_or(GameError::NoPitcherSet)?;
        let pitcher = fielding
            .player(pitcher_id)
            .ok_or(GameError::UnknownPlayer(pitcher_id))?;

        let at_bat = resolve_at_bat(batter, pitcher, dice, &mut half.bases)?;
        half.apply(at_bat);
        Ok(&half.at_bats[half.at_bats.len() - 1])
    }

    /// Play the current half to three outs, calling the hook after every
    /// at-bat.
    pub fn play_half<F>(&mut self, dice: &mut Dice, hook: &mut F) -> Result<()>
    where
        F: FnMut(&Game),
    {
        while !self.current_half().map_or(true, HalfInning::is_over) {
            self.play_at_bat(dice)?;
            hook(self);
        }
        Ok(())
    }

    /// Run the rest of the game.
    pub fn play(&mut self, dice: &mut Dice) -> Result<()> {
        self.play_with_hook(dice, |_| {})
    }

    /// Run the rest of the game, calling `hook` after every at-bat. The
    /// hook exists for pacing and rendering; it has no game semantics.
    pub fn play_with_hook<F>(&mut self, dice: &mut Dice, mut hook: F) -> Result<()>
    where
        F: FnMut(&Game),
    {
        loop {
            // finish the inning in progress before scheduling another
            if self.innings.last().map_or(false, |inning| !inning.is_over()) {
                self.play_half(dice, &mut hook)?;
                while self.start_half().is_ok() {
                    self.play_half(dice, &mut hook)?;
                }
            }
            if self.inning_count >= self.config.innings {
                return Ok(());
            }
            self.start_inning();
        }
    }

    // ------------------------------------------------------------------
    // Display accessors. The core never formats output; renderers read
    // these.
    // ------------------------------------------------------------------

    fn halves_batted(&self, side: TeamSide) -> impl Iterator<Item = &HalfInning> {
        self.innings
            .iter()
            .flat_map(|inning| inning.halves.iter())
            .filter(move |half| half.batting_side() == side)
    }

    pub fn team_runs(&self, side: TeamSide) -> u32 {
        self.halves_batted(side).map(|half| half.runs).sum()
    }

    pub fn team_hits(&self, side: TeamSide) -> u32 {
        self.halves_batted(side).map(|half| half.hits).sum()
    }

    pub fn team_errors(&self, side: TeamSide) -> u32 {
        self.halves_batted(side).map(|half| half.errors).sum()
    }

    /// Runs per inning for one team, `None` for halves not yet played. The
    /// row is always at least the scheduled game length.
    pub fn line_score(&self, side: TeamSide) -> Vec<Option<u32>> {
        let columns = self.config.innings.max(self.inning_count) as usize;
        let mut line: Vec<Option<u32>> = self.halves_batted(side).map(|h| Some(h.runs)).collect();
        line.resize(columns, None);
        line
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let line = |side: TeamSide| TeamLine {
            name: self.team(side).name.clone(),
            runs_by_inning: self.line_score(side),
            runs: self.team_runs(side),
            hits: self.team_hits(side),
            errors: self.team_errors(side),
        };
        Scoreboard {
            innings_scheduled: self.config.innings,
            away: line(TeamSide::Away),
            home: line(TeamSide::Home),
        }
    }

    /// The batter due up in the current half, if any.
    pub fn current_batter(&self) -> Option<&Player> {
        let half = self.current_half()?;
        if half.is_over() {
            return None;
        }
        let team = self.team(half.batting_side());
        team.up_to_bat().and_then(|id| team.player(id))
    }

    /// The pitcher facing the current half's batters, if designated.
    pub fn current_pitcher(&self) -> Option<&Player> {
        let half = self.current_half()?;
        let team = self.team(half.batting_side().opponent());
        team.pitcher().and_then(|id| team.player(id))
    }

    /// Base occupancy of the half in progress.
    pub fn bases(&self) -> Option<&BaseQueue> {
        self.current_half().map(|half| &half.bases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Handedness, PitchDie, PlayerId, Position};

    fn fixture_player(n: u8, position: Position, pitch_die: Option<PitchDie>) -> Player {
        Player {
            id: PlayerId(n),
            name: format!("Fixture {n}"),
            position,
            handedness: Handedness::R,
            bt: Some(20),
            obt: Some(30),
            pitch_die,
            traits: vec![],
        }
    }

    fn fixture_team(name: &str) -> Team {
        let mut players: Vec<Player> = (1..=9)
            .map(|n| fixture_player(n, Position::CF, None))
            .collect();
        players.push(fixture_player(10, Position::SP, Some(PitchDie::D8)));
        let mut team = Team::new(name, players).unwrap();
        team.set_default_lineup().unwrap();
        team.set_pitcher(PlayerId(10)).unwrap();
        team
    }

    fn fixture_game() -> Game {
        Game::new(fixture_team("Visitors"), fixture_team("Home"))
    }

    #[test]
    fn halves_alternate_and_swap_roles() {
        let mut game = fixture_game();
        game.start_inning();
        assert_eq!(game.start_half().unwrap(), HalfKind::Top);
        assert_eq!(game.current_half().unwrap().batting_side(), TeamSide::Away);
        assert_eq!(game.start_half().unwrap(), HalfKind::Bottom);
        assert_eq!(game.current_half().unwrap().batting_side(), TeamSide::Home);
        assert!(matches!(game.start_half(), Err(GameError::InningComplete)));
    }

    #[test]
    fn half_ends_on_exactly_three_outs() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(11);
        game.start_inning();
        game.start_half().unwrap();
        while !game.current_half().unwrap().is_over() {
            game.play_at_bat(&mut dice).unwrap();
        }
        assert_eq!(game.current_half().unwrap().outs, OUTS_PER_HALF);
        assert!(matches!(game.play_at_bat(&mut dice), Err(GameError::HalfOver)));
    }

    #[test]
    fn new_half_starts_with_empty_bases() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(3);
        game.start_inning();
        game.start_half().unwrap();
        let mut hook = |_: &Game| {};
        game.play_half(&mut dice, &mut hook).unwrap();
        game.start_half().unwrap();
        assert_eq!(game.bases().unwrap().snapshot(), [None, None, None]);
    }

    #[test]
    fn batting_order_continues_across_halves() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(5);
        game.start_inning();
        game.start_half().unwrap();
        let mut away_batters = Vec::new();
        while !game.current_half().unwrap().is_over() {
            away_batters.push(game.play_at_bat(&mut dice).unwrap().batter);
        }
        // order is 1..9 wrapping, never resetting between innings
        for (i, id) in away_batters.iter().enumerate() {
            assert_eq!(id.0 as usize, (i % 9) + 1);
        }
        let next_due = game.away().up_to_bat().unwrap();
        assert_eq!(next_due.0 as usize, (away_batters.len() % 9) + 1);
    }

    #[test]
    fn full_game_plays_the_scheduled_innings() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(42);
        game.play(&mut dice).unwrap();

        assert!(game.is_over());
        assert_eq!(game.innings().len(), DEFAULT_INNINGS as usize);
        for inning in game.innings() {
            assert!(inning.is_over());
            assert_eq!(inning.halves().len(), 2);
            for half in inning.halves() {
                assert_eq!(half.outs, OUTS_PER_HALF);
            }
        }
    }

    #[test]
    fn shortened_game_respects_config() {
        let mut game = Game::with_config(
            fixture_team("Visitors"),
            fixture_team("Home"),
            GameConfig { innings: 3 },
        );
        let mut dice = Dice::from_seed(8);
        game.play(&mut dice).unwrap();
        assert_eq!(game.innings().len(), 3);
        assert!(game.is_over());
    }

    #[test]
    fn hook_fires_once_per_at_bat() {
        let mut game = Game::with_config(
            fixture_team("Visitors"),
            fixture_team("Home"),
            GameConfig { innings: 2 },
        );
        let mut dice = Dice::from_seed(21);
        let mut calls = 0;
        game.play_with_hook(&mut dice, |_| calls += 1).unwrap();
        let at_bats: usize = game
            .innings()
            .iter()
            .flat_map(|i| i.halves())
            .map(|h| h.at_bats.len())
            .sum();
        assert_eq!(calls, at_bats);
    }

    #[test]
    fn totals_match_the_line_score() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(99);
        game.play(&mut dice).unwrap();

        for side in [TeamSide::Away, TeamSide::Home] {
            let line = game.line_score(side);
            assert_eq!(line.len(), DEFAULT_INNINGS as usize);
            let from_line: u32 = line.iter().flatten().sum();
            assert_eq!(from_line, game.team_runs(side));
        }

        let sb = game.scoreboard();
        assert_eq!(sb.away.runs, game.team_runs(TeamSide::Away));
        assert_eq!(sb.home.hits, game.team_hits(TeamSide::Home));
        assert_eq!(sb.innings_scheduled, DEFAULT_INNINGS);
    }

    #[test]
    fn determinism_same_seed_same_game() {
        let mut first = fixture_game();
        let mut second = fixture_game();
        first.play(&mut Dice::from_seed(1234)).unwrap();
        second.play(&mut Dice::from_seed(1234)).unwrap();
        assert_eq!(first.scoreboard(), second.scoreboard());
    }

    #[test]
    fn stepping_without_starting_is_an_error() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(1);
        assert!(matches!(game.play_at_bat(&mut dice), Err(GameError::NoActiveInning)));
        game.start_inning();
        assert!(matches!(game.play_at_bat(&mut dice), Err(GameError::NoActiveHalf)));
    }

    #[test]
    fn runs_accumulate_on_the_batting_half() {
        let mut game = fixture_game();
        let mut dice = Dice::from_seed(77);
        game.play(&mut dice).unwrap();
        let total_scored: usize = game
            .innings()
            .iter()
            .flat_map(|i| i.halves())
            .flat_map(|h| h.at_bats.iter())
            .map(|ab| ab.scored.len())
            .sum();
        let total_runs =
            (game.team_runs(TeamSide::Away) + game.team_runs(TeamSide::Home)) as usize;
        assert_eq!(total_scored, total_runs);
    }
}
