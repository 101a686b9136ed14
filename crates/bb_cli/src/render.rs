//! Terminal rendering of core snapshots.
//!
//! Pure projection: everything in here turns read-only engine state into
//! strings. Enum-valued fields go through explicit projection helpers per
//! display context; nothing formats inside the core.

use bb_core::engine::at_bat::{AtBat, AtBatResolution};
use bb_core::engine::game::{Game, Scoreboard, TeamLine};
use bb_core::engine::tables::SwingCategory;
use bb_core::models::events::HitKind;
use bb_core::models::player::{PitchDie, Player, PlayerId};
use bb_core::models::team::Team;

// ============================================================================
// Cell projections
// ============================================================================

fn threshold_cell(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn pd_cell(value: Option<PitchDie>) -> String {
    value.map(|die| die.code().to_string()).unwrap_or_default()
}

fn traits_cell(player: &Player) -> String {
    player
        .traits
        .iter()
        .map(|t| t.code())
        .collect::<Vec<_>>()
        .join(" ")
}

fn player_cells(player: &Player) -> Vec<String> {
    vec![
        player.id.0.to_string(),
        player.name.clone(),
        player.handedness.code().to_string(),
        player.position.code().to_string(),
        threshold_cell(player.bt),
        threshold_cell(player.obt),
        pd_cell(player.pitch_die),
        traits_cell(player),
    ]
}

fn category_label(category: SwingCategory) -> &'static str {
    match category {
        SwingCategory::Oddity => "oddity",
        SwingCategory::CriticalHit => "critical hit",
        SwingCategory::OrdinaryHit => "ordinary hit",
        SwingCategory::Walk => "walk",
        SwingCategory::PossibleError => "possible error",
        SwingCategory::ProductiveOut => "productive out",
        SwingCategory::Out => "out",
    }
}

fn hit_label(kind: HitKind) -> &'static str {
    match kind {
        HitKind::Single => "single",
        HitKind::Double => "double",
        HitKind::Triple => "triple",
        HitKind::HomeRun => "home run",
    }
}

// ============================================================================
// Plain-grid tables
// ============================================================================

fn grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let rule = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };
    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (i, &width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!(" {cell:<width$} |"));
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&rule);
    out
}

pub fn lineup_table(team: &Team) -> String {
    let headers = ["ORDER", "NUMBER", "NAME", "HAND", "POS", "BT", "OBT", "PD", "TRAITS"];
    let rows: Vec<Vec<String>> = team
        .lineup()
        .iter()
        .enumerate()
        .filter_map(|(slot, &id)| team.player(id).map(|p| (slot, p)))
        .map(|(slot, player)| {
            let mut cells = vec![(slot + 1).to_string()];
            cells.extend(player_cells(player));
            cells
        })
        .collect();
    grid(&headers, &rows)
}

pub fn bullpen_table(team: &Team) -> String {
    let headers = ["NUMBER", "NAME", "HAND", "POS", "BT", "OBT", "PD", "TRAITS"];
    let rows: Vec<Vec<String>> = team.bullpen().into_iter().map(player_cells).collect();
    grid(&headers, &rows)
}

// ============================================================================
// Box score
// ============================================================================

pub fn box_score(scoreboard: &Scoreboard) -> String {
    let columns = scoreboard.away.runs_by_inning.len();
    let mut headers: Vec<String> = vec![String::new(), "Team".to_string()];
    headers.extend((1..=columns).map(|n| n.to_string()));
    headers.extend(["".to_string(), "R".to_string(), "H".to_string(), "E".to_string()]);
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let row = |label: &str, line: &TeamLine| {
        let mut cells = vec![label.to_string(), line.name.clone()];
        cells.extend(
            line.runs_by_inning
                .iter()
                .map(|runs| runs.map(|r| r.to_string()).unwrap_or_default()),
        );
        cells.push(String::new());
        cells.push(line.runs.to_string());
        cells.push(line.hits.to_string());
        cells.push(line.errors.to_string());
        cells
    };

    let rows = vec![
        row("Visitors", &scoreboard.away),
        row("Home", &scoreboard.home),
    ];
    grid(&header_refs, &rows)
}

// ============================================================================
// Field diagram
// ============================================================================

const FIELD: &str = r#"
                  ___________________
            _____/                   \_____
        ___/                               \___
     __/                                       \__
   _/                     CF                      \_
 _/                                                 \_
/                                                     \
\           LF                           RF           /
  \                                                 /
    \                     R2                      /
      \              SS  .   .  2B              /
        \              .       .              /
          \      3B  .    PPP    .  1B      /
            \      R3      -      R1      /
              \      .           .      /
                \      .       .      /
                  \      .   .      /
                    \     BBB     /
                      \    C    /
                        \     /
                          \_/
"#;

fn base_marker(runner: Option<PlayerId>) -> String {
    match runner {
        Some(id) => format!("{:>2}", id.0),
        None => " .".to_string(),
    }
}

/// The diamond with jersey numbers on occupied bases, the batter at the
/// plate, and the pitcher on the mound.
pub fn field_diagram(game: &Game) -> String {
    let bases = game.bases();
    let runner = |base: usize| base_marker(bases.and_then(|b| b.runner_on(base)));

    let batter = game
        .current_batter()
        .map(|p| format!("{:>3}", p.id.0))
        .unwrap_or_else(|| "  -".to_string());
    let pitcher = game
        .current_pitcher()
        .map(|p| format!("{:>3}", p.id.0))
        .unwrap_or_else(|| "  -".to_string());

    FIELD
        .replace("R1", &runner(1))
        .replace("R2", &runner(2))
        .replace("R3", &runner(3))
        .replace("BBB", &batter)
        .replace("PPP", &pitcher)
}

// ============================================================================
// Play-by-play
// ============================================================================

fn batter_name(game: &Game, at_bat: &AtBat) -> String {
    game.current_half()
        .map(|half| game.team(half.batting_side()))
        .and_then(|team| team.player(at_bat.batter))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| at_bat.batter.to_string())
}

/// One line per plate appearance.
pub fn describe_at_bat(game: &Game, at_bat: &AtBat) -> String {
    let name = batter_name(game, at_bat);
    let mut line = match at_bat.resolution {
        AtBatResolution::Hit(kind) => {
            if at_bat.category == SwingCategory::CriticalHit {
                format!("{name} crushes a {}!", hit_label(kind))
            } else {
                format!("{name} hits a {}!", hit_label(kind))
            }
        }
        AtBatResolution::Walk => format!("{name} walks."),
        AtBatResolution::Out => {
            format!("{name} is out ({}).", category_label(at_bat.category))
        }
    };
    match at_bat.scored.len() {
        0 => {}
        1 => line.push_str(" A run scores."),
        n => line.push_str(&format!(" {n} runs score.")),
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_core::engine::dice::Dice;
    use bb_core::models::player::{Handedness, Position};

    fn sample_team(name: &str) -> Team {
        let mut players: Vec<Player> = (1..=9u8)
            .map(|n| Player {
                id: PlayerId(n),
                name: format!("Batter {n}"),
                position: Position::CF,
                handedness: Handedness::R,
                bt: Some(20),
                obt: Some(30),
                pitch_die: None,
                traits: vec![],
            })
            .collect();
        players.push(Player {
            id: PlayerId(10),
            name: "Ace".to_string(),
            position: Position::SP,
            handedness: Handedness::L,
            bt: None,
            obt: None,
            pitch_die: Some(PitchDie::D8),
            traits: vec![],
        });
        let mut team = Team::new(name, players).unwrap();
        team.set_default_lineup().unwrap();
        team.set_pitcher(PlayerId(10)).unwrap();
        team
    }

    #[test]
    fn lineup_table_lists_nine_rows() {
        let table = lineup_table(&sample_team("Herons"));
        // header + 9 players + 3 rules
        assert_eq!(table.lines().count(), 13);
        assert!(table.contains("ORDER"));
        assert!(table.contains("Batter 1"));
        assert!(table.contains("Batter 9"));
    }

    #[test]
    fn bullpen_table_lists_pitchers() {
        let table = bullpen_table(&sample_team("Herons"));
        assert!(table.contains("Ace"));
        assert!(table.contains("d8"));
    }

    #[test]
    fn box_score_has_team_names_and_totals() {
        let mut game = Game::new(sample_team("Herons"), sample_team("Bears"));
        game.play(&mut Dice::from_seed(5)).unwrap();
        let table = box_score(&game.scoreboard());
        assert!(table.contains("Visitors"));
        assert!(table.contains("Herons"));
        assert!(table.contains("Bears"));
        assert!(table.contains("| R "));
    }

    #[test]
    fn field_diagram_marks_empty_bases_with_dots() {
        let game = Game::new(sample_team("Herons"), sample_team("Bears"));
        let art = field_diagram(&game);
        assert!(!art.contains("R1"));
        assert!(!art.contains("R2"));
        assert!(!art.contains("R3"));
    }

    #[test]
    fn describe_covers_every_resolution() {
        let mut game = Game::new(sample_team("Herons"), sample_team("Bears"));
        let mut dice = Dice::from_seed(17);
        game.start_inning();
        game.start_half().unwrap();
        while !game.current_half().unwrap().is_over() {
            let at_bat = game.play_at_bat(&mut dice).unwrap().clone();
            let line = describe_at_bat(&game, &at_bat);
            assert!(line.contains("Batter"), "unexpected line: {line}");
        }
    }
}
