//! Terminal front end for the dice-table baseball simulator.
//!
//! Loads two roster files, sets the default lineups and a random starting
//! pitcher per side, then plays a full game with optional pacing between
//! at-bats and prints the final box score.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use bb_core::engine::dice::Dice;
use bb_core::engine::game::{Game, GameConfig};
use bb_core::models::team::Team;

mod render;
mod roster;

#[derive(Parser, Debug)]
#[command(name = "bb_cli")]
#[command(about = "Dice-table baseball simulator", long_about = None)]
struct Args {
    /// Away team roster CSV
    away: PathBuf,

    /// Home team roster CSV
    home: PathBuf,

    /// RNG seed; a random one is drawn (and logged) when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Innings to play
    #[arg(long, default_value_t = 9)]
    innings: u32,

    /// Delay between at-bats in milliseconds; also enables the field
    /// diagram after every play
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("seed {}", seed);
    let mut setup_rng = ChaCha8Rng::seed_from_u64(seed);
    let mut dice = Dice::from_seed(seed);

    let mut away = load_team(&args.away)?;
    let mut home = load_team(&args.home)?;
    if args.away == args.home {
        home.name = "The Dopplegangers".to_string();
    }

    for team in [&mut away, &mut home] {
        team.set_default_lineup()
            .with_context(|| format!("setting the {} lineup", team.name))?;
        pick_starting_pitcher(team, &mut setup_rng)?;

        println!();
        println!("{}", team.name);
        println!();
        println!("Lineup:");
        println!("{}", render::lineup_table(team));
        println!();
        println!("Bullpen:");
        println!("{}", render::bullpen_table(team));
        let starter = team
            .pitcher()
            .and_then(|id| team.player(id))
            .map(|p| p.name.clone())
            .unwrap_or_default();
        println!();
        println!("Starting pitcher: {starter}");
    }

    let mut game = Game::with_config(away, home, GameConfig { innings: args.innings });
    let pace = Duration::from_millis(args.pace_ms);

    // play ball!
    while !game.is_over() {
        game.start_inning();
        while let Ok(kind) = game.start_half() {
            let number = game.current_inning().map(|i| i.number).unwrap_or_default();
            println!();
            println!("{kind} of inning {number}");
            println!("{}", render::box_score(&game.scoreboard()));

            while !game.current_half().map_or(true, |half| half.is_over()) {
                if let Some(batter) = game.current_batter() {
                    println!();
                    println!(
                        "Now batting: {} ({}, bats {})",
                        batter.name,
                        batter.position.code(),
                        batter.handedness.code()
                    );
                }
                let at_bat = game.play_at_bat(&mut dice)?.clone();
                println!("{}", render::describe_at_bat(&game, &at_bat));
                if !pace.is_zero() {
                    println!("{}", render::field_diagram(&game));
                    std::thread::sleep(pace);
                }
            }
        }
    }

    println!();
    println!("Final");
    println!("{}", render::box_score(&game.scoreboard()));
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log)
        .with_context(|| format!("invalid log filter '{}'", args.log))?;
    match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn load_team(path: &PathBuf) -> Result<Team> {
    let players = roster::load_roster(path)?;
    let team = Team::new(roster::team_name_from_path(path), players)?;
    tracing::debug!("loaded team '{}' with {} players", team.name, team.players().len());
    Ok(team)
}

fn pick_starting_pitcher(team: &mut Team, rng: &mut ChaCha8Rng) -> Result<()> {
    let pick = {
        let starters = team.starting_pitchers();
        if starters.is_empty() {
            bail!("{} has no starting pitcher on the roster", team.name);
        }
        starters[rng.gen_range(0..starters.len())].id
    };
    team.set_pitcher(pick)?;
    Ok(())
}
