//! Roster CSV loading.
//!
//! One row per player, jersey numbers assigned from row order. Required
//! columns: `Name`, `Handedness`, `BT`, `OBT`, `PD`, `Position`, `Traits`.
//! `BT`/`OBT`/`PD` cells may be empty (a blank `PD` means the player cannot
//! pitch); every non-empty cell must parse, and every code must be known.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use bb_core::models::player::{BatterTrait, Handedness, PitchDie, Player, PlayerId, Position};

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} row {row}: unknown {field} code '{value}'")]
    UnknownCode {
        path: String,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("{path} row {row}: {field} must be a number, got '{value}'")]
    NotANumber {
        path: String,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("{path} row {row}: BT {bt} must be below OBT {obt}")]
    ThresholdOrder {
        path: String,
        row: usize,
        bt: u8,
        obt: u8,
    },

    #[error("{path}: rosters are limited to 255 players")]
    TooManyPlayers { path: String },
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Handedness")]
    handedness: String,
    #[serde(rename = "BT")]
    bt: String,
    #[serde(rename = "OBT")]
    obt: String,
    #[serde(rename = "PD")]
    pd: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Traits")]
    traits: String,
}

/// Load every player from a roster file, jersey numbers from row order.
pub fn load_roster(path: &Path) -> Result<Vec<Player>, RosterError> {
    let shown = path.display().to_string();
    tracing::debug!("loading roster file {}", shown);

    let mut reader = csv::Reader::from_path(path).map_err(|source| RosterError::Read {
        path: shown.clone(),
        source,
    })?;

    let mut players = Vec::new();
    for (index, record) in reader.deserialize::<RosterRow>().enumerate() {
        let row = index + 1;
        if row > usize::from(u8::MAX) {
            return Err(RosterError::TooManyPlayers { path: shown });
        }
        let record = record.map_err(|source| RosterError::Read {
            path: shown.clone(),
            source,
        })?;
        players.push(parse_row(&shown, row, record)?);
    }

    tracing::debug!("loaded {} players from {}", players.len(), shown);
    Ok(players)
}

fn parse_row(path: &str, row: usize, record: RosterRow) -> Result<Player, RosterError> {
    let unknown = |field: &'static str, value: &str| RosterError::UnknownCode {
        path: path.to_string(),
        row,
        field,
        value: value.to_string(),
    };

    let hand_code = record.handedness.trim();
    let handedness = Handedness::from_code(hand_code).ok_or_else(|| unknown("Handedness", hand_code))?;

    let pos_code = record.position.trim();
    let position = Position::from_code(pos_code).ok_or_else(|| unknown("Position", pos_code))?;

    let bt = parse_threshold(path, row, "BT", &record.bt)?;
    let obt = parse_threshold(path, row, "OBT", &record.obt)?;
    if let (Some(bt), Some(obt)) = (bt, obt) {
        if bt >= obt {
            return Err(RosterError::ThresholdOrder {
                path: path.to_string(),
                row,
                bt,
                obt,
            });
        }
    }

    let pd_code = record.pd.trim();
    let pitch_die = if pd_code.is_empty() {
        None
    } else {
        Some(PitchDie::from_code(pd_code).ok_or_else(|| unknown("PD", pd_code))?)
    };

    let traits = record
        .traits
        .split_whitespace()
        .map(|code| BatterTrait::from_code(code).ok_or_else(|| unknown("Traits", code)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Player {
        id: PlayerId(row as u8),
        name: record.name.trim().to_string(),
        position,
        handedness,
        bt,
        obt,
        pitch_die,
        traits,
    })
}

fn parse_threshold(
    path: &str,
    row: usize,
    field: &'static str,
    raw: &str,
) -> Result<Option<u8>, RosterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u8>().map(Some).map_err(|_| RosterError::NotANumber {
        path: path.to_string(),
        row,
        field,
        value: raw.to_string(),
    })
}

/// Derive a display name from the roster file name: anything after a
/// `roster__` prefix, extension dropped, underscores to spaces, words
/// capitalized.
pub fn team_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("team");
    let stem = stem.split("roster__").last().unwrap_or(stem);
    stem.replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
