use serde::{Deserialize, Serialize};
use std::fmt;

/// Jersey number, assigned from roster row order (1-based).
///
/// Base slots, at-bat records, and events refer to players by id, never by
/// name, so display layers can resolve names however they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    L,
    R,
    /// Switch hitter.
    S,
}

impl Handedness {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Handedness::L),
            "R" => Some(Handedness::R),
            "S" => Some(Handedness::S),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Handedness::L => "L",
            Handedness::R => "R",
            Handedness::S => "S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Starting pitcher.
    SP,
    /// Relief pitcher.
    RP,
    /// Closing pitcher.
    CP,
    C,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    SS,
    LF,
    CF,
    RF,
    DH,
}

impl Position {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SP" => Some(Position::SP),
            "RP" => Some(Position::RP),
            "CP" => Some(Position::CP),
            "C" => Some(Position::C),
            "1B" => Some(Position::FirstBase),
            "2B" => Some(Position::SecondBase),
            "3B" => Some(Position::ThirdBase),
            "SS" => Some(Position::SS),
            "LF" => Some(Position::LF),
            "CF" => Some(Position::CF),
            "RF" => Some(Position::RF),
            "DH" => Some(Position::DH),
            _ => None,
        }
    }

    /// Canonical scorecard code (e.g. "1B").
    pub fn code(&self) -> &'static str {
        match self {
            Position::SP => "SP",
            Position::RP => "RP",
            Position::CP => "CP",
            Position::C => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::SS => "SS",
            Position::LF => "LF",
            Position::CF => "CF",
            Position::RF => "RF",
            Position::DH => "DH",
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::SP | Position::RP | Position::CP)
    }

    pub fn is_infield(&self) -> bool {
        matches!(
            self,
            Position::FirstBase | Position::SecondBase | Position::ThirdBase | Position::SS
        )
    }

    pub fn is_outfield(&self) -> bool {
        matches!(self, Position::LF | Position::CF | Position::RF)
    }
}

/// The die a pitcher adds to every swing roll.
///
/// `-d4` is the one negative-bias die: its roll is subtracted from the swing
/// instead of added. The flag lives here; the dice engine itself only ever
/// returns positive sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchDie {
    #[serde(rename = "-d4")]
    MinusD4,
    #[serde(rename = "d4")]
    D4,
    #[serde(rename = "d8")]
    D8,
    #[serde(rename = "d12")]
    D12,
    #[serde(rename = "d20")]
    D20,
}

impl PitchDie {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "-d4" => Some(PitchDie::MinusD4),
            "d4" => Some(PitchDie::D4),
            "d8" => Some(PitchDie::D8),
            "d12" => Some(PitchDie::D12),
            "d20" => Some(PitchDie::D20),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PitchDie::MinusD4 => "-d4",
            PitchDie::D4 => "d4",
            PitchDie::D8 => "d8",
            PitchDie::D12 => "d12",
            PitchDie::D20 => "d20",
        }
    }

    /// Whether the pitch roll is subtracted from the swing roll.
    pub fn is_negative(&self) -> bool {
        matches!(self, PitchDie::MinusD4)
    }

    pub fn sides(&self) -> u32 {
        match self {
            PitchDie::MinusD4 | PitchDie::D4 => 4,
            PitchDie::D8 => 8,
            PitchDie::D12 => 12,
            PitchDie::D20 => 20,
        }
    }
}

/// Scouting-report tags carried on roster rows.
///
/// Parsed and preserved, but no modifier table consults them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatterTrait {
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "CN+")]
    CnPlus,
    #[serde(rename = "CN-")]
    CnMinus,
    #[serde(rename = "CND-")]
    CndMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "GB+")]
    GbPlus,
    #[serde(rename = "K+")]
    KPlus,
    #[serde(rename = "P+")]
    PPlus,
    #[serde(rename = "P++")]
    PPlusPlus,
    #[serde(rename = "P-")]
    PMinus,
    #[serde(rename = "P--")]
    PMinusMinus,
    #[serde(rename = "S+")]
    SPlus,
    #[serde(rename = "S-")]
    SMinus,
    #[serde(rename = "ST+")]
    StPlus,
    #[serde(rename = "T+")]
    TPlus,
}

impl BatterTrait {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C+" => Some(BatterTrait::CPlus),
            "C-" => Some(BatterTrait::CMinus),
            "CN+" => Some(BatterTrait::CnPlus),
            "CN-" => Some(BatterTrait::CnMinus),
            "CND-" => Some(BatterTrait::CndMinus),
            "D+" => Some(BatterTrait::DPlus),
            "D-" => Some(BatterTrait::DMinus),
            "GB+" => Some(BatterTrait::GbPlus),
            "K+" => Some(BatterTrait::KPlus),
            "P+" => Some(BatterTrait::PPlus),
            "P++" => Some(BatterTrait::PPlusPlus),
            "P-" => Some(BatterTrait::PMinus),
            "P--" => Some(BatterTrait::PMinusMinus),
            "S+" => Some(BatterTrait::SPlus),
            "S-" => Some(BatterTrait::SMinus),
            "ST+" => Some(BatterTrait::StPlus),
            "T+" => Some(BatterTrait::TPlus),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BatterTrait::CPlus => "C+",
            BatterTrait::CMinus => "C-",
            BatterTrait::CnPlus => "CN+",
            BatterTrait::CnMinus => "CN-",
            BatterTrait::CndMinus => "CND-",
            BatterTrait::DPlus => "D+",
            BatterTrait::DMinus => "D-",
            BatterTrait::GbPlus => "GB+",
            BatterTrait::KPlus => "K+",
            BatterTrait::PPlus => "P+",
            BatterTrait::PPlusPlus => "P++",
            BatterTrait::PMinus => "P-",
            BatterTrait::PMinusMinus => "P--",
            BatterTrait::SPlus => "S+",
            BatterTrait::SMinus => "S-",
            BatterTrait::StPlus => "ST+",
            BatterTrait::TPlus => "T+",
        }
    }
}

/// One rostered ball player.
///
/// Immutable after roster load; all in-game bookkeeping (lineup slot,
/// retirement, base occupancy) lives on [`Team`](super::team::Team) and the
/// half-inning state, keyed by [`PlayerId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub handedness: Handedness,
    /// Batting threshold: swing rolls at or below it read as a hit category.
    pub bt: Option<u8>,
    /// On-base threshold: upper bound for a walk.
    pub obt: Option<u8>,
    /// Present iff the player can pitch.
    pub pitch_die: Option<PitchDie>,
    #[serde(default)]
    pub traits: Vec<BatterTrait>,
}

impl Player {
    pub fn is_pitcher(&self) -> bool {
        self.pitch_die.is_some()
    }

    /// `(bt, obt)` when both are set; lineup slots require this.
    pub fn batting_thresholds(&self) -> Option<(u8, u8)> {
        Some((self.bt?, self.obt?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_codes_round_trip() {
        for pos in [
            Position::SP,
            Position::RP,
            Position::CP,
            Position::C,
            Position::FirstBase,
            Position::SecondBase,
            Position::ThirdBase,
            Position::SS,
            Position::LF,
            Position::CF,
            Position::RF,
            Position::DH,
        ] {
            assert_eq!(Position::from_code(pos.code()), Some(pos));
        }
        assert_eq!(Position::from_code("QB"), None);
    }

    #[test]
    fn pitcher_positions() {
        assert!(Position::SP.is_pitcher());
        assert!(Position::RP.is_pitcher());
        assert!(Position::CP.is_pitcher());
        assert!(!Position::C.is_pitcher());
        assert!(!Position::DH.is_pitcher());
    }

    #[test]
    fn pitch_die_codes_round_trip() {
        for die in [
            PitchDie::MinusD4,
            PitchDie::D4,
            PitchDie::D8,
            PitchDie::D12,
            PitchDie::D20,
        ] {
            assert_eq!(PitchDie::from_code(die.code()), Some(die));
        }
        assert!(PitchDie::MinusD4.is_negative());
        assert!(!PitchDie::D4.is_negative());
        assert_eq!(PitchDie::MinusD4.sides(), 4);
        assert_eq!(PitchDie::D20.sides(), 20);
    }

    #[test]
    fn trait_codes_round_trip() {
        for code in [
            "C+", "C-", "CN+", "CN-", "CND-", "D+", "D-", "GB+", "K+", "P+", "P++", "P-", "P--",
            "S+", "S-", "ST+", "T+",
        ] {
            let t = BatterTrait::from_code(code).expect(code);
            assert_eq!(t.code(), code);
        }
        assert_eq!(BatterTrait::from_code("Z+"), None);
    }

    #[test]
    fn batting_thresholds_require_both() {
        let mut player = Player {
            id: PlayerId(1),
            name: "Testy McTesterton".to_string(),
            position: Position::C,
            handedness: Handedness::R,
            bt: Some(20),
            obt: Some(30),
            pitch_die: None,
            traits: vec![],
        };
        assert_eq!(player.batting_thresholds(), Some((20, 30)));
        player.obt = None;
        assert_eq!(player.batting_thresholds(), None);
        assert!(!player.is_pitcher());
    }
}
