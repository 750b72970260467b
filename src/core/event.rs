//! Play outcomes a range table can resolve to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Every outcome the season tables carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayEvent {
    FieldError,
    SacFly,
    FieldOutFlyBall,
    FieldOutPopup,
    FieldOutLineDrive,
    FieldOutGroundBall,
    GroundedIntoDoublePlay,
    DoublePlay,
    ForceOut,
    FieldersChoiceOut,
    FieldersChoice,
    CatcherInterf,
    SacBunt,
    Single,
    Double,
    Triple,
    HomeRun,
    IntentWalk,
    Walk,
    HitByPitch,
    Strikeout,
    StrikeoutDoublePlay,
    TruncatedPa,
}

impl PlayEvent {
    /// All outcomes in table row order
    pub const ALL: [PlayEvent; 23] = [
        PlayEvent::FieldError,
        PlayEvent::SacFly,
        PlayEvent::FieldOutFlyBall,
        PlayEvent::FieldOutPopup,
        PlayEvent::FieldOutLineDrive,
        PlayEvent::FieldOutGroundBall,
        PlayEvent::GroundedIntoDoublePlay,
        PlayEvent::DoublePlay,
        PlayEvent::ForceOut,
        PlayEvent::FieldersChoiceOut,
        PlayEvent::FieldersChoice,
        PlayEvent::CatcherInterf,
        PlayEvent::SacBunt,
        PlayEvent::Single,
        PlayEvent::Double,
        PlayEvent::Triple,
        PlayEvent::HomeRun,
        PlayEvent::IntentWalk,
        PlayEvent::Walk,
        PlayEvent::HitByPitch,
        PlayEvent::Strikeout,
        PlayEvent::StrikeoutDoublePlay,
        PlayEvent::TruncatedPa,
    ];

    /// Outcomes shown in simulation summaries
    pub const SUMMARY: [PlayEvent; 11] = [
        PlayEvent::FieldOutFlyBall,
        PlayEvent::FieldOutPopup,
        PlayEvent::FieldOutLineDrive,
        PlayEvent::FieldOutGroundBall,
        PlayEvent::Single,
        PlayEvent::Double,
        PlayEvent::Triple,
        PlayEvent::HomeRun,
        PlayEvent::Walk,
        PlayEvent::HitByPitch,
        PlayEvent::Strikeout,
    ];

    /// Wire name, e.g. `field_out_fly_ball`
    pub fn name(&self) -> &'static str {
        match self {
            PlayEvent::FieldError => "field_error",
            PlayEvent::SacFly => "sac_fly",
            PlayEvent::FieldOutFlyBall => "field_out_fly_ball",
            PlayEvent::FieldOutPopup => "field_out_popup",
            PlayEvent::FieldOutLineDrive => "field_out_line_drive",
            PlayEvent::FieldOutGroundBall => "field_out_ground_ball",
            PlayEvent::GroundedIntoDoublePlay => "grounded_into_double_play",
            PlayEvent::DoublePlay => "double_play",
            PlayEvent::ForceOut => "force_out",
            PlayEvent::FieldersChoiceOut => "fielders_choice_out",
            PlayEvent::FieldersChoice => "fielders_choice",
            PlayEvent::CatcherInterf => "catcher_interf",
            PlayEvent::SacBunt => "sac_bunt",
            PlayEvent::Single => "single",
            PlayEvent::Double => "double",
            PlayEvent::Triple => "triple",
            PlayEvent::HomeRun => "home_run",
            PlayEvent::IntentWalk => "intent_walk",
            PlayEvent::Walk => "walk",
            PlayEvent::HitByPitch => "hit_by_pitch",
            PlayEvent::Strikeout => "strikeout",
            PlayEvent::StrikeoutDoublePlay => "strikeout_double_play",
            PlayEvent::TruncatedPa => "truncated_pa",
        }
    }

    /// Scorebook abbreviation
    ///
    /// Not unique: `force_out` shares `FO` with fly outs and both fielder's
    /// choice kinds print as `FC`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            PlayEvent::FieldError => "E",
            PlayEvent::SacFly => "SF",
            PlayEvent::FieldOutFlyBall => "FO",
            PlayEvent::FieldOutPopup => "PO",
            PlayEvent::FieldOutLineDrive => "LO",
            PlayEvent::FieldOutGroundBall => "GO",
            PlayEvent::GroundedIntoDoublePlay => "GDP",
            PlayEvent::DoublePlay => "DP",
            PlayEvent::ForceOut => "FO",
            PlayEvent::FieldersChoiceOut => "FC",
            PlayEvent::FieldersChoice => "FC",
            PlayEvent::CatcherInterf => "CI",
            PlayEvent::SacBunt => "SAC",
            PlayEvent::Single => "1B",
            PlayEvent::Double => "2B",
            PlayEvent::Triple => "3B",
            PlayEvent::HomeRun => "HR",
            PlayEvent::IntentWalk => "IBB",
            PlayEvent::Walk => "BB",
            PlayEvent::HitByPitch => "HBP",
            PlayEvent::Strikeout => "K",
            PlayEvent::StrikeoutDoublePlay => "KDP",
            PlayEvent::TruncatedPa => "TP",
        }
    }

    /// Bases credited to the batter (0 for anything but a hit)
    pub fn bases(&self) -> u64 {
        match self {
            PlayEvent::Single => 1,
            PlayEvent::Double => 2,
            PlayEvent::Triple => 3,
            PlayEvent::HomeRun => 4,
            _ => 0,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.bases() > 0
    }

    /// Counts toward at-bats in the batting line
    pub fn is_at_bat(&self) -> bool {
        self.is_hit()
            || matches!(
                self,
                PlayEvent::Strikeout
                    | PlayEvent::FieldOutFlyBall
                    | PlayEvent::FieldOutPopup
                    | PlayEvent::FieldOutLineDrive
                    | PlayEvent::FieldOutGroundBall
            )
    }
}

impl fmt::Display for PlayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayEvent {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        PlayEvent::ALL
            .iter()
            .copied()
            .find(|event| event.name() == s)
            .ok_or_else(|| EngineError::UnknownEvent(s.to_string()))
    }
}
