//! Load player cards and card preferences from JSON
//!
//! The formats match what the season-stats collaborator hands over: a player
//! card with count frequencies and lefty/righty event ranges, and a
//! label-keyed card preference file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::EngineError;
use crate::core::types::{CardSide, Count};
use crate::simulation::at_bat::SimulationInput;
use crate::tables::{CardPreference, CountFrequencyEntry, EventRanges};

/// Errors that can occur when loading table data
#[derive(Debug, Error)]
pub enum LoadError {
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Card preference keyed by something other than a count label
    #[error("Invalid card preference key: {0}")]
    InvalidPreference(#[from] EngineError),
}

/// One player's card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCard {
    #[serde(default)]
    pub count_frequencies: Vec<CountFrequencyEntry>,
    #[serde(default)]
    pub event_ranges: EventRanges,
}

impl PlayerCard {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Parse a `{"(b-s)": {"pitcher": n}}` preference file
///
/// Keys are checked here so a typo surfaces at load time rather than as
/// skipped trials.
pub fn card_preferences_from_json(
    json: &str,
) -> Result<BTreeMap<String, CardPreference>, LoadError> {
    let prefs: BTreeMap<String, CardPreference> = serde_json::from_str(json)?;
    for label in prefs.keys() {
        label.parse::<Count>()?;
    }
    Ok(prefs)
}

pub fn load_card_preferences(path: &Path) -> Result<BTreeMap<String, CardPreference>, LoadError> {
    let content = std::fs::read_to_string(path)?;
    card_preferences_from_json(&content)
}

impl SimulationInput {
    /// Assemble an input from both cards
    ///
    /// Count frequencies come from `count_source`'s card; the other card's
    /// frequencies are ignored.
    pub fn from_cards(
        batter: &PlayerCard,
        pitcher: &PlayerCard,
        card_preferences: BTreeMap<String, CardPreference>,
        count_source: CardSide,
    ) -> Self {
        let count_frequencies = match count_source {
            CardSide::Batter => batter.count_frequencies.clone(),
            CardSide::Pitcher => pitcher.count_frequencies.clone(),
        };

        Self {
            count_frequencies,
            batter_events: batter.event_ranges.entries(),
            pitcher_events: pitcher.event_ranges.entries(),
            card_preferences,
        }
    }
}
