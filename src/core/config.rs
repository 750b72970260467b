//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::event::PlayEvent;
use crate::core::types::Handedness;
use crate::tables::grouping::OutcomeGrouping;

/// Trials per handedness bucket when nothing else is configured
///
/// Approximates 1000 plate appearances once the share of trials that end on
/// the pitcher's card is taken out.
pub const DEFAULT_TRIALS: u64 = 664;

/// Size of the pitch-count and play-result draw domains (000-999)
pub const DEFAULT_RANGE_DOMAIN: u32 = 1000;

/// Size of the card-preference draw domain (00-99)
pub const DEFAULT_CARD_DOMAIN: u32 = 100;

/// Trials handed to one rayon task in parallel runs
pub const DEFAULT_CHUNK_SIZE: u64 = 256;

/// One outcome-grouping rule as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingRule {
    pub from: PlayEvent,
    pub into: PlayEvent,
}

/// Configuration for a simulation run
///
/// Domains must match the tables the run is resolved against; the defaults
/// match the three-dice layout (000-999, 00-99, 000-999).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Independent trials per handedness bucket
    pub trials: u64,

    /// Domain of the pitch-count draw
    pub count_domain: u32,

    /// Domain of the card-preference draw
    ///
    /// A pitcher threshold equal to this value keeps the pitcher's card
    /// active for every draw.
    pub card_domain: u32,

    /// Domain of the play-result draw
    pub event_domain: u32,

    /// Handedness buckets to simulate, each receiving `trials` trials
    pub handedness: Vec<Handedness>,

    /// Seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,

    /// Run trial chunks on the rayon pool
    pub parallel: bool,

    /// Trials per parallel chunk
    ///
    /// Each chunk owns its own random stream, so changing this value changes
    /// the results of a seeded parallel run.
    pub chunk_size: u64,

    /// Outcome grouping applied when event tables are built
    pub grouping: Vec<GroupingRule>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            count_domain: DEFAULT_RANGE_DOMAIN,
            card_domain: DEFAULT_CARD_DOMAIN,
            event_domain: DEFAULT_RANGE_DOMAIN,
            handedness: Handedness::ALL.to_vec(),
            seed: None,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            grouping: vec![GroupingRule {
                from: PlayEvent::GroundedIntoDoublePlay,
                into: PlayEvent::DoublePlay,
            }],
        }
    }
}

/// Errors that can occur when loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl SimulationConfig {
    /// Parse a configuration from TOML, filling unset keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_domain == 0 || self.card_domain == 0 || self.event_domain == 0 {
            return Err(ConfigError::Invalid("draw domains must be non-empty".into()));
        }
        for (i, h) in self.handedness.iter().enumerate() {
            if self.handedness[..i].contains(h) {
                return Err(ConfigError::Invalid(format!(
                    "handedness bucket {} listed more than once",
                    h.key()
                )));
            }
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Outcome grouping described by `grouping`
    pub fn outcome_grouping(&self) -> OutcomeGrouping {
        self.grouping
            .iter()
            .fold(OutcomeGrouping::identity(), |grouping, rule| {
                grouping.with_rule(rule.from, rule.into)
            })
    }
}
