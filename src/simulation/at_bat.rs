//! Single at-bat resolution
//!
//! count draw -> count, card draw -> active card, play draw -> outcome.
//! Pure: the same draws against the same tables give the same outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::event::PlayEvent;
use crate::core::types::{CardSide, Count, Handedness};
use crate::simulation::draws::DrawSource;
use crate::tables::{
    CardPreference, CardPreferences, CountFrequencyEntry, CountTable, EventRangeEntry, EventTable,
};

/// Raw inputs for one simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub count_frequencies: Vec<CountFrequencyEntry>,
    pub batter_events: Vec<EventRangeEntry>,
    pub pitcher_events: Vec<EventRangeEntry>,
    pub card_preferences: BTreeMap<String, CardPreference>,
}

/// Validated tables for one simulation configuration
#[derive(Debug, Clone)]
pub struct SimulationTables {
    pub counts: CountTable,
    pub preferences: CardPreferences,
    pub batter: EventTable,
    pub pitcher: EventTable,
}

impl SimulationTables {
    /// Build and validate every table; any failure is fatal to the run
    pub fn build(input: &SimulationInput, config: &SimulationConfig) -> Result<Self> {
        let grouping = config.outcome_grouping();

        let counts = CountTable::new(config.count_domain, &input.count_frequencies)?;
        let preferences = CardPreferences::from_labels(config.card_domain, &input.card_preferences)?;
        let batter = EventTable::build(
            CardSide::Batter,
            config.event_domain,
            &input.batter_events,
            &grouping,
        )?;
        let pitcher = EventTable::build(
            CardSide::Pitcher,
            config.event_domain,
            &input.pitcher_events,
            &grouping,
        )?;

        Ok(Self {
            counts,
            preferences,
            batter,
            pitcher,
        })
    }

    /// Both cards share the play-result domain
    pub fn event_domain(&self) -> u32 {
        self.batter.domain()
    }

    pub fn events_for(&self, side: CardSide) -> &EventTable {
        match side {
            CardSide::Batter => &self.batter,
            CardSide::Pitcher => &self.pitcher,
        }
    }
}

/// The three draws of one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatDraws {
    pub count: u32,
    pub card: u32,
    pub event: u32,
}

impl AtBatDraws {
    /// Draw count, card and play result, in that order
    pub fn roll<D: DrawSource + ?Sized>(draws: &mut D, tables: &SimulationTables) -> Self {
        let count = draws.draw(tables.counts.domain());
        let card = draws.draw(tables.preferences.domain());
        let event = draws.draw(tables.event_domain());
        Self { count, card, event }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatOutcome {
    pub count: Count,
    pub side: CardSide,
    pub handedness: Handedness,
    pub event: PlayEvent,
}

/// Resolve one at-bat against the opponent handedness `handedness`
pub fn resolve_at_bat(
    tables: &SimulationTables,
    draws: AtBatDraws,
    handedness: Handedness,
) -> Result<AtBatOutcome> {
    let count = tables.counts.resolve_count(draws.count)?;
    let side = tables.preferences.select(count, draws.card)?;
    let event = tables
        .events_for(side)
        .resolve(count, handedness, draws.event)?;

    Ok(AtBatOutcome {
        count,
        side,
        handedness,
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;

    fn count(b: u8, s: u8) -> Count {
        Count::new(b, s).unwrap()
    }

    fn input() -> SimulationInput {
        let mut card_preferences = BTreeMap::new();
        card_preferences.insert("(0-0)".to_string(), CardPreference { pitcher: 50 });
        card_preferences.insert("(1-0)".to_string(), CardPreference { pitcher: 30 });

        SimulationInput {
            count_frequencies: vec![
                CountFrequencyEntry::new(0, 0, 0, 199),
                CountFrequencyEntry::new(1, 0, 200, 599),
                CountFrequencyEntry::new(0, 1, 600, 999),
            ],
            batter_events: vec![
                EventRangeEntry::new(count(1, 0), PlayEvent::Single, Handedness::Right, 0, 499),
                EventRangeEntry::new(count(1, 0), PlayEvent::Walk, Handedness::Right, 500, 999),
                EventRangeEntry::new(count(0, 0), PlayEvent::HomeRun, Handedness::Left, 0, 999),
            ],
            pitcher_events: vec![EventRangeEntry::new(
                count(1, 0),
                PlayEvent::Strikeout,
                Handedness::Right,
                0,
                999,
            )],
            card_preferences,
        }
    }

    fn tables() -> SimulationTables {
        SimulationTables::build(&input(), &SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_batter_card_path() {
        let draws = AtBatDraws { count: 500, card: 30, event: 10 };
        let outcome = resolve_at_bat(&tables(), draws, Handedness::Right).unwrap();
        assert_eq!(outcome.count, count(1, 0));
        assert_eq!(outcome.side, CardSide::Batter);
        assert_eq!(outcome.event, PlayEvent::Single);
    }

    #[test]
    fn test_pitcher_card_path() {
        let draws = AtBatDraws { count: 500, card: 29, event: 10 };
        let outcome = resolve_at_bat(&tables(), draws, Handedness::Right).unwrap();
        assert_eq!(outcome.side, CardSide::Pitcher);
        assert_eq!(outcome.event, PlayEvent::Strikeout);
    }

    #[test]
    fn test_resolution_is_pure() {
        let tables = tables();
        let draws = AtBatDraws { count: 250, card: 80, event: 700 };
        let first = resolve_at_bat(&tables, draws, Handedness::Right);
        let second = resolve_at_bat(&tables, draws, Handedness::Right);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_count() {
        let draws = AtBatDraws { count: 700, card: 0, event: 0 };
        assert_eq!(
            resolve_at_bat(&tables(), draws, Handedness::Left).unwrap_err(),
            EngineError::UnknownCount(count(0, 1))
        );
    }

    #[test]
    fn test_no_event_data() {
        // (0-0) on the pitcher's card has no ranges at all
        let draws = AtBatDraws { count: 0, card: 0, event: 0 };
        assert_eq!(
            resolve_at_bat(&tables(), draws, Handedness::Left).unwrap_err(),
            EngineError::NoEventData {
                side: CardSide::Pitcher,
                count: count(0, 0),
                handedness: Handedness::Left,
            }
        );
    }

    #[test]
    fn test_build_rejects_empty_event_domain() {
        let mut sparse = input();
        sparse.batter_events.clear();
        sparse.pitcher_events.clear();
        let config = SimulationConfig {
            event_domain: 0,
            ..Default::default()
        };
        assert_eq!(
            SimulationTables::build(&sparse, &config).unwrap_err(),
            EngineError::EmptyDomain
        );
    }

    #[test]
    fn test_build_fails_on_bad_count_table() {
        let mut bad = input();
        bad.count_frequencies.pop();
        assert_eq!(
            SimulationTables::build(&bad, &SimulationConfig::default()).unwrap_err(),
            EngineError::RangeGap { draw: 600, domain: 1000 }
        );
    }
}
