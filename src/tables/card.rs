//! Active-card selection
//!
//! Each count carries a pitcher threshold over the card domain: draws below
//! it hand the play to the pitcher's card, the rest to the batter's.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{CardSide, Count};

/// Per-count preference as written in the preference file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPreference {
    #[serde(alias = "pitcher_threshold", alias = "pitcherThreshold")]
    pub pitcher: u32,
}

#[derive(Debug, Clone)]
pub struct CardPreferences {
    domain: u32,
    thresholds: AHashMap<Count, u32>,
}

impl CardPreferences {
    /// Thresholds must lie in `0..=domain`
    pub fn new(domain: u32, thresholds: impl IntoIterator<Item = (Count, u32)>) -> Result<Self> {
        if domain == 0 {
            return Err(EngineError::EmptyDomain);
        }

        let mut map = AHashMap::new();
        for (count, threshold) in thresholds {
            if threshold > domain {
                return Err(EngineError::ThresholdOutOfDomain {
                    count,
                    threshold,
                    domain,
                });
            }
            map.insert(count, threshold);
        }

        Ok(Self {
            domain,
            thresholds: map,
        })
    }

    /// Build from label-keyed preferences, e.g. `{"(0-0)": {"pitcher": 50}}`
    pub fn from_labels(domain: u32, labeled: &BTreeMap<String, CardPreference>) -> Result<Self> {
        let thresholds = labeled
            .iter()
            .map(|(label, pref)| Ok((label.parse::<Count>()?, pref.pitcher)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(domain, thresholds)
    }

    /// Side whose card governs the play for `count` and a card draw
    pub fn select(&self, count: Count, draw: u32) -> Result<CardSide> {
        let threshold = self
            .threshold(count)
            .ok_or(EngineError::UnknownCount(count))?;
        if draw >= self.domain {
            return Err(EngineError::RangeGap {
                draw,
                domain: self.domain,
            });
        }

        if draw < threshold {
            Ok(CardSide::Pitcher)
        } else {
            Ok(CardSide::Batter)
        }
    }

    pub fn threshold(&self, count: Count) -> Option<u32> {
        self.thresholds.get(&count).copied()
    }

    pub fn domain(&self) -> u32 {
        self.domain
    }

    /// Chance that the pitcher's card is active at `count`
    pub fn pitcher_share(&self, count: Count) -> Option<f64> {
        self.threshold(count)
            .map(|t| t as f64 / self.domain as f64)
    }

    /// Label-keyed view, ordered by label
    pub fn to_labels(&self) -> BTreeMap<String, CardPreference> {
        self.thresholds
            .iter()
            .map(|(count, &pitcher)| (count.label(), CardPreference { pitcher }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(b: u8, s: u8) -> Count {
        Count::new(b, s).unwrap()
    }

    #[test]
    fn test_threshold_split() {
        let prefs = CardPreferences::new(100, [(count(0, 0), 40)]).unwrap();
        assert_eq!(prefs.select(count(0, 0), 0).unwrap(), CardSide::Pitcher);
        assert_eq!(prefs.select(count(0, 0), 39).unwrap(), CardSide::Pitcher);
        assert_eq!(prefs.select(count(0, 0), 40).unwrap(), CardSide::Batter);
        assert_eq!(prefs.select(count(0, 0), 99).unwrap(), CardSide::Batter);
    }

    #[test]
    fn test_extreme_thresholds() {
        let prefs =
            CardPreferences::new(100, [(count(0, 0), 0), (count(3, 0), 100)]).unwrap();
        for draw in 0..100 {
            assert_eq!(prefs.select(count(0, 0), draw).unwrap(), CardSide::Batter);
            assert_eq!(prefs.select(count(3, 0), draw).unwrap(), CardSide::Pitcher);
        }
    }

    #[test]
    fn test_unknown_count_is_error() {
        let prefs = CardPreferences::new(100, [(count(0, 0), 50)]).unwrap();
        assert_eq!(
            prefs.select(count(1, 1), 10).unwrap_err(),
            EngineError::UnknownCount(count(1, 1))
        );
    }

    #[test]
    fn test_threshold_above_domain_rejected() {
        let err = CardPreferences::new(100, [(count(2, 1), 101)]).unwrap_err();
        assert!(matches!(err, EngineError::ThresholdOutOfDomain { threshold: 101, .. }));
    }

    #[test]
    fn test_draw_outside_domain() {
        let prefs = CardPreferences::new(100, [(count(0, 0), 50)]).unwrap();
        assert_eq!(
            prefs.select(count(0, 0), 100).unwrap_err(),
            EngineError::RangeGap { draw: 100, domain: 100 }
        );
    }

    #[test]
    fn test_from_labels() {
        let labeled: BTreeMap<String, CardPreference> =
            serde_json::from_str(r#"{"(0-0)": {"pitcher": 45}, "(3-2)": {"pitcher": 60}}"#)
                .unwrap();
        let prefs = CardPreferences::from_labels(100, &labeled).unwrap();
        assert_eq!(prefs.threshold(count(0, 0)), Some(45));
        assert_eq!(prefs.pitcher_share(count(3, 2)), Some(0.6));
        assert_eq!(prefs.to_labels(), labeled);
    }

    #[test]
    fn test_from_labels_rejects_bad_label() {
        let mut labeled = BTreeMap::new();
        labeled.insert("0-0".to_string(), CardPreference { pitcher: 10 });
        assert_eq!(
            CardPreferences::from_labels(100, &labeled).unwrap_err(),
            EngineError::InvalidCountLabel("0-0".to_string())
        );
    }
}
