//! Outcome tallies
//!
//! A tally is built by one run, merged across workers, then handed to the
//! statistics aggregator read-only. Merging is a plain per-key sum, so the
//! order trials or partial tallies arrive in never matters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::event::PlayEvent;
use crate::core::types::{CardSide, Count, Handedness};
use crate::simulation::at_bat::AtBatOutcome;

/// Occurrences per outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCounts(BTreeMap<PlayEvent, u64>);

impl EventCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, event: PlayEvent) -> u64 {
        self.0.get(&event).copied().unwrap_or(0)
    }

    pub fn add(&mut self, event: PlayEvent, n: u64) {
        if n > 0 {
            *self.0.entry(event).or_insert(0) += n;
        }
    }

    pub fn merge(&mut self, other: &EventCounts) {
        for (&event, &n) in &other.0 {
            self.add(event, n);
        }
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayEvent, u64)> + '_ {
        self.0.iter().map(|(&e, &n)| (e, n))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PlayEvent, u64)> for EventCounts {
    fn from_iter<I: IntoIterator<Item = (PlayEvent, u64)>>(iter: I) -> Self {
        let mut counts = EventCounts::new();
        for (event, n) in iter {
            counts.add(event, n);
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TallyKey {
    pub handedness: Handedness,
    pub side: CardSide,
    pub count: Count,
    pub event: PlayEvent,
}

impl From<&AtBatOutcome> for TallyKey {
    fn from(outcome: &AtBatOutcome) -> Self {
        Self {
            handedness: outcome.handedness,
            side: outcome.side,
            count: outcome.count,
            event: outcome.event,
        }
    }
}

/// Trials per (handedness, active side, count, event)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    counts: BTreeMap<TallyKey, u64>,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &AtBatOutcome) {
        self.add(TallyKey::from(outcome), 1);
    }

    pub fn add(&mut self, key: TallyKey, n: u64) {
        if n > 0 {
            *self.counts.entry(key).or_insert(0) += n;
        }
    }

    pub fn merge(&mut self, other: &OutcomeTally) {
        for (&key, &n) in &other.counts {
            self.add(key, n);
        }
    }

    pub fn get(&self, key: &TallyKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn handedness_total(&self, handedness: Handedness) -> u64 {
        self.keys_for(handedness).map(|(_, n)| n).sum()
    }

    /// Trials that ended on `side`'s card
    pub fn side_total(&self, handedness: Handedness, side: CardSide) -> u64 {
        self.keys_for(handedness)
            .filter(|(k, _)| k.side == side)
            .map(|(_, n)| n)
            .sum()
    }

    /// Outcomes per count for one handedness, summed over both cards
    pub fn by_count(&self, handedness: Handedness) -> BTreeMap<Count, EventCounts> {
        let mut out: BTreeMap<Count, EventCounts> = BTreeMap::new();
        for (key, n) in self.keys_for(handedness) {
            out.entry(key.count).or_default().add(key.event, n);
        }
        out
    }

    /// Outcomes for one handedness, summed over counts and cards
    pub fn event_counts(&self, handedness: Handedness) -> EventCounts {
        self.keys_for(handedness)
            .map(|(key, n)| (key.event, n))
            .collect()
    }

    /// Outcomes for one handedness that ended on `side`'s card
    pub fn event_counts_for_side(&self, handedness: Handedness, side: CardSide) -> EventCounts {
        self.keys_for(handedness)
            .filter(|(key, _)| key.side == side)
            .map(|(key, n)| (key.event, n))
            .collect()
    }

    /// `handedness -> count label -> event -> trials`
    pub fn labeled(&self) -> BTreeMap<Handedness, BTreeMap<String, EventCounts>> {
        let mut out: BTreeMap<Handedness, BTreeMap<String, EventCounts>> = BTreeMap::new();
        for (key, &n) in &self.counts {
            out.entry(key.handedness)
                .or_default()
                .entry(key.count.label())
                .or_default()
                .add(key.event, n);
        }
        out
    }

    fn keys_for(&self, handedness: Handedness) -> impl Iterator<Item = (&TallyKey, u64)> + '_ {
        self.counts
            .iter()
            .filter(move |(k, _)| k.handedness == handedness)
            .map(|(k, &n)| (k, n))
    }
}

/// Trials that resolved and trials dropped, by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialDiagnostics {
    pub completed: u64,
    pub unknown_count: u64,
    pub no_event_data: u64,
    pub range_gap: u64,
}

impl TrialDiagnostics {
    pub fn skipped(&self) -> u64 {
        self.unknown_count + self.no_event_data + self.range_gap
    }

    pub fn attempted(&self) -> u64 {
        self.completed + self.skipped()
    }

    pub fn merge(&mut self, other: &TrialDiagnostics) {
        self.completed += other.completed;
        self.unknown_count += other.unknown_count;
        self.no_event_data += other.no_event_data;
        self.range_gap += other.range_gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(h: Handedness, side: CardSide, b: u8, s: u8, event: PlayEvent) -> AtBatOutcome {
        AtBatOutcome {
            count: Count::new(b, s).unwrap(),
            side,
            handedness: h,
            event,
        }
    }

    #[test]
    fn test_record_and_views() {
        let mut tally = OutcomeTally::new();
        tally.record(&outcome(Handedness::Left, CardSide::Batter, 0, 0, PlayEvent::Single));
        tally.record(&outcome(Handedness::Left, CardSide::Pitcher, 0, 0, PlayEvent::Single));
        tally.record(&outcome(Handedness::Left, CardSide::Pitcher, 1, 2, PlayEvent::Strikeout));
        tally.record(&outcome(Handedness::Right, CardSide::Batter, 3, 0, PlayEvent::Walk));

        assert_eq!(tally.total(), 4);
        assert_eq!(tally.handedness_total(Handedness::Left), 3);
        assert_eq!(tally.side_total(Handedness::Left, CardSide::Pitcher), 2);

        let left = tally.event_counts(Handedness::Left);
        assert_eq!(left.get(PlayEvent::Single), 2);
        assert_eq!(left.get(PlayEvent::Strikeout), 1);
        assert_eq!(left.get(PlayEvent::Walk), 0);

        let by_count = tally.by_count(Handedness::Left);
        assert_eq!(by_count[&Count::new(0, 0).unwrap()].get(PlayEvent::Single), 2);

        let batter_only = tally.event_counts_for_side(Handedness::Left, CardSide::Batter);
        assert_eq!(batter_only.total(), 1);

        let labeled = tally.labeled();
        assert_eq!(labeled[&Handedness::Right]["(3-0)"].get(PlayEvent::Walk), 1);
    }

    #[test]
    fn test_merge_matches_single_tally() {
        let outcomes = [
            outcome(Handedness::Left, CardSide::Batter, 0, 0, PlayEvent::Single),
            outcome(Handedness::Right, CardSide::Pitcher, 2, 2, PlayEvent::HomeRun),
            outcome(Handedness::Left, CardSide::Batter, 0, 0, PlayEvent::Single),
        ];

        let mut whole = OutcomeTally::new();
        outcomes.iter().for_each(|o| whole.record(o));

        let mut a = OutcomeTally::new();
        let mut b = OutcomeTally::new();
        a.record(&outcomes[2]);
        b.record(&outcomes[0]);
        b.record(&outcomes[1]);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, whole);
        assert_eq!(ba, whole);
    }

    #[test]
    fn test_event_counts_serialize_by_name() {
        let counts: EventCounts = [(PlayEvent::HomeRun, 2), (PlayEvent::Walk, 0)]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"home_run":2}"#);
    }

    #[test]
    fn test_diagnostics_merge() {
        let mut a = TrialDiagnostics {
            completed: 5,
            no_event_data: 1,
            ..Default::default()
        };
        let b = TrialDiagnostics {
            completed: 2,
            unknown_count: 3,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.completed, 7);
        assert_eq!(a.skipped(), 4);
        assert_eq!(a.attempted(), 11);
    }
}
