//! Play-result resolution
//!
//! One card's event ranges are split into a range table per
//! (count, handedness) partition. The caller picks the card; the table only
//! answers for its own side.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::event::PlayEvent;
use crate::core::types::{CardSide, Count, Handedness};
use crate::tables::grouping::OutcomeGrouping;
use crate::tables::range_table::{RangeEntry, RangeTable};

/// Probability mass of one outcome at a count against one handedness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRangeEntry {
    pub balls: u8,
    pub strikes: u8,
    pub event: PlayEvent,
    pub handedness: Handedness,
    pub range_start: i64,
    pub range_end: i64,
}

impl EventRangeEntry {
    pub fn new(
        count: Count,
        event: PlayEvent,
        handedness: Handedness,
        range_start: i64,
        range_end: i64,
    ) -> Self {
        Self {
            balls: count.balls,
            strikes: count.strikes,
            event,
            handedness,
            range_start,
            range_end,
        }
    }

    pub fn count(&self) -> Result<Count> {
        Count::new(self.balls, self.strikes)
    }
}

/// Entry inside a handedness bucket; the bucket supplies the handedness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketEntry {
    pub balls: u8,
    pub strikes: u8,
    pub event: PlayEvent,
    pub range_start: i64,
    pub range_end: i64,
}

/// Event ranges split by the opponent's handedness, as the season data
/// collaborator delivers them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRanges {
    pub lefty: Vec<BucketEntry>,
    pub righty: Vec<BucketEntry>,
}

impl EventRanges {
    pub fn bucket(&self, handedness: Handedness) -> &[BucketEntry] {
        match handedness {
            Handedness::Left => &self.lefty,
            Handedness::Right => &self.righty,
        }
    }

    /// Flatten both buckets, tagging each entry with its bucket's handedness
    pub fn entries(&self) -> Vec<EventRangeEntry> {
        Handedness::ALL
            .iter()
            .flat_map(|&handedness| {
                self.bucket(handedness).iter().map(move |e| EventRangeEntry {
                    balls: e.balls,
                    strikes: e.strikes,
                    event: e.event,
                    handedness,
                    range_start: e.range_start,
                    range_end: e.range_end,
                })
            })
            .collect()
    }
}

/// One card's play-result tables
#[derive(Debug, Clone)]
pub struct EventTable {
    side: CardSide,
    domain: u32,
    partitions: AHashMap<(Count, Handedness), RangeTable<PlayEvent>>,
}

impl EventTable {
    /// Build every (count, handedness) partition, applying `grouping` to
    /// each entry's event
    ///
    /// Any malformed partition fails the whole build.
    pub fn build(
        side: CardSide,
        domain: u32,
        entries: &[EventRangeEntry],
        grouping: &OutcomeGrouping,
    ) -> Result<Self> {
        if domain == 0 {
            return Err(EngineError::EmptyDomain);
        }

        let mut slices: AHashMap<(Count, Handedness), Vec<RangeEntry<PlayEvent>>> =
            AHashMap::new();

        for entry in entries {
            let key = (entry.count()?, entry.handedness);
            let event = grouping.apply(entry.event);
            // A partition made only of zero-width rows has no data
            if let Some(slice) = RangeEntry::from_raw(entry.range_start, entry.range_end, event)? {
                slices.entry(key).or_default().push(slice);
            }
        }

        let mut partitions = AHashMap::with_capacity(slices.len());
        for ((count, handedness), ranges) in slices {
            let table = RangeTable::new(domain, ranges).map_err(|e| {
                tracing::warn!("Rejected {} event table for {} {}: {}", side, count, handedness, e);
                e
            })?;
            partitions.insert((count, handedness), table);
        }

        tracing::debug!(
            "Built {} event table with {} partitions over 0..{}",
            side,
            partitions.len(),
            domain
        );

        Ok(Self {
            side,
            domain,
            partitions,
        })
    }

    /// Outcome for a play-result draw
    ///
    /// Fails with `NoEventData` when the card has no ranges for this count
    /// and handedness, which is expected for rarely reached counts.
    pub fn resolve(&self, count: Count, handedness: Handedness, draw: u32) -> Result<PlayEvent> {
        let table = self
            .partitions
            .get(&(count, handedness))
            .ok_or(EngineError::NoEventData {
                side: self.side,
                count,
                handedness,
            })?;
        table.resolve_value(draw).copied()
    }

    /// Resolve one draw against both handedness partitions
    pub fn resolve_both(&self, count: Count, draw: u32) -> [(Handedness, Result<PlayEvent>); 2] {
        Handedness::ALL.map(|h| (h, self.resolve(count, h, draw)))
    }

    pub fn partition(&self, count: Count, handedness: Handedness) -> Option<&RangeTable<PlayEvent>> {
        self.partitions.get(&(count, handedness))
    }

    pub fn has_data(&self, count: Count, handedness: Handedness) -> bool {
        self.partitions.contains_key(&(count, handedness))
    }

    /// Partition keys in display order
    pub fn keys(&self) -> Vec<(Count, Handedness)> {
        let mut keys: Vec<_> = self.partitions.keys().copied().collect();
        keys.sort_by_key(|(count, handedness)| (*handedness, count.display_index()));
        keys
    }

    pub fn side(&self) -> CardSide {
        self.side
    }

    pub fn domain(&self) -> u32 {
        self.domain
    }
}
