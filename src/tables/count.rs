//! Pitch-count resolution
//!
//! The first draw of a trial picks the count the plate appearance reaches
//! before it ends.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Count;
use crate::tables::range_table::{RangeEntry, RangeTable};

/// Probability mass of reaching one ball-strike count, as supplied by the
/// season data collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountFrequencyEntry {
    pub balls: u8,
    pub strikes: u8,
    pub range_start: i64,
    pub range_end: i64,
}

impl CountFrequencyEntry {
    pub fn new(balls: u8, strikes: u8, range_start: i64, range_end: i64) -> Self {
        Self {
            balls,
            strikes,
            range_start,
            range_end,
        }
    }

    pub fn count(&self) -> Result<Count> {
        Count::new(self.balls, self.strikes)
    }

    /// Derived `(balls-strikes)` label
    pub fn label(&self) -> String {
        format!("({}-{})", self.balls, self.strikes)
    }
}

/// Range table from the pitch-count draw to a count
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable {
    table: RangeTable<Count>,
}

impl CountTable {
    pub fn new(domain: u32, entries: &[CountFrequencyEntry]) -> Result<Self> {
        let mut slices = Vec::with_capacity(entries.len());
        for entry in entries {
            let count = entry.count()?;
            if let Some(slice) = RangeEntry::from_raw(entry.range_start, entry.range_end, count)? {
                slices.push(slice);
            }
        }

        let table = RangeTable::new(domain, slices)?;
        tracing::debug!("Built count table with {} ranges over 0..{}", table.len(), domain);
        Ok(Self { table })
    }

    /// Count reached for a pitch-count draw
    pub fn resolve_count(&self, draw: u32) -> Result<Count> {
        self.table.resolve_value(draw).copied()
    }

    pub fn domain(&self) -> u32 {
        self.table.domain()
    }

    pub fn table(&self) -> &RangeTable<Count> {
        &self.table
    }

    /// Chance of reaching `count`, summed over every range labeled with it
    pub fn probability_of(&self, count: Count) -> f64 {
        self.table
            .iter()
            .filter(|e| e.value == count)
            .map(|e| self.table.probability(e))
            .sum()
    }
}
