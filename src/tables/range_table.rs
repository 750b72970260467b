//! Partition of a draw domain into labeled inclusive ranges
//!
//! A `RangeTable` is validated once at construction: every value in
//! `0..domain` belongs to exactly one entry. Lookups are a binary search over
//! entries sorted by start, so results never depend on input order.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// One labeled slice `[start, end]` of the domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEntry<T> {
    pub start: u32,
    pub end: u32,
    pub value: T,
}

impl<T> RangeEntry<T> {
    pub fn new(start: u32, end: u32, value: T) -> Self {
        Self { start, end, value }
    }

    pub fn contains(&self, draw: u32) -> bool {
        self.start <= draw && draw <= self.end
    }

    /// Number of draws that land on this entry
    pub fn width(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Entry from raw source bounds
    ///
    /// The source writes a share that truncated to zero as `end == start - 1`
    /// (possibly `-1` at the bottom of the domain); such slices yield `None`.
    pub fn from_raw(start: i64, end: i64, value: T) -> Result<Option<Self>> {
        if start < 0 {
            return Err(EngineError::InvalidRange { start, end });
        }
        if end == start - 1 {
            return Ok(None);
        }
        if end < start || end > u32::MAX as i64 {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Some(Self::new(start as u32, end as u32, value)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTable<T> {
    domain: u32,
    entries: Vec<RangeEntry<T>>,
}

impl<T> RangeTable<T> {
    /// Build a table over `0..domain`
    ///
    /// Fails with `RangeOverlap` when two entries share a value and with
    /// `RangeGap` (naming the first uncovered value) when the entries do not
    /// cover the whole domain.
    pub fn new(domain: u32, entries: impl IntoIterator<Item = RangeEntry<T>>) -> Result<Self> {
        if domain == 0 {
            return Err(EngineError::EmptyDomain);
        }

        let mut kept = Vec::new();
        for entry in entries {
            if entry.end < entry.start {
                return Err(EngineError::InvalidRange {
                    start: entry.start as i64,
                    end: entry.end as i64,
                });
            }
            if entry.end >= domain {
                return Err(EngineError::RangeOutOfDomain {
                    start: entry.start,
                    end: entry.end,
                    domain,
                });
            }
            kept.push(entry);
        }

        kept.sort_by_key(|e| (e.start, e.end));

        for pair in kept.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(EngineError::RangeOverlap {
                    first_start: pair[0].start,
                    first_end: pair[0].end,
                    second_start: pair[1].start,
                    second_end: pair[1].end,
                });
            }
        }
        let mut next_uncovered = 0u32;
        for entry in &kept {
            if entry.start > next_uncovered {
                return Err(EngineError::RangeGap {
                    draw: next_uncovered,
                    domain,
                });
            }
            next_uncovered = entry.end + 1;
        }
        if next_uncovered < domain {
            return Err(EngineError::RangeGap {
                draw: next_uncovered,
                domain,
            });
        }

        Ok(Self {
            domain,
            entries: kept,
        })
    }

    /// Entry whose range contains `draw`
    pub fn resolve(&self, draw: u32) -> Result<&RangeEntry<T>> {
        let idx = self.entries.partition_point(|e| e.end < draw);
        match self.entries.get(idx) {
            Some(entry) if entry.contains(draw) => Ok(entry),
            _ => Err(EngineError::RangeGap {
                draw,
                domain: self.domain,
            }),
        }
    }

    pub fn resolve_value(&self, draw: u32) -> Result<&T> {
        self.resolve(draw).map(|entry| &entry.value)
    }

    pub fn domain(&self) -> u32 {
        self.domain
    }

    /// Entries sorted by start
    pub fn entries(&self) -> &[RangeEntry<T>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RangeEntry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Share of the domain covered by `entry`
    pub fn probability(&self, entry: &RangeEntry<T>) -> f64 {
        entry.width() as f64 / self.domain as f64
    }

    /// Relabel every entry, keeping the ranges
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> RangeTable<U> {
        RangeTable {
            domain: self.domain,
            entries: self
                .entries
                .into_iter()
                .map(|e| RangeEntry::new(e.start, e.end, f(e.value)))
                .collect(),
        }
    }
}
