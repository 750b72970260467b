//! Rate statistics over simulated outcomes

pub mod aggregator;

use std::collections::BTreeMap;

pub use aggregator::{aggregate, round3, BattingLine};

use crate::core::types::Handedness;
use crate::simulation::tally::OutcomeTally;

/// Batting line per requested bucket; a bucket with no outcomes gets zeros
pub fn lines_by_handedness(
    tally: &OutcomeTally,
    buckets: &[Handedness],
) -> BTreeMap<Handedness, BattingLine> {
    buckets
        .iter()
        .map(|&h| (h, aggregate(&tally.event_counts(h))))
        .collect()
}
