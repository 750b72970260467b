//! Batting line from a tally of outcomes
//!
//! Pure reduction: the same counts always give the same line. Rates with a
//! zero denominator are 0.000, which is what a short run legitimately
//! produces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::event::PlayEvent;
use crate::simulation::tally::EventCounts;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingLine {
    pub at_bats: u64,
    pub hits: u64,
    pub walks: u64,
    pub hit_by_pitch: u64,
    pub total_bases: u64,
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
}

/// Round half away from zero to three decimals
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round3(numerator as f64 / denominator as f64)
    }
}

/// Reduce outcome counts to AVG/OBP/SLG/OPS
///
/// Only singles through home runs, strikeouts, and the four field-out kinds
/// make up at-bats; walks and hit-by-pitch enter OBP only. Everything else
/// (intentional walks, sacrifices, errors...) is ignored.
pub fn aggregate(counts: &EventCounts) -> BattingLine {
    let hits: u64 = PlayEvent::ALL
        .iter()
        .filter(|e| e.is_hit())
        .map(|&e| counts.get(e))
        .sum();
    let at_bats: u64 = PlayEvent::ALL
        .iter()
        .filter(|e| e.is_at_bat())
        .map(|&e| counts.get(e))
        .sum();
    let total_bases: u64 = PlayEvent::ALL
        .iter()
        .map(|&e| e.bases() * counts.get(e))
        .sum();
    let walks = counts.get(PlayEvent::Walk);
    let hit_by_pitch = counts.get(PlayEvent::HitByPitch);

    let avg = rate(hits, at_bats);
    let obp = rate(hits + walks + hit_by_pitch, at_bats + walks + hit_by_pitch);
    let slg = rate(total_bases, at_bats);
    // Sum of the displayed (rounded) rates
    let ops = round3(obp + slg);

    BattingLine {
        at_bats,
        hits,
        walks,
        hit_by_pitch,
        total_bases,
        avg,
        obp,
        slg,
        ops,
    }
}

impl fmt::Display for BattingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AVG: {:.3} | OBP: {:.3} | SLG: {:.3} | OPS: {:.3}",
            self.avg, self.obp, self.slg, self.ops
        )
    }
}
