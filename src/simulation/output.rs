//! Simulation output and serialization

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::event::PlayEvent;
use crate::core::types::{Count, Handedness};
use crate::simulation::tally::{EventCounts, OutcomeTally, TrialDiagnostics};
use crate::stats::{lines_by_handedness, BattingLine};

/// Complete simulation output
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub trials: u64,
    pub seed: Option<u64>,
    pub abandoned: bool,
    /// `handedness -> count label -> event -> trials`
    pub tally: BTreeMap<Handedness, BTreeMap<String, EventCounts>>,
    pub statistics: BTreeMap<Handedness, BattingLine>,
    pub diagnostics: BTreeMap<Handedness, TrialDiagnostics>,
    #[serde(skip)]
    outcomes: OutcomeTally,
}

impl SimulationReport {
    pub fn new(
        config: &SimulationConfig,
        outcomes: OutcomeTally,
        diagnostics: BTreeMap<Handedness, TrialDiagnostics>,
        abandoned: bool,
    ) -> Self {
        let statistics = lines_by_handedness(&outcomes, &config.handedness);
        let mut tally = outcomes.labeled();
        for h in &config.handedness {
            tally.entry(*h).or_default();
        }

        Self {
            trials: config.trials,
            seed: config.seed,
            abandoned,
            tally,
            statistics,
            diagnostics,
            outcomes,
        }
    }

    /// Full tally, keyed by active side as well
    pub fn outcomes(&self) -> &OutcomeTally {
        &self.outcomes
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (handedness, line) in &self.statistics {
            let diag = self.diagnostics.get(handedness).copied().unwrap_or_default();
            let _ = writeln!(
                out,
                "{}: {} ({} trials resolved, {} skipped)",
                handedness,
                line,
                diag.completed,
                diag.skipped()
            );
        }
        if self.abandoned {
            out.push_str("Run abandoned before all trials finished\n");
        }
        out
    }

    /// Event-by-count table for one handedness, with per-event totals
    pub fn result_table(&self, handedness: Handedness) -> String {
        let by_count = self.outcomes.by_count(handedness);
        let counts: Vec<Count> = Count::ALL
            .iter()
            .copied()
            .filter(|c| by_count.contains_key(c))
            .collect();

        let mut out = String::new();
        let _ = write!(out, "{:<24}{:>7}", "Event", "Total");
        for count in &counts {
            let _ = write!(out, "{:>7}", count.label());
        }
        out.push('\n');

        for event in PlayEvent::SUMMARY {
            let total: u64 = by_count.values().map(|c| c.get(event)).sum();
            let _ = write!(out, "{:<24}{:>7}", event.name(), total);
            for count in &counts {
                match by_count[count].get(event) {
                    0 => {
                        let _ = write!(out, "{:>7}", "");
                    }
                    n => {
                        let _ = write!(out, "{:>7}", n);
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
