//! Simulation runner
//!
//! Drives independent trials through count, card and play resolution and
//! accumulates the outcomes. A trial that fails to resolve is dropped and
//! counted in the diagnostics; it never stops the run.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::config::SimulationConfig;
use crate::core::error::EngineError;
use crate::core::types::Handedness;
use crate::simulation::at_bat::{resolve_at_bat, AtBatDraws, SimulationTables};
use crate::simulation::draws::DrawSource;
use crate::simulation::output::SimulationReport;
use crate::simulation::tally::{OutcomeTally, TrialDiagnostics};

pub struct SimulationRunner<'a> {
    tables: &'a SimulationTables,
    config: &'a SimulationConfig,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(tables: &'a SimulationTables, config: &'a SimulationConfig) -> Self {
        Self { tables, config }
    }

    /// Run with the configured seed and mode
    ///
    /// Without a seed one is drawn from entropy and reported back.
    pub fn run_configured(&self) -> SimulationReport {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut report = if self.config.parallel {
            self.run_parallel(seed)
        } else {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            self.run(&mut rng)
        };
        report.seed = Some(seed);
        report
    }

    /// Run every trial on the current thread
    pub fn run<D: DrawSource + ?Sized>(&self, draws: &mut D) -> SimulationReport {
        let never = AtomicBool::new(false);
        self.run_until(draws, &never)
    }

    /// Run until done or until `cancel` is set
    ///
    /// The flag is checked between trials; an abandoned run still returns a
    /// valid tally of the trials that finished.
    pub fn run_until<D: DrawSource + ?Sized>(
        &self,
        draws: &mut D,
        cancel: &AtomicBool,
    ) -> SimulationReport {
        tracing::info!(
            "Simulating {} trials for {} handedness buckets",
            self.config.trials,
            self.config.handedness.len()
        );

        let mut tally = OutcomeTally::new();
        let mut diagnostics: BTreeMap<Handedness, TrialDiagnostics> = BTreeMap::new();
        let mut abandoned = false;

        'buckets: for &handedness in &self.config.handedness {
            let diag = diagnostics.entry(handedness).or_default();
            for _ in 0..self.config.trials {
                if cancel.load(Ordering::Relaxed) {
                    abandoned = true;
                    break 'buckets;
                }
                self.run_trial(draws, handedness, &mut tally, diag);
            }
            warn_if_all_skipped(handedness, diag);
        }

        if abandoned {
            tracing::info!("Simulation abandoned after {} trials", tally.total());
        }

        SimulationReport::new(self.config, tally, diagnostics, abandoned)
    }

    /// Run trial chunks on the rayon pool
    ///
    /// Chunk `i` draws from stream `i` of a ChaCha8 generator seeded with
    /// `seed`, and partial tallies are merged in chunk order, so a seed
    /// always reproduces the same report regardless of scheduling.
    pub fn run_parallel(&self, seed: u64) -> SimulationReport {
        let chunk_size = self.config.chunk_size.max(1);
        let mut jobs = Vec::new();
        for &handedness in &self.config.handedness {
            let mut remaining = self.config.trials;
            while remaining > 0 {
                let len = remaining.min(chunk_size);
                jobs.push((handedness, jobs.len() as u64, len));
                remaining -= len;
            }
        }

        tracing::info!(
            "Simulating {} trials for {} handedness buckets in {} parallel chunks",
            self.config.trials,
            self.config.handedness.len(),
            jobs.len()
        );

        let partials: Vec<(Handedness, OutcomeTally, TrialDiagnostics)> = jobs
            .par_iter()
            .map(|&(handedness, stream, len)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(stream);

                let mut tally = OutcomeTally::new();
                let mut diag = TrialDiagnostics::default();
                for _ in 0..len {
                    self.run_trial(&mut rng, handedness, &mut tally, &mut diag);
                }
                (handedness, tally, diag)
            })
            .collect();

        let mut tally = OutcomeTally::new();
        let mut diagnostics: BTreeMap<Handedness, TrialDiagnostics> = self
            .config
            .handedness
            .iter()
            .map(|&h| (h, TrialDiagnostics::default()))
            .collect();
        for (handedness, partial, diag) in &partials {
            tally.merge(partial);
            diagnostics.entry(*handedness).or_default().merge(diag);
        }
        for (handedness, diag) in &diagnostics {
            warn_if_all_skipped(*handedness, diag);
        }

        let mut report = SimulationReport::new(self.config, tally, diagnostics, false);
        report.seed = Some(seed);
        report
    }

    fn run_trial<D: DrawSource + ?Sized>(
        &self,
        draws: &mut D,
        handedness: Handedness,
        tally: &mut OutcomeTally,
        diag: &mut TrialDiagnostics,
    ) {
        let rolled = AtBatDraws::roll(draws, self.tables);
        match resolve_at_bat(self.tables, rolled, handedness) {
            Ok(outcome) => {
                tally.record(&outcome);
                diag.completed += 1;
            }
            Err(err) => {
                tracing::debug!("Skipped trial {:?} {}: {}", rolled, handedness, err);
                match err {
                    EngineError::UnknownCount(_) => diag.unknown_count += 1,
                    EngineError::NoEventData { .. } => diag.no_event_data += 1,
                    // Validated tables only fail on draws outside their domain
                    _ => diag.range_gap += 1,
                }
            }
        }
    }
}

fn warn_if_all_skipped(handedness: Handedness, diag: &TrialDiagnostics) {
    if diag.completed == 0 && diag.skipped() > 0 {
        tracing::warn!(
            "Every trial {} was skipped ({} without event data, {} unknown counts)",
            handedness,
            diag.no_event_data,
            diag.unknown_count
        );
    }
}
