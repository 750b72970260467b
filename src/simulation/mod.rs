//! Trial-by-trial at-bat simulation
//!
//! Each trial draws three values (pitch count, card, play result) and
//! resolves them in that order. Trials share nothing but the immutable
//! tables, so they can be run in any order or on any number of workers.

pub mod at_bat;
pub mod draws;
pub mod output;
pub mod runner;
pub mod tally;

pub use at_bat::{
    resolve_at_bat, AtBatDraws, AtBatOutcome, SimulationInput, SimulationTables,
};
pub use draws::{DrawSource, ScriptedDraws};
pub use output::SimulationReport;
pub use runner::SimulationRunner;
pub use tally::{EventCounts, OutcomeTally, TallyKey, TrialDiagnostics};
