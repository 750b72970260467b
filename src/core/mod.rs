pub mod config;
pub mod error;
pub mod event;
pub mod types;

pub use config::{ConfigError, SimulationConfig, DEFAULT_TRIALS};
pub use error::{EngineError, Result};
pub use event::PlayEvent;
pub use types::{CardSide, Count, Handedness};
