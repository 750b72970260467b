//! Table data loading

pub mod loader;

pub use loader::{card_preferences_from_json, load_card_preferences, LoadError, PlayerCard};
