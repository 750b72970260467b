//! Outcome grouping
//!
//! Folds raw outcome kinds into the category they are tallied under. Applied
//! once while event tables are built, never at lookup time.

use ahash::AHashMap;

use crate::core::event::PlayEvent;

#[derive(Debug, Clone, Default)]
pub struct OutcomeGrouping {
    rules: AHashMap<PlayEvent, PlayEvent>,
}

impl OutcomeGrouping {
    /// Grouping that leaves every outcome as is
    pub fn identity() -> Self {
        Self::default()
    }

    /// Double plays of either kind in one bucket
    pub fn standard() -> Self {
        Self::identity().with_rule(PlayEvent::GroundedIntoDoublePlay, PlayEvent::DoublePlay)
    }

    /// Tally `from` as `into`; a later rule for the same `from` wins
    pub fn with_rule(mut self, from: PlayEvent, into: PlayEvent) -> Self {
        if from == into {
            self.rules.remove(&from);
        } else {
            self.rules.insert(from, into);
        }
        self
    }

    /// Category `event` is tallied under (targets are not followed further)
    pub fn apply(&self, event: PlayEvent) -> PlayEvent {
        self.rules.get(&event).copied().unwrap_or(event)
    }

    pub fn is_identity(&self) -> bool {
        self.rules.is_empty()
    }
}
