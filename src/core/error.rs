use thiserror::Error;

use crate::core::types::{CardSide, Count, Handedness};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("No range contains draw {draw} (domain 0..{domain})")]
    RangeGap { draw: u32, domain: u32 },

    #[error("Ranges {first_start}-{first_end} and {second_start}-{second_end} overlap")]
    RangeOverlap {
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },

    #[error("Range {start}-{end} lies outside domain 0..{domain}")]
    RangeOutOfDomain { start: u32, end: u32, domain: u32 },

    #[error("Range end {end} precedes start {start}")]
    InvalidRange { start: i64, end: i64 },

    #[error("Range table domain must be non-empty")]
    EmptyDomain,

    #[error("No card preference for count {0}")]
    UnknownCount(Count),

    #[error("No {side} event data for count {count} {handedness}")]
    NoEventData {
        side: CardSide,
        count: Count,
        handedness: Handedness,
    },

    #[error("Pitcher threshold {threshold} for count {count} exceeds domain {domain}")]
    ThresholdOutOfDomain {
        count: Count,
        threshold: u32,
        domain: u32,
    },

    #[error("Invalid count: {balls} balls, {strikes} strikes")]
    InvalidCount { balls: u8, strikes: u8 },

    #[error("Invalid count label: {0}")]
    InvalidCountLabel(String),

    #[error("Unknown play event: {0}")]
    UnknownEvent(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
