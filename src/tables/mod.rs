//! Probability range tables
//!
//! Every table is validated when it is built; a table that exists always
//! partitions its draw domain exactly.

pub mod card;
pub mod count;
pub mod event;
pub mod grouping;
pub mod range_table;

pub use card::{CardPreference, CardPreferences};
pub use count::{CountFrequencyEntry, CountTable};
pub use event::{BucketEntry, EventRangeEntry, EventRanges, EventTable};
pub use grouping::OutcomeGrouping;
pub use range_table::{RangeEntry, RangeTable};
