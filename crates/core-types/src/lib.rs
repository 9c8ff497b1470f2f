pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AggregationStrategy, PeriodKey};
pub use structs::{AccountIdentity, AccountSnapshot, BaselineRecord, GainSample, RoiResult};
