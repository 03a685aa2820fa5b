//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for one signing run.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
