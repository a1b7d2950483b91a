/*!
 * Relay Race Simulator Library
 * Concurrency coordination for a multi-team relay race
 */

pub mod config;
pub mod core;
pub mod race;
pub mod tracer;

// Re-exports
pub use crate::core::errors::{ConfigError, RaceError};
pub use crate::core::sync::{BatonSlot, CyclicBarrier};
pub use config::{DurationRange, RaceConfig};
pub use race::{
    Competitor, ConstantDrop, DropSource, DurationSource, FinishOutcome, FixedDuration, LegPhase,
    LegRunner, RaceArbiter, RaceController, RaceReport, Roster, SharedRng, TeamAccumulator,
    TeamEntry, TeamId, TeamReport, TeamSnapshot,
};
pub use tracer::init_tracing;
