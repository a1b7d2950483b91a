/*!
 * Race Coordination
 *
 * Everything above the raw synchronization primitives: per-team totals,
 * the shared arbiter, the per-thread leg runner, randomness providers,
 * roster data, and the controller that runs one race end to end.
 */

mod arbiter;
mod controller;
mod rng;
mod roster;
mod runner;
mod team;

pub use arbiter::{FinishOutcome, RaceArbiter, TeamId};
pub use controller::{RaceController, RaceReport, TeamReport};
pub use rng::{ConstantDrop, DropSource, DurationSource, FixedDuration, SharedRng};
pub use roster::{Roster, TeamEntry};
pub use runner::{Competitor, LegPhase, LegRunner};
pub use team::{TeamAccumulator, TeamSnapshot};
