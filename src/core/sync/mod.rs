/*!
 * Synchronization Primitives
 *
 * The two blocking primitives the race is built on:
 * - `CyclicBarrier`: reusable N-party rendezvous for the start gates
 * - `BatonSlot`: single-producer/single-consumer handoff between legs
 *
 * Both follow the same condvar discipline: the predicate is read under
 * the mutex that guards it and re-checked on every wake. Neither has a
 * timeout or an error path; a party that never arrives stalls its
 * waiters forever, which is the intended liveness model.
 */

mod barrier;
mod baton;

pub use barrier::CyclicBarrier;
pub use baton::BatonSlot;
