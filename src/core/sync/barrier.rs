/*!
 * Cyclic Barrier
 *
 * Reusable N-party rendezvous point for the race start gates
 */

use parking_lot::{Condvar, Mutex};

/// Rendezvous state guarded by the barrier's mutex
struct BarrierState {
    waiting: usize,
    generation: u64,
}

/// Reusable rendezvous point for a fixed number of parties
///
/// Every one of `parties` threads must call [`arrive_and_wait`] before any
/// of them is released. The last arriver resets the count, advances the
/// generation, and wakes the rest; earlier arrivers block on the condvar
/// re-checked against generation equality, so neither a spurious wakeup
/// nor a thread re-entering for the next round can release a waiter early.
///
/// The barrier is cyclic: a completed rendezvous leaves it immediately
/// ready for the next one, with no reinitialization.
///
/// There is no timeout and no error path. If fewer than `parties` threads
/// ever arrive, all callers block forever.
///
/// [`arrive_and_wait`]: CyclicBarrier::arrive_and_wait
pub struct CyclicBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    release: Condvar,
}

impl CyclicBarrier {
    /// Create a barrier for `parties` threads
    ///
    /// # Panics
    ///
    /// Panics if `parties` is zero.
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "a rendezvous needs at least one party");
        Self {
            parties,
            state: Mutex::new(BarrierState {
                waiting: 0,
                generation: 0,
            }),
            release: Condvar::new(),
        }
    }

    /// Number of threads the rendezvous requires
    #[inline]
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Block until all parties have arrived for the current generation
    pub fn arrive_and_wait(&self) {
        let mut state = self.state.lock();
        let arrival_generation = state.generation;

        state.waiting += 1;
        if state.waiting == self.parties {
            state.waiting = 0;
            state.generation = state.generation.wrapping_add(1);
            self.release.notify_all();
        } else {
            while state.generation == arrival_generation {
                self.release.wait(&mut state);
            }
        }
    }
}
