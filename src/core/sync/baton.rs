/*!
 * Baton Slot
 *
 * Single-producer/single-consumer handoff between adjacent legs
 */

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

/// Handoff state guarded by the slot's mutex
///
/// `finished` transitions false to true exactly once; `elapsed` is only
/// meaningful once `finished` is observed true under the same mutex.
#[derive(Default)]
struct HandoffState {
    finished: bool,
    elapsed: Duration,
}

/// One competitor's handoff cell
///
/// Written exactly once by the owning competitor's thread via [`publish`],
/// wait-read by at most one successor via [`await_handoff`]. The predicate
/// is evaluated under the mutex that guards the flag and re-checked on
/// every wake, so the successor can neither miss the handoff nor observe
/// `finished` without the corresponding elapsed time.
///
/// The first leg of a team has no predecessor and never waits on a slot.
///
/// [`publish`]: BatonSlot::publish
/// [`await_handoff`]: BatonSlot::await_handoff
pub struct BatonSlot {
    state: Mutex<HandoffState>,
    baton: Condvar,
}

impl BatonSlot {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HandoffState::default()),
            baton: Condvar::new(),
        }
    }

    /// Record the leg time and release the successor
    ///
    /// Callable exactly once per slot, by the owning competitor only.
    pub fn publish(&self, elapsed: Duration) {
        let mut state = self.state.lock();
        debug_assert!(!state.finished, "baton published twice");
        state.elapsed = elapsed;
        state.finished = true;
        // At most one thread can be parked here.
        self.baton.notify_one();
    }

    /// Block until the owner has published, then return its leg time
    pub fn await_handoff(&self) -> Duration {
        let mut state = self.state.lock();
        while !state.finished {
            self.baton.wait(&mut state);
        }
        state.elapsed
    }

    /// Non-blocking view of the handoff flag, for diagnostics
    pub fn is_finished(&self) -> bool {
        self.state.lock().finished
    }
}

impl Default for BatonSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_handoff_returns_published_time() {
        let slot = Arc::new(BatonSlot::new());
        let slot_clone = slot.clone();

        let handle = thread::spawn(move || slot_clone.await_handoff());

        thread::sleep(Duration::from_millis(50));
        slot.publish(Duration::from_millis(123));

        assert_eq!(handle.join().unwrap(), Duration::from_millis(123));
    }

    #[test]
    fn test_handoff_happens_before_publish_completes() {
        let slot = Arc::new(BatonSlot::new());
        let slot_clone = slot.clone();
        let published = Duration::from_millis(77);

        let waiter = thread::spawn(move || {
            let elapsed = slot_clone.await_handoff();
            // The successor resumes only after publish: the recorded time
            // must already be visible and non-default.
            assert_ne!(elapsed, Duration::ZERO);
            assert_eq!(elapsed, Duration::from_millis(77));
        });

        thread::sleep(Duration::from_millis(20));
        slot.publish(published);
        waiter.join().unwrap();
    }

    #[test]
    fn test_publish_before_wait_does_not_block() {
        let slot = BatonSlot::new();
        slot.publish(Duration::from_millis(5));

        // The handoff is already visible; the "wait" must return at once.
        let start = Instant::now();
        assert_eq!(slot.await_handoff(), Duration::from_millis(5));
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_is_finished_tracks_publish() {
        let slot = BatonSlot::new();
        assert!(!slot.is_finished());
        slot.publish(Duration::from_millis(1));
        assert!(slot.is_finished());
    }
}
