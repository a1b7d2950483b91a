/*!
 * Team Accumulator
 *
 * Thread-safe running totals for one team
 */

use parking_lot::Mutex;
use std::time::Duration;

/// Totals guarded by the accumulator's mutex; both fields move together
#[derive(Default)]
struct Totals {
    total_time: Duration,
    legs_completed: usize,
}

/// Consistent view of a team's running totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSnapshot {
    pub total_time: Duration,
    pub legs_completed: usize,
}

/// Running total of one team's elapsed time and completed legs
///
/// Mutated by up to one thread per team member, each contributing exactly
/// one update. Both fields are updated in a single critical section, so a
/// reader can never observe an incremented count without the matching
/// time, or vice versa.
pub struct TeamAccumulator {
    name: String,
    totals: Mutex<Totals>,
}

impl TeamAccumulator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            totals: Mutex::new(Totals::default()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add one leg's elapsed time and count it
    ///
    /// Returns the post-increment leg count, letting the caller detect the
    /// team's final leg from the same critical section instead of through
    /// a second, separately ordered read.
    pub fn add_contribution(&self, elapsed: Duration) -> usize {
        let mut totals = self.totals.lock();
        totals.total_time += elapsed;
        totals.legs_completed += 1;
        totals.legs_completed
    }

    /// Untorn view of the current totals
    pub fn snapshot(&self) -> TeamSnapshot {
        let totals = self.totals.lock();
        TeamSnapshot {
            total_time: totals.total_time,
            legs_completed: totals.legs_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_contribution_returns_post_increment_count() {
        let team = TeamAccumulator::new("Jamaica");
        assert_eq!(team.add_contribution(Duration::from_millis(10)), 1);
        assert_eq!(team.add_contribution(Duration::from_millis(20)), 2);

        let snapshot = team.snapshot();
        assert_eq!(snapshot.legs_completed, 2);
        assert_eq!(snapshot.total_time, Duration::from_millis(30));
    }

    #[test]
    fn test_no_lost_updates_under_contention() {
        let members = 16;
        let team = Arc::new(TeamAccumulator::new("stress"));

        let handles: Vec<_> = (1..=members)
            .map(|i| {
                let team = team.clone();
                thread::spawn(move || {
                    // Stagger the threads to vary the interleaving
                    thread::sleep(Duration::from_micros((i % 4) as u64 * 100));
                    team.add_contribution(Duration::from_millis(i as u64));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let expected: u64 = (1..=members as u64).sum();
        let snapshot = team.snapshot();
        assert_eq!(snapshot.legs_completed, members);
        assert_eq!(snapshot.total_time, Duration::from_millis(expected));
    }

    #[test]
    fn test_empty_snapshot() {
        let team = TeamAccumulator::new("idle");
        let snapshot = team.snapshot();
        assert_eq!(snapshot.legs_completed, 0);
        assert_eq!(snapshot.total_time, Duration::ZERO);
    }
}
