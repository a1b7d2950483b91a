/*!
 * Randomness Providers
 *
 * Opaque sources of leg durations and drop-policy samples. The race core
 * only needs "produce a duration on demand" and "produce a unit-interval
 * sample on demand"; both must be callable from many threads at once.
 */

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::time::Duration;

/// Provider of simulated leg durations
pub trait DurationSource: Send + Sync {
    fn next_duration(&self) -> Duration;
}

/// Provider of uniform samples in `[0, 1)` for the baton-drop policy
pub trait DropSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Mutex-guarded PRNG shared across competitor threads
///
/// Draws uniform durations from the range fixed at construction, and
/// uniform unit-interval floats for the drop policy. Seedable for
/// reproducible races, entropy-seeded by default.
pub struct SharedRng {
    engine: Mutex<StdRng>,
    durations: Range<Duration>,
}

impl SharedRng {
    /// Entropy-seeded generator for the given duration range
    pub fn from_entropy(durations: Range<Duration>) -> Self {
        Self {
            engine: Mutex::new(StdRng::from_entropy()),
            durations,
        }
    }

    /// Deterministic generator, for reproducible races
    pub fn seeded(seed: u64, durations: Range<Duration>) -> Self {
        Self {
            engine: Mutex::new(StdRng::seed_from_u64(seed)),
            durations,
        }
    }
}

impl DurationSource for SharedRng {
    fn next_duration(&self) -> Duration {
        let fraction = self.engine.lock().gen::<f64>();
        let span = self.durations.end - self.durations.start;
        self.durations.start + span.mul_f64(fraction)
    }
}

impl DropSource for SharedRng {
    fn next_unit(&self) -> f64 {
        self.engine.lock().gen()
    }
}

/// Fixed duration source, for deterministic races and tests
pub struct FixedDuration(pub Duration);

impl DurationSource for FixedDuration {
    fn next_duration(&self) -> Duration {
        self.0
    }
}

/// Constant unit sample, for forcing the drop policy in either direction
pub struct ConstantDrop(pub f64);

impl DropSource for ConstantDrop {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_stay_in_range() {
        let range = Duration::from_millis(10)..Duration::from_millis(20);
        let rng = SharedRng::seeded(7, range.clone());

        for _ in 0..100 {
            let d = rng.next_duration();
            assert!(d >= range.start && d <= range.end);
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let range = Duration::from_millis(1)..Duration::from_millis(100);
        let a = SharedRng::seeded(42, range.clone());
        let b = SharedRng::seeded(42, range);

        for _ in 0..10 {
            assert_eq!(a.next_duration(), b.next_duration());
        }
    }

    #[test]
    fn test_unit_samples_in_interval() {
        let rng = SharedRng::seeded(3, Duration::ZERO..Duration::ZERO);
        for _ in 0..100 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let rng = SharedRng::seeded(1, Duration::from_millis(5)..Duration::from_millis(5));
        assert_eq!(rng.next_duration(), Duration::from_millis(5));
    }
}
