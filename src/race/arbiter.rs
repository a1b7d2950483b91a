/*!
 * Race Arbiter
 *
 * Race-wide shared state: the two start gates, the single winner flag,
 * the per-team disqualification set, and the baton-drop policy. Passed
 * by `Arc` to every competitor thread; never a process-wide singleton.
 */

use crate::core::sync::CyclicBarrier;
use crate::race::rng::DropSource;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Index into the race's team table
pub type TeamId = usize;

/// Result of the finish-line decision for a team's last leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishOutcome {
    /// This call performed the race-wide false-to-true winner transition
    pub claimed: bool,
    /// The claim succeeded and the team was eligible at decision time
    pub champion: bool,
}

/// Shared arbiter for one race
pub struct RaceArbiter {
    ready: CyclicBarrier,
    go: CyclicBarrier,
    winner_claimed: AtomicBool,
    // Holds the decided champion and serializes every finish-line
    // decision against concurrent disqualifications.
    champion: Mutex<Option<TeamId>>,
    disqualified: Box<[AtomicBool]>,
    drop_probability: f64,
}

impl RaceArbiter {
    /// Create the arbiter for `teams` teams and `parties` gate parties
    ///
    /// `parties` counts every competitor thread plus the controller that
    /// fires the gates.
    pub fn new(teams: usize, parties: usize, drop_probability: f64) -> Self {
        Self {
            ready: CyclicBarrier::new(parties),
            go: CyclicBarrier::new(parties),
            winner_claimed: AtomicBool::new(false),
            champion: Mutex::new(None),
            disqualified: (0..teams).map(|_| AtomicBool::new(false)).collect(),
            drop_probability,
        }
    }

    /// Gate where every thread registers readiness
    #[inline]
    pub fn ready_barrier(&self) -> &CyclicBarrier {
        &self.ready
    }

    /// Gate that fires the actual start
    #[inline]
    pub fn go_barrier(&self) -> &CyclicBarrier {
        &self.go
    }

    /// Race-wide test-and-set of the winner flag
    ///
    /// Returns `true` for exactly one caller across the whole race: the
    /// one that performs the false-to-true transition. Every later call
    /// returns `false`.
    pub fn claim_winner(&self) -> bool {
        self.winner_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether any final leg has claimed the winner flag
    pub fn winner_claimed(&self) -> bool {
        self.winner_claimed.load(Ordering::Acquire)
    }

    /// Mark a team disqualified
    ///
    /// Idempotent: only the first effective call returns `true` and logs
    /// the violation; repeats are silent no-ops. Taking the finish-line
    /// lock makes the flag write atomic with any concurrent winner
    /// decision for the same team.
    pub fn disqualify(&self, team: TeamId, team_name: &str) -> bool {
        let _decision = self.champion.lock();
        let first = !self.disqualified[team].swap(true, Ordering::AcqRel);
        if first {
            warn!(team = team_name, "disqualified for dropping the baton");
        }
        first
    }

    #[inline]
    pub fn is_disqualified(&self, team: TeamId) -> bool {
        self.disqualified[team].load(Ordering::Acquire)
    }

    /// One atomic finish-line decision for a team's last leg
    ///
    /// Claims the winner flag and reads the team's eligibility under the
    /// same lock `disqualify` takes, so a team can neither be declared
    /// champion an instant before its own disqualification becomes
    /// visible nor lose the claim to one an instant after. The flag is
    /// consumed even by an ineligible team: its anchor leg still crossed
    /// the line first, so no slower team inherits the win.
    pub fn declare_finish(&self, team: TeamId) -> FinishOutcome {
        let mut champion = self.champion.lock();
        let claimed = self.claim_winner();
        let eligible = !self.is_disqualified(team);
        if claimed && eligible {
            *champion = Some(team);
        }
        FinishOutcome {
            claimed,
            champion: claimed && eligible,
        }
    }

    /// The champion decided at the finish line, if any team was eligible
    pub fn champion(&self) -> Option<TeamId> {
        *self.champion.lock()
    }

    /// Baton-drop policy hook
    ///
    /// Draws exactly one unit-interval sample and compares it against the
    /// configured drop probability. Called once per non-first handoff.
    pub fn decide_baton_drop(&self, source: &dyn DropSource) -> bool {
        source.next_unit() < self.drop_probability
    }
}
