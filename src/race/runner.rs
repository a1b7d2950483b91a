/*!
 * Leg Runner
 *
 * Per-thread orchestration of one competitor's lifecycle:
 * Registering -> AwaitingStart -> AwaitingBaton -> Running -> Finished
 */

use crate::core::sync::BatonSlot;
use crate::race::arbiter::{RaceArbiter, TeamId};
use crate::race::rng::{DropSource, DurationSource};
use crate::race::team::TeamAccumulator;
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

/// One athlete: display name, shared team back-reference, and the
/// handoff cell the successor will wait on
pub struct Competitor {
    name: String,
    team: Arc<TeamAccumulator>,
    baton: BatonSlot,
}

impl Competitor {
    pub fn new(name: impl Into<String>, team: Arc<TeamAccumulator>) -> Self {
        Self {
            name: name.into(),
            team,
            baton: BatonSlot::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn team(&self) -> &TeamAccumulator {
        &self.team
    }

    #[inline]
    pub fn baton(&self) -> &BatonSlot {
        &self.baton
    }
}

/// Lifecycle phases of one competitor thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegPhase {
    Registering,
    AwaitingStart,
    AwaitingBaton,
    Running,
    Finished,
}

/// Everything one competitor thread needs; [`run`] consumes it
///
/// The runner holds a shared reference to its own competitor record, an
/// optional reference to its predecessor (absent for the first leg), the
/// shared arbiter, and the duration/drop sources.
///
/// [`run`]: LegRunner::run
pub struct LegRunner {
    competitor: Arc<Competitor>,
    predecessor: Option<Arc<Competitor>>,
    team_id: TeamId,
    team_size: usize,
    arbiter: Arc<RaceArbiter>,
    durations: Arc<dyn DurationSource>,
    drops: Arc<dyn DropSource>,
}

impl LegRunner {
    pub fn new(
        competitor: Arc<Competitor>,
        predecessor: Option<Arc<Competitor>>,
        team_id: TeamId,
        team_size: usize,
        arbiter: Arc<RaceArbiter>,
        durations: Arc<dyn DurationSource>,
        drops: Arc<dyn DropSource>,
    ) -> Self {
        Self {
            competitor,
            predecessor,
            team_id,
            team_size,
            arbiter,
            durations,
            drops,
        }
    }

    fn enter(&self, phase: LegPhase) {
        debug!(runner = self.competitor.name(), phase = ?phase, "phase transition");
    }

    /// Run this competitor's whole lifecycle to completion
    pub fn run(self) {
        let athlete = self.competitor.as_ref();
        let team_name = athlete.team().name();

        self.enter(LegPhase::Registering);
        info!("{} ready", athlete.name());
        self.arbiter.ready_barrier().arrive_and_wait();

        self.enter(LegPhase::AwaitingStart);
        self.arbiter.go_barrier().arrive_and_wait();

        match &self.predecessor {
            None => info!("{} started", athlete.name()),
            Some(predecessor) => {
                self.enter(LegPhase::AwaitingBaton);
                let incoming = predecessor.baton().await_handoff();
                // Policy check happens exactly once per handoff, after the
                // exchange is visible.
                if self.arbiter.decide_baton_drop(self.drops.as_ref()) {
                    self.arbiter.disqualify(self.team_id, team_name);
                }
                info!(
                    incoming_leg_s = incoming.as_secs_f64(),
                    "{} ({}) took the baton from {}",
                    athlete.name(),
                    team_name,
                    predecessor.name(),
                );
            }
        }

        self.enter(LegPhase::Running);
        let elapsed = self.durations.next_duration();
        thread::sleep(elapsed);

        // Accumulate before publishing: the successor must observe this
        // leg already counted, which keeps final-leg detection exact.
        let legs_completed = athlete.team().add_contribution(elapsed);
        athlete.baton().publish(elapsed);
        info!(
            "leg {}: {} ran in {:.3} s ({})",
            legs_completed,
            athlete.name(),
            elapsed.as_secs_f64(),
            team_name,
        );

        self.enter(LegPhase::Finished);
        if legs_completed == self.team_size {
            let outcome = self.arbiter.declare_finish(self.team_id);
            if outcome.champion {
                info!("team {} is the WINNER!", team_name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::rng::{ConstantDrop, FixedDuration};
    use std::time::Duration;

    fn solo_runner(
        drop_probability: f64,
        drop_sample: f64,
    ) -> (Arc<RaceArbiter>, Arc<Competitor>, thread::JoinHandle<()>) {
        let team = Arc::new(TeamAccumulator::new("solo"));
        let competitor = Arc::new(Competitor::new("runner", team));
        // Two gate parties: the runner plus the test acting as controller.
        let arbiter = Arc::new(RaceArbiter::new(1, 2, drop_probability));
        let runner = LegRunner::new(
            competitor.clone(),
            None,
            0,
            1,
            arbiter.clone(),
            Arc::new(FixedDuration(Duration::from_millis(5))),
            Arc::new(ConstantDrop(drop_sample)),
        );
        let handle = thread::spawn(move || runner.run());
        (arbiter, competitor, handle)
    }

    #[test]
    fn test_single_leg_team_wins_outright() {
        let (arbiter, competitor, handle) = solo_runner(0.0, 0.5);
        arbiter.ready_barrier().arrive_and_wait();
        arbiter.go_barrier().arrive_and_wait();
        handle.join().unwrap();

        assert_eq!(competitor.baton().await_handoff(), Duration::from_millis(5));
        assert_eq!(arbiter.champion(), Some(0));
        assert_eq!(competitor.team().snapshot().legs_completed, 1);
    }

    #[test]
    fn test_first_leg_never_evaluates_drop_policy() {
        // Drop probability 1.0 would disqualify on any handoff, but a
        // first leg has no predecessor and must stay clean.
        let (arbiter, _competitor, handle) = solo_runner(1.0, 0.0);
        arbiter.ready_barrier().arrive_and_wait();
        arbiter.go_barrier().arrive_and_wait();
        handle.join().unwrap();

        assert!(!arbiter.is_disqualified(0));
    }
}
