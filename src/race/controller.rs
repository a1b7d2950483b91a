/*!
 * Race Controller
 *
 * Builds the shared race state from config and roster, spawns one named
 * thread per competitor, fires the two start gates with the starter-gun
 * delay between them, joins every runner, and assembles the report.
 */

use crate::config::RaceConfig;
use crate::core::errors::RaceError;
use crate::race::arbiter::RaceArbiter;
use crate::race::rng::{DropSource, DurationSource, SharedRng};
use crate::race::roster::Roster;
use crate::race::runner::{Competitor, LegRunner};
use crate::race::team::TeamAccumulator;
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Final state of one team
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub name: String,
    pub total_time: Duration,
    pub legs_completed: usize,
    pub disqualified: bool,
}

/// Final per-team results plus the decided champion
#[derive(Debug, Clone, Serialize)]
pub struct RaceReport {
    pub champion: Option<String>,
    pub teams: Vec<TeamReport>,
}

/// One race, wired and ready to run
pub struct RaceController {
    config: RaceConfig,
    roster: Roster,
    durations: Arc<dyn DurationSource>,
    drops: Arc<dyn DropSource>,
    starter: Arc<dyn DurationSource>,
}

impl RaceController {
    /// Production wiring from configuration alone
    ///
    /// One shared PRNG drives leg durations and the drop policy; the
    /// starter gun gets a separately seeded generator.
    pub fn from_config(config: RaceConfig) -> Result<Self, RaceError> {
        config.validate()?;
        let roster = Roster::for_shape(config.teams, config.members);

        let legs: Arc<SharedRng> = Arc::new(match config.seed {
            Some(seed) => SharedRng::seeded(seed, config.leg_duration.as_range()),
            None => SharedRng::from_entropy(config.leg_duration.as_range()),
        });
        let starter: Arc<SharedRng> = Arc::new(match config.seed {
            Some(seed) => SharedRng::seeded(seed.wrapping_add(1), config.starter_delay.as_range()),
            None => SharedRng::from_entropy(config.starter_delay.as_range()),
        });

        Ok(Self {
            config,
            roster,
            durations: legs.clone(),
            drops: legs,
            starter,
        })
    }

    /// Explicit wiring, for deterministic races and tests
    pub fn with_sources(
        config: RaceConfig,
        roster: Roster,
        durations: Arc<dyn DurationSource>,
        drops: Arc<dyn DropSource>,
        starter: Arc<dyn DurationSource>,
    ) -> Result<Self, RaceError> {
        config.validate()?;
        roster.check_shape(config.teams, config.members)?;
        Ok(Self {
            config,
            roster,
            durations,
            drops,
            starter,
        })
    }

    /// Run the race to completion and assemble the report
    ///
    /// Blocks until every competitor thread has finished. A runner that
    /// never reaches a gate stalls the race forever; that is the intended
    /// liveness model, so there is no timeout here.
    pub fn run(self) -> Result<RaceReport, RaceError> {
        let team_count = self.config.teams;
        let team_size = self.config.members;

        let teams: Vec<Arc<TeamAccumulator>> = self
            .roster
            .teams
            .iter()
            .map(|entry| Arc::new(TeamAccumulator::new(entry.name.clone())))
            .collect();

        // Gate parties: every competitor plus this controller thread.
        let arbiter = Arc::new(RaceArbiter::new(
            team_count,
            team_count * team_size + 1,
            self.config.drop_probability,
        ));

        let mut handles = Vec::with_capacity(team_count * team_size);
        for (team_id, entry) in self.roster.teams.iter().enumerate() {
            let mut predecessor: Option<Arc<Competitor>> = None;
            for (leg, member) in entry.members.iter().enumerate() {
                let competitor =
                    Arc::new(Competitor::new(member.clone(), teams[team_id].clone()));
                let runner = LegRunner::new(
                    competitor.clone(),
                    predecessor.replace(competitor.clone()),
                    team_id,
                    team_size,
                    arbiter.clone(),
                    self.durations.clone(),
                    self.drops.clone(),
                );
                let handle = thread::Builder::new()
                    .name(format!("team{team_id}-leg{leg}"))
                    .spawn(move || runner.run())?;
                handles.push((member.clone(), handle));
            }
        }

        arbiter.ready_barrier().arrive_and_wait();
        info!("the race official raises her starting pistol");

        let delay = self.starter.next_duration();
        thread::sleep(delay);

        arbiter.go_barrier().arrive_and_wait();
        info!("GO!");

        for (name, handle) in handles {
            handle
                .join()
                .map_err(|_| RaceError::RunnerPanicked(name))?;
        }

        let champion = arbiter
            .champion()
            .map(|team_id| teams[team_id].name().to_string());
        let team_reports = teams
            .iter()
            .enumerate()
            .map(|(team_id, team)| {
                let snapshot = team.snapshot();
                TeamReport {
                    name: team.name().to_string(),
                    total_time: snapshot.total_time,
                    legs_completed: snapshot.legs_completed,
                    disqualified: arbiter.is_disqualified(team_id),
                }
            })
            .collect();

        Ok(RaceReport {
            champion,
            teams: team_reports,
        })
    }
}
