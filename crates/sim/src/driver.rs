//! Simulation driver: runs the scheduler until a budget or terminal
//! condition, producing one [`Trajectory`] per initial condition.
//!
//! Trajectories are pure functions of their inputs, so a scenario batch runs
//! its launches in parallel, one worker per trajectory, and gathers results
//! by launch index. A failure in one trajectory never affects another.

use crate::scheduler::{region_after, EventScheduler, StepOutcome};
use billiard_core::{
    Launch, ModelError, ParticleState, Scenario, TerminalStatus, Trajectory, WorldParams,
};
use glam::DVec2;
use rayon::prelude::*;

/// Default per-trajectory event budget.
const DEFAULT_MAX_EVENTS: usize = 1000;
/// Elapsed times below this count toward the stall guard.
const DEFAULT_STALL_THRESHOLD: f64 = 1e-6;
/// Consecutive sub-threshold events that trigger a stall abort.
const DEFAULT_STALL_LIMIT: usize = 3;

/// Budgets and guards for a single trajectory run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Stop (status `Completed`) once this many events are recorded.
    pub max_events: usize,
    /// Optional cap on total simulated time; reaching it is `Completed`.
    pub max_time: Option<f64>,
    /// Elapsed times below this count as stalls.
    pub stall_threshold: f64,
    /// Consecutive stalls tolerated before aborting with `Stalled`.
    pub stall_limit: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_MAX_EVENTS,
            max_time: None,
            stall_threshold: DEFAULT_STALL_THRESHOLD,
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }
}

/// Simulates one trajectory from an explicit initial condition.
///
/// Validates the world, then advances event by event until a budget or a
/// terminal condition. The returned trajectory always carries a terminal
/// status and every event produced before termination.
pub fn simulate(
    world: &WorldParams,
    position: DVec2,
    velocity: DVec2,
    config: &DriverConfig,
) -> Result<Trajectory, ModelError> {
    let scheduler = EventScheduler::from_world(world)?;
    Ok(run(&scheduler, position, velocity, config))
}

/// Runs a set of launches in parallel under one configuration.
///
/// Results are in launch order. Terminal failures (stuck, stalled, geometry)
/// are statuses on the affected trajectory, not errors of the batch.
pub fn simulate_batch(
    world: &WorldParams,
    launches: &[Launch],
    config: &DriverConfig,
) -> Result<Vec<Trajectory>, ModelError> {
    let scheduler = EventScheduler::from_world(world)?;
    Ok(launches
        .par_iter()
        .map(|launch| run(&scheduler, launch.position, launch.velocity(), config))
        .collect())
}

/// Validates a scenario and runs its launches through [`simulate_batch`] with
/// the scenario's event budget.
pub fn simulate_scenario(scenario: &Scenario) -> Result<Vec<Trajectory>, ModelError> {
    scenario.validate()?;
    let config = DriverConfig {
        max_events: scenario.max_events,
        ..DriverConfig::default()
    };
    simulate_batch(&scenario.world, &scenario.launches, &config)
}

/// The event loop for one trajectory. Infallible: every way out is a
/// recorded terminal status.
fn run(
    scheduler: &EventScheduler,
    position: DVec2,
    velocity: DVec2,
    config: &DriverConfig,
) -> Trajectory {
    let region = scheduler.initial_region(position);
    let mut state = ParticleState::new(position, velocity, region);
    let mut trajectory = Trajectory::new(state);
    let mut consecutive_stalls = 0_usize;

    while trajectory.len() < config.max_events {
        if let Some(cap) = config.max_time {
            if trajectory.total_time >= cap {
                break;
            }
        }
        match scheduler.step(&state) {
            StepOutcome::Advanced(event) => {
                if event.elapsed < config.stall_threshold {
                    consecutive_stalls += 1;
                } else {
                    consecutive_stalls = 0;
                }
                state = ParticleState::new(
                    event.position,
                    event.velocity,
                    region_after(event.kind, state.region),
                );
                trajectory.push(event);
                if consecutive_stalls >= config.stall_limit {
                    trajectory.status = TerminalStatus::Stalled;
                    return trajectory;
                }
            }
            StepOutcome::Stuck => {
                trajectory.status = TerminalStatus::Stuck;
                return trajectory;
            }
            StepOutcome::Geometry => {
                trajectory.status = TerminalStatus::GeometryError;
                return trajectory;
            }
        }
    }
    trajectory
}
