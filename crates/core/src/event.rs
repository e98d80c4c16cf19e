//! Events and trajectories: the output surface of the engine.
//!
//! A [`Trajectory`] is an ordered, append-only event log owned by the run
//! that produced it. Downstream consumers (plotting, CLI output) read events;
//! nothing outside the driver mutates a trajectory.

use crate::state::ParticleState;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Kind of physical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Specular bounce off the elliptical wall.
    EllipseCollision,
    /// Ballistic crossing into the attraction field.
    FieldEntry,
    /// Crossing out of the attraction field back to free flight.
    FieldExit,
}

/// One event in a trajectory, with the derived observables the downstream
/// phase-space plots consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// Time elapsed since the previous event (strictly positive).
    pub elapsed: f64,
    /// Position at the event instant.
    pub position: DVec2,
    /// Velocity just after the event transition was applied.
    pub velocity: DVec2,
    /// Direction of travel after the event, `atan2(vy, vx)`.
    pub reflection_angle: f64,
    /// Absolute velocity component along the wall tangent; present only for
    /// `EllipseCollision` events.
    pub tangent_speed: Option<f64>,
    /// Presentation convention: the x-coordinate shifted by `+2a` when
    /// `y > 0`, separating the two wall branches for plotting. Not physics.
    pub folded_x: f64,
}

/// How a trajectory run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    /// Event or time budget exhausted while still progressing. Not an error.
    Completed,
    /// No further event is geometrically reachable (e.g. a closed orbit
    /// inside the field).
    Stuck,
    /// Progress collapsed to repeated near-zero time steps and the stall
    /// guard fired.
    Stalled,
    /// A root that must exist mathematically was not found, or a non-finite
    /// value appeared. Prior events are retained.
    GeometryError,
}

/// Ordered event log for one initial condition.
///
/// Built incrementally by the driver, then frozen; each trajectory is a pure
/// function of its initial condition and the world parameters, so two runs
/// with identical inputs produce identical logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub initial: ParticleState,
    pub events: Vec<Event>,
    pub status: TerminalStatus,
    /// Sum of all elapsed times in `events`.
    pub total_time: f64,
}

impl Trajectory {
    /// Starts an empty log. The status is `Completed` until the driver
    /// finishes or overrides it with a terminal condition.
    pub fn new(initial: ParticleState) -> Self {
        Self {
            initial,
            events: Vec::new(),
            status: TerminalStatus::Completed,
            total_time: 0.0,
        }
    }

    /// Appends an event and accounts its elapsed time.
    pub fn push(&mut self, event: Event) {
        self.total_time += event.elapsed;
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of the given kind, in order.
    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// State just after the last event, or the initial state for an empty log.
    ///
    /// The region after an event follows from its kind: a wall bounce keeps
    /// the region, entry switches to `InField`, exit switches to `Free`.
    pub fn final_state(&self) -> ParticleState {
        use crate::state::Region;
        let mut state = self.initial;
        if let Some(last) = self.events.last() {
            state.position = last.position;
            state.velocity = last.velocity;
        }
        for e in &self.events {
            match e.kind {
                EventKind::EllipseCollision => {}
                EventKind::FieldEntry => state.region = Region::InField,
                EventKind::FieldExit => state.region = Region::Free,
            }
        }
        state
    }
}
