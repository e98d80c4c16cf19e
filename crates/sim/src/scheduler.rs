//! Event scheduler: the two-state machine that picks the next physical event
//! and applies its transition.
//!
//! `Free` offers two candidates (wall collision, field entry) and `InField`
//! offers two (in-orbit wall collision, field exit); the smaller positive
//! finite time wins. Candidates that do not exist are `None`, and a state
//! with no candidates at all is terminal.

use crate::boundary::EllipseBoundary;
use crate::field::AttractionField;
use crate::orbit::FieldOrbit;
use crate::EPS_GEOM;
use billiard_core::{
    Event, EventKind, ModelError, MotionLawKind, ParticleState, Region, WorldParams,
};
use glam::DVec2;

/// Velocity magnitude below which the particle counts as at rest.
const REST_SPEED_SQ: f64 = 1e-24;

/// Result of one scheduling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The next event, with the post-transition state embedded.
    Advanced(Event),
    /// No candidate event exists; the trajectory is terminally stuck.
    Stuck,
    /// A root that must exist was not found, or a non-finite value appeared.
    Geometry,
}

/// Computes next events for a fixed boundary/field configuration.
///
/// Holds no per-trajectory state: in-field orbit parameters are re-derived
/// from the particle state on every step, so the same scheduler can serve
/// many trajectories concurrently.
#[derive(Debug, Clone, Copy)]
pub struct EventScheduler {
    boundary: EllipseBoundary,
    field: Option<AttractionField>,
    law: MotionLawKind,
}

impl EventScheduler {
    /// Builds a scheduler from world parameters.
    ///
    /// A zero-gravity field is dropped here: the solvers never see a
    /// transparent field, so no runtime branch guards against it.
    pub fn from_world(world: &WorldParams) -> Result<Self, ModelError> {
        world.validate()?;
        let boundary = EllipseBoundary::new(world.a, world.b)?;
        let field = if world.field_active() {
            Some(AttractionField::new(
                world.center,
                world.radius,
                world.gravity,
            )?)
        } else {
            None
        };
        Ok(Self {
            boundary,
            field,
            law: world.law,
        })
    }

    pub fn boundary(&self) -> &EllipseBoundary {
        &self.boundary
    }

    /// Region for an initial position: `InField` only when an active field
    /// contains it.
    pub fn initial_region(&self, position: DVec2) -> Region {
        match &self.field {
            Some(f) if f.contains(position) => Region::InField,
            _ => Region::Free,
        }
    }

    /// Computes the next event from `state`, or reports a terminal condition.
    pub fn step(&self, state: &ParticleState) -> StepOutcome {
        if !state.is_finite() {
            return StepOutcome::Geometry;
        }
        match state.region {
            Region::Free => self.step_free(state),
            Region::InField => self.step_in_field(state),
        }
    }

    fn step_free(&self, state: &ParticleState) -> StepOutcome {
        let p = state.position;
        let v = state.velocity;
        let t_wall = self.boundary.collision_time(p, v);
        let t_enter = self.field.as_ref().and_then(|f| f.entry_time(p, v));

        let bounce = |tw: f64| {
            let hit = p + v * tw;
            let reflected = self.boundary.reflect(hit, v);
            self.emit(EventKind::EllipseCollision, tw, hit, reflected)
        };
        match (t_wall, t_enter) {
            (None, None) => {
                // Strictly inside with real velocity, the wall root must
                // exist; anything else here is a legitimate dead end.
                let moving = v.length_squared() > REST_SPEED_SQ;
                if moving && self.boundary.incidence(p) < 1.0 - EPS_GEOM {
                    StepOutcome::Geometry
                } else {
                    StepOutcome::Stuck
                }
            }
            (Some(tw), Some(te)) if tw <= te => bounce(tw),
            (Some(tw), None) => bounce(tw),
            (_, Some(te)) => {
                let hit = p + v * te;
                self.emit(EventKind::FieldEntry, te, hit, v)
            }
        }
    }

    fn step_in_field(&self, state: &ParticleState) -> StepOutcome {
        let field = match &self.field {
            Some(f) => f,
            // InField without a field configured cannot arise from our own
            // transitions; treat it as corrupted geometry.
            None => return StepOutcome::Geometry,
        };
        let orbit = match FieldOrbit::from_entry(
            self.law,
            field.center(),
            field.gravity(),
            state.position,
            state.velocity,
        ) {
            Some(o) => o,
            // degenerate derivation: no candidates from this law
            None => return StepOutcome::Stuck,
        };

        let t_exit = orbit.exit_time(field.radius());
        let t_wall = orbit.wall_time(&self.boundary, t_exit, field.radius());

        let bounce = |tw: f64| {
            let hit = orbit.position_at(tw);
            let reflected = self.boundary.reflect(hit, orbit.velocity_at(tw));
            self.emit(EventKind::EllipseCollision, tw, hit, reflected)
        };
        match (t_wall, t_exit) {
            (None, None) => StepOutcome::Stuck,
            (Some(tw), Some(te)) if tw <= te => bounce(tw),
            (Some(tw), None) => bounce(tw),
            (_, Some(te)) => {
                self.emit(EventKind::FieldExit, te, orbit.position_at(te), orbit.velocity_at(te))
            }
        }
    }

    /// Builds the event with its derived observables.
    fn emit(&self, kind: EventKind, elapsed: f64, position: DVec2, velocity: DVec2) -> StepOutcome {
        if !(position.is_finite() && velocity.is_finite() && elapsed.is_finite()) {
            return StepOutcome::Geometry;
        }
        let tangent_speed = match kind {
            EventKind::EllipseCollision => Some(self.boundary.tangent_speed(position, velocity)),
            _ => None,
        };
        // plotting convention: shift the upper branch by one full major axis
        let folded_x = if position.y > 0.0 {
            position.x + 2.0 * self.boundary.semi_major()
        } else {
            position.x
        };
        StepOutcome::Advanced(Event {
            kind,
            elapsed,
            position,
            velocity,
            reflection_angle: velocity.y.atan2(velocity.x),
            tangent_speed,
            folded_x,
        })
    }
}

/// Region governing motion after an event of the given kind.
pub fn region_after(kind: EventKind, current: Region) -> Region {
    match kind {
        EventKind::EllipseCollision => current,
        EventKind::FieldEntry => Region::InField,
        EventKind::FieldExit => Region::Free,
    }
}
