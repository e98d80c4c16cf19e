#![deny(unsafe_code)]
//! Analytic event-driven trajectory engine for a point particle inside a
//! closed elliptical boundary, optionally perturbed by a circular attraction
//! field.
//!
//! The engine advances a particle from event to event in closed form:
//! ballistic flight between wall bounces and field crossings, and a harmonic
//! (or constant-acceleration) law while inside the field. Collision and
//! crossing times come from exact quadratic roots where a closed form exists
//! and from bounded bracket-and-bisect search where it does not. No fixed-step
//! integration anywhere.
//!
//! Entry points: [`simulate`] for a single initial condition,
//! [`simulate_scenario`] for a parallel batch.

pub mod boundary;
pub mod driver;
pub mod field;
pub mod orbit;
pub mod scheduler;
pub mod solve;

pub use boundary::EllipseBoundary;
pub use driver::{simulate, simulate_batch, simulate_scenario, DriverConfig};
pub use field::AttractionField;
pub use orbit::{FieldOrbit, HarmonicOrbit, ParabolicArc};
pub use scheduler::{EventScheduler, StepOutcome};

/// Minimum event time: roots at or below this are treated as re-detections of
/// the point the particle just left.
pub const EPS_TIME: f64 = 1e-8;

/// Geometric tolerance for incidence checks (`x²/a² + y²/b² = 1` and
/// `|p - c| = r` at events).
pub const EPS_GEOM: f64 = 1e-6;
