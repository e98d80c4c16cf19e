#![deny(unsafe_code)]
//! Core types for the elliptical billiard engine.
//!
//! Provides the `ParticleState`/`Region` data model, the `Event`/`Trajectory`
//! output surface, `ModelError`, the `Scenario` run specification
//! (`WorldParams`, `Launch`, `MotionLawKind`), and JSON parameter helpers.
//!
//! The solvers and the event loop live in `billiard-sim`; this crate holds
//! everything both the engine and its consumers (CLI, visualization) share.

pub mod error;
pub mod event;
pub mod params;
pub mod scenario;
pub mod state;

pub use error::ModelError;
pub use event::{Event, EventKind, TerminalStatus, Trajectory};
pub use scenario::{Launch, MotionLawKind, Scenario, WorldParams};
pub use state::{ParticleState, Region};
