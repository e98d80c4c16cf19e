//! Error types for billiard scenario construction and validation.

use thiserror::Error;

/// Errors produced when building or validating simulation inputs.
///
/// Runtime conditions inside a run (stuck orbits, stalls, missing roots) are
/// not errors at this level — they terminate a single trajectory and are
/// reported through its `TerminalStatus`.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A boundary semi-axis was zero, negative, or non-finite.
    #[error("semi-axes must be positive and finite, got a={a}, b={b}")]
    InvalidSemiAxes { a: f64, b: f64 },

    /// The field radius was zero, negative, or non-finite.
    #[error("field radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// The field strength was negative or non-finite.
    #[error("field strength must be non-negative and finite, got {0}")]
    InvalidGravity(f64),

    /// A launch position lay outside the elliptical boundary.
    #[error("launch position ({x}, {y}) lies outside the boundary")]
    StartOutsideBoundary { x: f64, y: f64 },

    /// A scalar input that must be finite was NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// A motion-law name was not recognized.
    #[error("unknown motion law: {0}")]
    UnknownMotionLaw(String),

    /// A scenario contained no launches.
    #[error("scenario has no launches")]
    NoLaunches,
}
