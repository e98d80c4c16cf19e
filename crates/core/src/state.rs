//! Particle state: position, velocity, and the active motion region.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Which motion law currently governs the particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Ballistic straight-line motion outside the attraction field.
    Free,
    /// Field motion law active (harmonic by default).
    InField,
}

/// Instantaneous particle state between two events.
///
/// Mutated only by the event scheduler; the invariant
/// `x²/a² + y²/b² ≤ 1` holds at all times, with equality (within geometric
/// tolerance) exactly at boundary-collision events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: DVec2,
    pub velocity: DVec2,
    pub region: Region,
}

impl ParticleState {
    pub fn new(position: DVec2, velocity: DVec2, region: Region) -> Self {
        Self {
            position,
            velocity,
            region,
        }
    }

    /// Speed `|v|`.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Direction of travel, `atan2(vy, vx)`.
    pub fn heading(&self) -> f64 {
        self.velocity.y.atan2(self.velocity.x)
    }

    /// True when every component of position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}
