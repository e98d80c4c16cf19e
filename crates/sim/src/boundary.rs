//! Elliptical wall: collision-time solver and specular reflection.

use crate::solve::smallest_root_after;
use crate::{EPS_GEOM, EPS_TIME};
use billiard_core::ModelError;
use glam::DVec2;

/// Closed elliptical boundary `x²/a² + y²/b² = 1`, immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseBoundary {
    a: f64,
    b: f64,
}

impl EllipseBoundary {
    /// Creates a boundary with semi-axes `a` (along x) and `b` (along y).
    ///
    /// Returns `ModelError::InvalidSemiAxes` unless both are positive and
    /// finite.
    pub fn new(a: f64, b: f64) -> Result<Self, ModelError> {
        if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
            return Err(ModelError::InvalidSemiAxes { a, b });
        }
        Ok(Self { a, b })
    }

    pub fn semi_major(&self) -> f64 {
        self.a
    }

    pub fn semi_minor(&self) -> f64 {
        self.b
    }

    /// The quadratic incidence value `x²/a² + y²/b²`: below 1 inside, 1 on
    /// the wall, above 1 outside.
    pub fn incidence(&self, p: DVec2) -> f64 {
        p.x * p.x / (self.a * self.a) + p.y * p.y / (self.b * self.b)
    }

    /// True when the point is inside or on the wall (within tolerance).
    pub fn contains(&self, p: DVec2) -> bool {
        self.incidence(p) <= 1.0 + EPS_GEOM
    }

    /// Time until a ballistic particle at `p` with velocity `v` hits the
    /// wall.
    ///
    /// Solves `A t² + B t + C = 0` with the incidence coefficients; the root
    /// must exceed [`EPS_TIME`] so the bounce just applied is not re-detected.
    /// `None` means no admissible root: either the particle is at rest or the
    /// ray genuinely misses (possible only from outside).
    pub fn collision_time(&self, p: DVec2, v: DVec2) -> Option<f64> {
        let a2 = self.a * self.a;
        let b2 = self.b * self.b;
        let qa = v.x * v.x / a2 + v.y * v.y / b2;
        let qb = 2.0 * (p.x * v.x / a2 + p.y * v.y / b2);
        let qc = self.incidence(p) - 1.0;
        smallest_root_after(qa, qb, qc, EPS_TIME)
    }

    /// Outward unit normal at a wall point, `(2x/a², 2y/b²)` normalized.
    pub fn outward_normal(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            2.0 * p.x / (self.a * self.a),
            2.0 * p.y / (self.b * self.b),
        )
        .normalize_or_zero()
    }

    /// Specular reflection of `v` about the wall normal at `p`:
    /// `v' = v − 2(v·n̂)n̂`. Elastic; `|v'| = |v|` up to floating tolerance.
    pub fn reflect(&self, p: DVec2, v: DVec2) -> DVec2 {
        let n = self.outward_normal(p);
        v - 2.0 * v.dot(n) * n
    }

    /// Absolute velocity component along the direction `(−b²x, a²y)` at a
    /// wall point: the tangent-speed observable recorded per collision.
    pub fn tangent_speed(&self, p: DVec2, v: DVec2) -> f64 {
        let t = DVec2::new(-self.b * self.b * p.x, self.a * self.a * p.y).normalize_or_zero();
        v.dot(t).abs()
    }
}
