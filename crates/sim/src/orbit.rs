//! In-field motion laws and their event-time solvers.
//!
//! An orbit is re-derived from the current state every time the scheduler
//! needs in-field candidates, so a wall bounce inside the field simply
//! produces a fresh orbit from the post-reflection state. Time is always
//! measured from the derivation instant.
//!
//! Two laws are available, dispatched through [`FieldOrbit`]:
//! [`HarmonicOrbit`] (the default, fully closed-form) and [`ParabolicArc`]
//! (constant center-directed acceleration frozen at entry).

use crate::boundary::EllipseBoundary;
use crate::solve::{bisect, first_sign_change};
use crate::EPS_TIME;
use billiard_core::MotionLawKind;
use glam::DVec2;

/// Amplitude below which the particle is effectively at rest relative to the
/// field center and the crossing equation has no isolated root.
const AMPLITUDE_FLOOR: f64 = 1e-12;

/// Sample count for the wall and parabolic-exit bracket scans.
const SCAN_SAMPLES: usize = 1024;

/// Isotropic harmonic motion about the field center.
///
/// With `ω = √gravity` and entry state `(p₀, v₀)`, the closed form is
/// `p(t) = c + A·cos(ωt) + B·sin(ωt)` with `A = p₀ − c` and `B = v₀/ω`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicOrbit {
    center: DVec2,
    omega: f64,
    amp_cos: DVec2,
    amp_sin: DVec2,
}

impl HarmonicOrbit {
    /// Derives the closed-form parameters from an entry state.
    ///
    /// Requires `gravity > 0`; the scheduler never constructs orbits for a
    /// transparent field.
    pub fn from_entry(center: DVec2, gravity: f64, p0: DVec2, v0: DVec2) -> Self {
        let omega = gravity.sqrt();
        Self {
            center,
            omega,
            amp_cos: p0 - center,
            amp_sin: v0 / omega,
        }
    }

    pub fn position_at(&self, t: f64) -> DVec2 {
        let (sin, cos) = (self.omega * t).sin_cos();
        self.center + self.amp_cos * cos + self.amp_sin * sin
    }

    pub fn velocity_at(&self, t: f64) -> DVec2 {
        let (sin, cos) = (self.omega * t).sin_cos();
        (self.amp_sin * cos - self.amp_cos * sin) * self.omega
    }

    /// One full orbital period `2π/ω`.
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.omega
    }

    /// First time the orbit crosses the circle of `radius` about the center.
    ///
    /// Amplitude-phase reduction: the squared center distance is
    /// `D₀ + R·cos(2ωt − φ)`, so crossings solve `R·cos(2ωt − φ) = r² − D₀`.
    /// `None` when the oscillation amplitude vanishes (stuck orbit) or the
    /// orbit never reaches the circle (`|ratio| > 1`).
    pub fn exit_time(&self, radius: f64) -> Option<f64> {
        let p = self.amp_cos.length_squared();
        let s = self.amp_sin.length_squared();
        let q = 2.0 * self.amp_cos.dot(self.amp_sin);
        let d0 = 0.5 * (p + s);
        let d1 = 0.5 * (p - s);
        let d2 = 0.5 * q;
        let r_amp = d1.hypot(d2);
        if r_amp < AMPLITUDE_FLOOR {
            return None;
        }
        let ratio = (radius * radius - d0) / r_amp;
        if ratio.abs() > 1.0 {
            return None;
        }
        let phi = d2.atan2(d1);
        let alpha = ratio.acos();
        let two_omega = 2.0 * self.omega;

        // 2ωt − φ = ±α (mod 2π); take the smallest branch beyond EPS_TIME.
        let mut best: Option<f64> = None;
        for k in 0..3 {
            let shift = std::f64::consts::TAU * k as f64;
            for base in [alpha, -alpha] {
                let t = (base + phi + shift) / two_omega;
                if t > EPS_TIME && best.map_or(true, |b| t < b) {
                    best = Some(t);
                }
            }
        }
        best
    }
}

/// Parabolic flight under a constant acceleration of magnitude `gravity`
/// aimed at the field center, frozen at the derivation instant.
///
/// The alternate `ConstantAccel` motion law. The squared center distance is
/// quartic in `t`, so exit times come from a bounded bracket-and-bisect
/// search rather than a closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParabolicArc {
    center: DVec2,
    p0: DVec2,
    v0: DVec2,
    accel: DVec2,
}

impl ParabolicArc {
    /// Derives the arc from an entry state.
    ///
    /// `None` when the particle sits exactly at the center, where the
    /// acceleration direction is undefined.
    pub fn from_entry(center: DVec2, gravity: f64, p0: DVec2, v0: DVec2) -> Option<Self> {
        let rel = center - p0;
        if rel.length_squared() < AMPLITUDE_FLOOR * AMPLITUDE_FLOOR {
            return None;
        }
        Some(Self {
            center,
            p0,
            v0,
            accel: rel.normalize() * gravity,
        })
    }

    pub fn position_at(&self, t: f64) -> DVec2 {
        self.p0 + self.v0 * t + self.accel * (0.5 * t * t)
    }

    pub fn velocity_at(&self, t: f64) -> DVec2 {
        self.v0 + self.accel * t
    }

    /// Upper bound on the time needed to leave the circle of `radius`.
    ///
    /// The displacement component along the acceleration axis grows as
    /// `½g·t² + (v₀·â)·t`, so the axis coordinate alone exceeds `radius`
    /// once `½g·t² + u·t + (w − r) > 0` with `u = v₀·â`, `w = (p₀−c)·â`.
    pub fn escape_horizon(&self, radius: f64) -> f64 {
        let g = self.accel.length();
        let axis = self.accel / g;
        let u = self.v0.dot(axis);
        let w = (self.p0 - self.center).dot(axis);
        crate::solve::smallest_root_after(0.5 * g, u, w - radius, 0.0)
            .map(|t| t * 1.01 + 1e-6)
            .unwrap_or(1.0)
    }

    /// First time the arc crosses the circle of `radius` about the center.
    ///
    /// A parabola is unbounded, so a crossing always exists; the scan covers
    /// the escape horizon and `None` signals a sampling failure, which the
    /// scheduler treats as a missing candidate.
    pub fn exit_time(&self, radius: f64) -> Option<f64> {
        let f = |t: f64| (self.position_at(t) - self.center).length_squared() - radius * radius;
        let hi = self.escape_horizon(radius);
        let (lo, hi) = first_sign_change(f, EPS_TIME, hi, SCAN_SAMPLES)?;
        Some(bisect(f, lo, hi))
    }
}

/// In-field orbit under the configured motion law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldOrbit {
    Harmonic(HarmonicOrbit),
    Parabolic(ParabolicArc),
}

impl FieldOrbit {
    /// Derives an orbit for the given law from the current in-field state.
    ///
    /// `None` only for the degenerate constant-accel case (particle at the
    /// exact center).
    pub fn from_entry(
        law: MotionLawKind,
        center: DVec2,
        gravity: f64,
        p0: DVec2,
        v0: DVec2,
    ) -> Option<Self> {
        match law {
            MotionLawKind::Harmonic => Some(FieldOrbit::Harmonic(HarmonicOrbit::from_entry(
                center, gravity, p0, v0,
            ))),
            MotionLawKind::ConstantAccel => {
                ParabolicArc::from_entry(center, gravity, p0, v0).map(FieldOrbit::Parabolic)
            }
        }
    }

    pub fn position_at(&self, t: f64) -> DVec2 {
        match self {
            FieldOrbit::Harmonic(o) => o.position_at(t),
            FieldOrbit::Parabolic(o) => o.position_at(t),
        }
    }

    pub fn velocity_at(&self, t: f64) -> DVec2 {
        match self {
            FieldOrbit::Harmonic(o) => o.velocity_at(t),
            FieldOrbit::Parabolic(o) => o.velocity_at(t),
        }
    }

    /// First field-circle crossing; see the per-law solvers.
    pub fn exit_time(&self, radius: f64) -> Option<f64> {
        match self {
            FieldOrbit::Harmonic(o) => o.exit_time(radius),
            FieldOrbit::Parabolic(o) => o.exit_time(radius),
        }
    }

    /// First wall hit while on this orbit, searched over `(EPS_TIME, t_exit]`
    /// when the exit time is known, else over one harmonic period or the
    /// parabolic escape horizon.
    ///
    /// Transcendental (or quartic) in `t`: bracket scan plus bisection, per
    /// the no-closed-form fallback.
    pub fn wall_time(
        &self,
        boundary: &EllipseBoundary,
        t_exit: Option<f64>,
        radius: f64,
    ) -> Option<f64> {
        let horizon = t_exit.unwrap_or_else(|| match self {
            FieldOrbit::Harmonic(o) => o.period(),
            FieldOrbit::Parabolic(o) => o.escape_horizon(radius),
        });
        let f = |t: f64| boundary.incidence(self.position_at(t)) - 1.0;
        let (lo, hi) = first_sign_change(f, EPS_TIME, horizon, SCAN_SAMPLES)?;
        Some(bisect(f, lo, hi))
    }
}
