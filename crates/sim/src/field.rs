//! Circular attraction field: membership test and ballistic entry-time
//! solver.
//!
//! Exit times and in-field wall collisions are the orbit's business
//! (see [`crate::orbit`]); this type only answers questions posed from the
//! free-flight side of the circle.

use crate::solve::smallest_root_after;
use crate::EPS_TIME;
use billiard_core::ModelError;
use glam::DVec2;

/// Circular region around `center` in which the field motion law applies.
///
/// Constructed only when `gravity > 0`; a zero-strength field is transparent
/// and never instantiated (a configuration rule, not a runtime branch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionField {
    center: DVec2,
    radius: f64,
    gravity: f64,
}

impl AttractionField {
    /// Creates a field with the given center, radius, and strength.
    ///
    /// The radius must be positive and finite; the strength strictly
    /// positive (a transparent field is represented by absence, not by
    /// `gravity == 0`).
    pub fn new(center: DVec2, radius: f64, gravity: f64) -> Result<Self, ModelError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ModelError::InvalidRadius(radius));
        }
        if !gravity.is_finite() || gravity <= 0.0 {
            return Err(ModelError::InvalidGravity(gravity));
        }
        if !center.is_finite() {
            return Err(ModelError::NonFinite("field center"));
        }
        Ok(Self {
            center,
            radius,
            gravity,
        })
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// True when the point is inside or on the field circle.
    pub fn contains(&self, p: DVec2) -> bool {
        (p - self.center).length_squared() <= self.radius * self.radius
    }

    /// Time until a ballistic particle at `p` with velocity `v` reaches the
    /// field circle. Valid only while the particle is in free flight.
    ///
    /// Same quadratic shape as the wall solver, in field-centered
    /// coordinates: `A = |v|²`, `B = 2(p−c)·v`, `C = |p−c|² − r²`.
    pub fn entry_time(&self, p: DVec2, v: DVec2) -> Option<f64> {
        let rel = p - self.center;
        let qa = v.length_squared();
        let qb = 2.0 * rel.dot(v);
        let qc = rel.length_squared() - self.radius * self.radius;
        smallest_root_after(qa, qb, qc, EPS_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> AttractionField {
        AttractionField::new(DVec2::ZERO, 0.5, 1.0).unwrap()
    }

    #[test]
    fn new_rejects_bad_radius_and_gravity() {
        assert!(AttractionField::new(DVec2::ZERO, 0.0, 1.0).is_err());
        assert!(AttractionField::new(DVec2::ZERO, -0.5, 1.0).is_err());
        assert!(AttractionField::new(DVec2::ZERO, 0.5, 0.0).is_err());
        assert!(AttractionField::new(DVec2::ZERO, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn contains_center_and_rim() {
        let f = field();
        assert!(f.contains(DVec2::ZERO));
        assert!(f.contains(DVec2::new(0.5, 0.0)));
        assert!(!f.contains(DVec2::new(0.51, 0.0)));
    }

    #[test]
    fn entry_time_head_on() {
        // approaching from (0, 1.5) at unit speed: rim at distance 1
        let f = field();
        let t = f
            .entry_time(DVec2::new(0.0, 1.5), DVec2::new(0.0, -1.0))
            .unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entry_point_lies_on_rim() {
        let f = field();
        let p = DVec2::new(1.2, 0.4);
        let v = DVec2::new(-0.9, -0.3);
        let t = f.entry_time(p, v).unwrap();
        let hit = p + v * t;
        assert!(((hit - f.center()).length() - f.radius()).abs() < 1e-9);
    }

    #[test]
    fn entry_time_none_when_moving_away() {
        let f = field();
        assert!(f
            .entry_time(DVec2::new(1.0, 0.0), DVec2::new(1.0, 0.0))
            .is_none());
    }

    #[test]
    fn entry_time_none_for_miss() {
        let f = field();
        assert!(f
            .entry_time(DVec2::new(-2.0, 1.0), DVec2::new(1.0, 0.0))
            .is_none());
    }

    #[test]
    fn departure_from_rim_is_not_re_detected() {
        // on the rim moving outward: both roots at or below EPS_TIME
        let f = field();
        assert!(f
            .entry_time(DVec2::new(0.5, 0.0), DVec2::new(1.0, 0.0))
            .is_none());
    }

    #[test]
    fn offset_center_entry() {
        let f = AttractionField::new(DVec2::new(1.0, 1.0), 0.25, 2.0).unwrap();
        let t = f
            .entry_time(DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0))
            .unwrap();
        assert!((t - 0.75).abs() < 1e-12);
    }
}
