//! Reproducible specification for a batch of billiard trajectories.
//!
//! A [`Scenario`] captures everything needed to recreate a run: boundary
//! semi-axes, attraction-field parameters, the motion law active inside the
//! field, the list of launches, and the per-trajectory event budget. Two
//! identical `Scenario` values fed to the same driver binary produce
//! identical trajectories.

use crate::error::ModelError;
use crate::params::{param_f64, param_str, param_usize};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default boundary semi-major axis.
pub const DEFAULT_SEMI_MAJOR: f64 = 2.0;
/// Default boundary semi-minor axis.
pub const DEFAULT_SEMI_MINOR: f64 = 1.0;
/// Default attraction-field radius.
pub const DEFAULT_FIELD_RADIUS: f64 = 0.5;
/// Default field strength; zero makes the field ballistically transparent.
pub const DEFAULT_GRAVITY: f64 = 0.0;
/// Default per-trajectory event budget.
pub const DEFAULT_MAX_EVENTS: usize = 1000;

/// All recognized motion-law names.
const LAW_NAMES: &[&str] = &["harmonic", "constant-accel"];

/// Motion law applied while the particle is inside the attraction field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionLawKind {
    /// Isotropic harmonic attractor (exact closed form). The default.
    #[default]
    Harmonic,
    /// Constant center-directed acceleration, frozen at field entry.
    ConstantAccel,
}

impl MotionLawKind {
    /// Parses a law by name.
    ///
    /// Returns `ModelError::UnknownMotionLaw` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, ModelError> {
        match name {
            "harmonic" => Ok(MotionLawKind::Harmonic),
            "constant-accel" => Ok(MotionLawKind::ConstantAccel),
            other => Err(ModelError::UnknownMotionLaw(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MotionLawKind::Harmonic => "harmonic",
            MotionLawKind::ConstantAccel => "constant-accel",
        }
    }

    /// Returns a slice of all recognized law names.
    pub fn list_names() -> &'static [&'static str] {
        LAW_NAMES
    }
}

/// Boundary and field parameters, immutable for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    /// Boundary semi-major axis (along x).
    pub a: f64,
    /// Boundary semi-minor axis (along y).
    pub b: f64,
    /// Attraction-field center.
    pub center: DVec2,
    /// Attraction-field radius.
    pub radius: f64,
    /// Field strength: angular-frequency-squared of the harmonic law, or the
    /// acceleration magnitude of the constant-accel law. Zero disables the
    /// field entirely.
    pub gravity: f64,
    /// Motion law active inside the field.
    pub law: MotionLawKind,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            a: DEFAULT_SEMI_MAJOR,
            b: DEFAULT_SEMI_MINOR,
            center: DVec2::ZERO,
            radius: DEFAULT_FIELD_RADIUS,
            gravity: DEFAULT_GRAVITY,
            law: MotionLawKind::default(),
        }
    }
}

impl WorldParams {
    /// Extracts parameters from a loose JSON object, falling back to
    /// defaults for missing numeric keys.
    ///
    /// Recognized keys: `a`, `b`, `center_x`, `center_y`, `radius`,
    /// `gravity`, `law`. Fails only on an unrecognized `law` name.
    pub fn from_json(params: &Value) -> Result<Self, ModelError> {
        let law = MotionLawKind::from_name(&param_str(
            params,
            "law",
            MotionLawKind::default().name(),
        ))?;
        Ok(Self {
            a: param_f64(params, "a", DEFAULT_SEMI_MAJOR),
            b: param_f64(params, "b", DEFAULT_SEMI_MINOR),
            center: DVec2::new(
                param_f64(params, "center_x", 0.0),
                param_f64(params, "center_y", 0.0),
            ),
            radius: param_f64(params, "radius", DEFAULT_FIELD_RADIUS),
            gravity: param_f64(params, "gravity", DEFAULT_GRAVITY),
            law,
        })
    }

    /// True when the field influences motion at all.
    pub fn field_active(&self) -> bool {
        self.gravity > 0.0
    }

    /// Validates geometric sanity: positive finite semi-axes and radius,
    /// non-negative finite gravity, finite center.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.a.is_finite() && self.b.is_finite()) || self.a <= 0.0 || self.b <= 0.0 {
            return Err(ModelError::InvalidSemiAxes {
                a: self.a,
                b: self.b,
            });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ModelError::InvalidRadius(self.radius));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ModelError::InvalidGravity(self.gravity));
        }
        if !self.center.is_finite() {
            return Err(ModelError::NonFinite("field center"));
        }
        Ok(())
    }
}

/// One initial condition: a launch point and a launch angle.
///
/// The initial speed is always 1; the launch angle fixes the direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub position: DVec2,
    pub angle: f64,
}

impl Launch {
    pub fn new(position: DVec2, angle: f64) -> Self {
        Self { position, angle }
    }

    /// Unit velocity vector `(cos θ, sin θ)`.
    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin())
    }
}

/// Full run specification: world, launches, and event budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub world: WorldParams,
    pub launches: Vec<Launch>,
    pub max_events: usize,
}

impl Scenario {
    /// Creates a scenario with the default event budget and no launches.
    pub fn new(world: WorldParams) -> Self {
        Self {
            world,
            launches: Vec::new(),
            max_events: DEFAULT_MAX_EVENTS,
        }
    }

    /// Builds a launch-less scenario from a loose JSON object: the world keys
    /// of [`WorldParams::from_json`] plus `max_events`.
    pub fn from_json(params: &Value) -> Result<Self, ModelError> {
        let mut scenario = Scenario::new(WorldParams::from_json(params)?);
        scenario.max_events = param_usize(params, "max_events", DEFAULT_MAX_EVENTS);
        Ok(scenario)
    }

    /// Validates the world and every launch.
    ///
    /// Launch positions must lie inside (or on) the boundary; angles must be
    /// finite. An empty launch list is rejected.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.world.validate()?;
        if self.launches.is_empty() {
            return Err(ModelError::NoLaunches);
        }
        for launch in &self.launches {
            if !launch.position.is_finite() {
                return Err(ModelError::NonFinite("launch position"));
            }
            if !launch.angle.is_finite() {
                return Err(ModelError::NonFinite("launch angle"));
            }
            let p = launch.position;
            let incidence =
                p.x * p.x / (self.world.a * self.world.a) + p.y * p.y / (self.world.b * self.world.b);
            if incidence > 1.0 + 1e-9 {
                return Err(ModelError::StartOutsideBoundary { x: p.x, y: p.y });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_world_has_transparent_field() {
        let w = WorldParams::default();
        assert!(!w.field_active());
        assert!(w.validate().is_ok());
    }

    #[test]
    fn from_json_uses_defaults_for_empty_object() {
        let w = WorldParams::from_json(&json!({})).unwrap();
        assert_eq!(w, WorldParams::default());
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let w = WorldParams::from_json(&json!({
            "a": 4.0,
            "b": 2.0,
            "center_x": 0.5,
            "center_y": -0.5,
            "radius": 0.75,
            "gravity": 1.0,
            "law": "constant-accel",
        }))
        .unwrap();
        assert!((w.a - 4.0).abs() < f64::EPSILON);
        assert!((w.b - 2.0).abs() < f64::EPSILON);
        assert!((w.center.x - 0.5).abs() < f64::EPSILON);
        assert!((w.center.y + 0.5).abs() < f64::EPSILON);
        assert!((w.radius - 0.75).abs() < f64::EPSILON);
        assert!(w.field_active());
        assert_eq!(w.law, MotionLawKind::ConstantAccel);
    }

    #[test]
    fn scenario_from_json_reads_max_events() {
        let s = Scenario::from_json(&json!({"gravity": 1.0, "max_events": 250})).unwrap();
        assert_eq!(s.max_events, 250);
        assert!(s.world.field_active());
        assert!(s.launches.is_empty());
    }

    #[test]
    fn scenario_from_json_defaults_max_events() {
        let s = Scenario::from_json(&json!({})).unwrap();
        assert_eq!(s.max_events, DEFAULT_MAX_EVENTS);
    }

    #[test]
    fn from_json_rejects_unknown_law() {
        let result = WorldParams::from_json(&json!({"law": "magnetic"}));
        assert!(matches!(result, Err(ModelError::UnknownMotionLaw(_))));
    }

    #[test]
    fn law_from_name_round_trips() {
        for name in MotionLawKind::list_names() {
            let law = MotionLawKind::from_name(name).unwrap();
            assert_eq!(law.name(), *name);
        }
    }

    #[test]
    fn law_list_includes_harmonic() {
        assert!(MotionLawKind::list_names().contains(&"harmonic"));
    }

    #[test]
    fn launch_velocity_is_unit_length() {
        let l = Launch::new(DVec2::new(0.0, 1.5), std::f64::consts::FRAC_PI_3);
        assert!((l.velocity().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn launch_velocity_matches_angle() {
        let l = Launch::new(DVec2::ZERO, std::f64::consts::FRAC_PI_2);
        let v = l.velocity();
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_non_positive_axes() {
        let w = WorldParams {
            a: 0.0,
            ..WorldParams::default()
        };
        assert!(matches!(
            w.validate(),
            Err(ModelError::InvalidSemiAxes { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_gravity() {
        let w = WorldParams {
            gravity: -1.0,
            ..WorldParams::default()
        };
        assert!(matches!(w.validate(), Err(ModelError::InvalidGravity(_))));
    }

    #[test]
    fn validate_rejects_nan_radius() {
        let w = WorldParams {
            radius: f64::NAN,
            ..WorldParams::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn scenario_validate_rejects_empty_launches() {
        let s = Scenario::new(WorldParams::default());
        assert!(matches!(s.validate(), Err(ModelError::NoLaunches)));
    }

    #[test]
    fn scenario_validate_rejects_launch_outside_boundary() {
        let mut s = Scenario::new(WorldParams::default());
        s.launches.push(Launch::new(DVec2::new(3.0, 0.0), 0.0));
        assert!(matches!(
            s.validate(),
            Err(ModelError::StartOutsideBoundary { .. })
        ));
    }

    #[test]
    fn scenario_validate_accepts_launch_on_boundary() {
        let mut s = Scenario::new(WorldParams::default());
        s.launches.push(Launch::new(DVec2::new(2.0, 0.0), 0.0));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn json_round_trip_with_defaults() {
        let mut s = Scenario::new(WorldParams::default());
        s.launches.push(Launch::new(DVec2::new(0.0, 0.5), 1.0));
        let json = serde_json::to_string(&s).unwrap();
        let restored: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn json_round_trip_with_custom_world() {
        let world = WorldParams {
            a: 4.0,
            b: 2.0,
            center: DVec2::new(0.0, 0.0),
            radius: 0.5,
            gravity: 1.0,
            law: MotionLawKind::ConstantAccel,
        };
        let mut s = Scenario::new(world);
        s.launches.push(Launch::new(DVec2::new(1.5, 0.5), 0.25));
        s.max_events = 64;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn law_serializes_kebab_case() {
        let v = serde_json::to_value(MotionLawKind::ConstantAccel).unwrap();
        assert_eq!(v, json!("constant-accel"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scenario_json_round_trips(
                a in 0.5_f64..10.0,
                b in 0.5_f64..10.0,
                radius in 0.1_f64..2.0,
                gravity in 0.0_f64..5.0,
                px in -0.4_f64..0.4,
                py in -0.4_f64..0.4,
                angle in 0.0_f64..std::f64::consts::TAU,
                max_events in 1_usize..5000,
            ) {
                let world = WorldParams {
                    a,
                    b,
                    center: DVec2::ZERO,
                    radius,
                    gravity,
                    law: MotionLawKind::Harmonic,
                };
                let mut s = Scenario::new(world);
                s.launches.push(Launch::new(DVec2::new(px, py), angle));
                s.max_events = max_events;
                let json = serde_json::to_string(&s).unwrap();
                let restored: Scenario = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(s, restored);
            }

            #[test]
            fn positive_world_parameters_always_validate(
                a in 0.1_f64..50.0,
                b in 0.1_f64..50.0,
                radius in 0.01_f64..10.0,
                gravity in 0.0_f64..100.0,
            ) {
                let world = WorldParams {
                    a,
                    b,
                    center: DVec2::ZERO,
                    radius,
                    gravity,
                    law: MotionLawKind::default(),
                };
                prop_assert!(world.validate().is_ok());
            }
        }
    }
}
