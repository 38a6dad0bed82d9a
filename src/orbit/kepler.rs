//! Analytic Kepler orbit propagator.
//!
//! Orbital progress maps linearly onto the ellipse parameter angle; there is
//! no Kepler-equation solve, so bodies sweep the ellipse at a uniform angular
//! rate instead of speeding up near periapsis.
//!
//! Frame: Y is up and the reference plane is XZ. The parent sits at the
//! focus, which is the origin of the returned position.

use std::f64::consts::TAU;

use bevy::math::{DQuat, DVec3};

use super::elements::OrbitalElements;
use crate::types::{BodyType, DEG_TO_RAD, DEGREES_PER_ROTATION};

/// Position and orientation of a body relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPoint {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Default for OrbitPoint {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

/// Ellipse geometry and plane rotation precomputed from an element set.
/// All angular values in radians.
#[derive(Clone, Copy, Debug)]
pub struct KeplerOrbit {
    /// Semi-major axis
    pub semi_major_axis: f64,
    /// Semi-minor axis
    pub semi_minor_axis: f64,
    /// Centre-to-focus distance
    pub focus_offset: f64,
    /// Rotation taking the orbital plane into the reference frame:
    /// argument of periapsis about the plane normal, then inclination.
    plane: DQuat,
    /// Spin-axis tilt (rotation about Z by minus the axial tilt)
    tilt: DQuat,
    tidally_locked: bool,
}

impl KeplerOrbit {
    pub fn from_elements(elements: &OrbitalElements) -> Self {
        // Negative angles about Y turn in the direction of orbital motion
        let periapsis_turn = DQuat::from_rotation_y(-elements.argument_of_periapsis * DEG_TO_RAD);
        let inclination = DQuat::from_rotation_x(elements.inclination * DEG_TO_RAD);

        Self {
            semi_major_axis: elements.semi_major_axis(),
            semi_minor_axis: elements.semi_minor_axis(),
            focus_offset: elements.linear_eccentricity(),
            plane: inclination * periapsis_turn,
            tilt: DQuat::from_rotation_z(-elements.axial_tilt * DEG_TO_RAD),
            tidally_locked: elements.body_type == BodyType::Satellite,
        }
    }

    /// Point on the ellipse in the orbital plane, before plane rotation.
    ///
    /// Distance from the focus is `a - c·cos θ`, which spans
    /// `[periapsis, apoapsis]`.
    pub fn plane_position(&self, angle: f64) -> DVec3 {
        DVec3::new(
            self.semi_major_axis * angle.cos() - self.focus_offset,
            0.0,
            self.semi_minor_axis * angle.sin(),
        )
    }

    /// Position relative to the parent for a normalized orbit progress.
    pub fn local_position(&self, orbit_progress: f64) -> DVec3 {
        self.plane * self.plane_position(orbit_progress * TAU)
    }

    /// Apparent spin angle in degrees.
    ///
    /// The sidereal component is forced to zero for tidally locked bodies;
    /// the solar day then subtracts the orbital sweep.
    pub fn solar_day_degrees(&self, orbit_progress: f64, rotation_progress: f64) -> f64 {
        let sidereal = if self.tidally_locked {
            0.0
        } else {
            rotation_progress * DEGREES_PER_ROTATION
        };
        sidereal - orbit_progress * DEGREES_PER_ROTATION
    }

    pub fn orientation(&self, orbit_progress: f64, rotation_progress: f64) -> DQuat {
        let solar_day = self.solar_day_degrees(orbit_progress, rotation_progress);
        self.tilt * DQuat::from_rotation_y(solar_day * DEG_TO_RAD)
    }

    pub fn point(&self, orbit_progress: f64, rotation_progress: f64) -> OrbitPoint {
        OrbitPoint {
            position: self.local_position(orbit_progress),
            orientation: self.orientation(orbit_progress, rotation_progress),
        }
    }
}

/// Compute the parent-relative pose of a body.
///
/// Both progress values are normalized to `[0, 1)`. Pure: identical inputs
/// give bit-identical outputs.
pub fn compute_point(
    elements: &OrbitalElements,
    orbit_progress: f64,
    rotation_progress: f64,
) -> OrbitPoint {
    KeplerOrbit::from_elements(elements).point(orbit_progress, rotation_progress)
}
