//! Shared test fixtures and assertions.

use bevy::math::DVec3;

use crate::newtonian::NewtonianBody;
use crate::orbit::OrbitalElements;

/// Standard test configurations.
pub mod fixtures {
    use super::*;
    use crate::simulation::BodySimulator;
    use crate::time::TimeSystem;
    use crate::types::{BodyType, SECONDS_PER_DAY};

    /// Mass giving `G·m² = 1` at the default gravitational constant.
    pub const PAIR_MASS: f64 = 100.0;

    /// Flat circular orbit with a one-hour rotation.
    pub fn circular(radius: f64, period_days: f64) -> OrbitalElements {
        OrbitalElements::circular(radius, period_days, 1.0)
    }

    /// Clock where one real second is one model day.
    pub fn day_clock() -> TimeSystem {
        TimeSystem::new(SECONDS_PER_DAY).expect("valid tick rate")
    }

    /// Star, one planet and a tidally locked moon.
    pub fn sun_earth_moon() -> BodySimulator {
        BodySimulator::builder()
            .time(day_clock())
            .star("Sun")
            .body("Earth", "Sun", circular(100.0, 365.0).with_axial_tilt(23.4))
            .body(
                "Moon",
                "Earth",
                circular(10.0, 27.3).with_body_type(BodyType::Satellite),
            )
            .build()
            .expect("valid system")
    }

    /// Two equal masses orbiting their common centre on a circle.
    ///
    /// Each body is the other's parent. With `G·m² = 1` the circular speed is
    /// `√(1 / (2·separation))`.
    pub fn equal_mass_pair(separation: f64) -> Vec<NewtonianBody> {
        pair_with_speed(separation, circular_pair_speed(separation))
    }

    /// Equal-mass pair launched with an arbitrary tangential speed.
    pub fn pair_with_speed(separation: f64, speed: f64) -> Vec<NewtonianBody> {
        let half = separation / 2.0;
        vec![
            NewtonianBody::new(
                "left",
                PAIR_MASS,
                DVec3::new(-half, 0.0, 0.0),
                DVec3::new(0.0, 0.0, -speed),
            )
            .with_parent(1),
            NewtonianBody::new(
                "right",
                PAIR_MASS,
                DVec3::new(half, 0.0, 0.0),
                DVec3::new(0.0, 0.0, speed),
            )
            .with_parent(0),
        ]
    }

    pub fn circular_pair_speed(separation: f64) -> f64 {
        (1.0 / (2.0 * separation)).sqrt()
    }
}

/// Assertions for verifying geometric invariants.
pub mod assertions {
    use super::*;

    /// Assert two points coincide within `tolerance`.
    ///
    /// # Panics
    /// Panics if the distance between the points exceeds tolerance.
    pub fn assert_points_close(actual: DVec3, expected: DVec3, tolerance: f64) {
        let distance = actual.distance(expected);
        assert!(
            distance <= tolerance,
            "Points differ: actual={actual:?}, expected={expected:?}, distance={distance:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert a distance from the focus lies within the orbit's apsides.
    ///
    /// # Panics
    /// Panics if the distance is outside `[periapsis, apoapsis]` by more than tolerance.
    pub fn assert_within_apsides(distance: f64, elements: &OrbitalElements, tolerance: f64) {
        assert!(
            distance >= elements.periapsis - tolerance && distance <= elements.apoapsis + tolerance,
            "Distance {distance} outside [{}, {}]",
            elements.periapsis,
            elements.apoapsis
        );
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newtonian::{NewtonianConfig, gravitational_acceleration};
    use approx::assert_relative_eq;

    #[test]
    fn test_pair_mass_normalizes_force() {
        let g = NewtonianConfig::default().gravitational_constant;
        assert_relative_eq!(g * fixtures::PAIR_MASS * fixtures::PAIR_MASS, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pair_speed_is_circular() {
        let bodies = fixtures::equal_mass_pair(10.0);
        let g = NewtonianConfig::default().gravitational_constant;
        let acc = gravitational_acceleration(
            bodies[0].position,
            bodies[1].position,
            bodies[0].mass,
            bodies[1].mass,
            g,
        );
        // v² / r around the centre of mass
        let v = bodies[0].velocity.length();
        assert_relative_eq!(acc.length(), v * v / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sun_earth_moon_builds() {
        let sim = fixtures::sun_earth_moon();
        assert_eq!(sim.len(), 3);
    }

    #[test]
    fn test_assert_within_apsides_accepts_bounds() {
        let elements = OrbitalElements {
            apoapsis: 20.0,
            periapsis: 10.0,
            ..fixtures::circular(0.0, 1.0)
        };
        assertions::assert_within_apsides(10.0, &elements, 0.0);
        assertions::assert_within_apsides(20.0, &elements, 0.0);
        assertions::assert_points_close(DVec3::ONE, DVec3::ONE, 0.0);
    }
}
