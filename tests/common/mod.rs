//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::{DQuat, DVec3};
use orrery::newtonian::NewtonianBody;
use orrery::orbit::OrbitalElements;
use orrery::simulation::BodySimulator;
use orrery::time::TimeSystem;
use orrery::types::{BodyType, SECONDS_PER_DAY};

/// Mass giving `G·m² = 1` at the default gravitational constant.
pub const PAIR_MASS: f64 = 100.0;

/// Clock where one real second is one model day.
pub fn day_clock() -> TimeSystem {
    TimeSystem::new(SECONDS_PER_DAY).unwrap()
}

/// Flat circular orbit with a one-hour rotation.
pub fn circular(radius: f64, period_days: f64) -> OrbitalElements {
    OrbitalElements::circular(radius, period_days, 1.0)
}

/// Star, one planet with a tidally locked moon.
pub fn planet_with_moon(planet: OrbitalElements, moon: OrbitalElements) -> BodySimulator {
    BodySimulator::builder()
        .time(day_clock())
        .star("Sun")
        .body("Planet", "Sun", planet)
        .body("Moon", "Planet", moon.with_body_type(BodyType::Satellite))
        .build()
        .unwrap()
}

/// Equal-mass pair on opposite sides of the origin, each the other's parent.
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

/// Tangential speed keeping an equal-mass pair on a circle.
pub fn circular_pair_speed(separation: f64) -> f64 {
    (1.0 / (2.0 * separation)).sqrt()
}

pub fn assert_points_close(actual: DVec3, expected: DVec3, tolerance: f64) {
    let distance = actual.distance(expected);
    assert!(
        distance <= tolerance,
        "Points differ: actual={actual:?}, expected={expected:?}, distance={distance:.6e}"
    );
}

/// Rotations match up to quaternion sign.
pub fn assert_rotations_close(actual: DQuat, expected: DQuat, tolerance: f64) {
    let dot = actual.dot(expected).abs();
    assert!(
        1.0 - dot <= tolerance,
        "Rotations differ: actual={actual:?}, expected={expected:?}"
    );
}
