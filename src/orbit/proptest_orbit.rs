//! Property-based tests for orbit geometry using proptest.
//!
//! These tests verify that propagation keeps its geometric guarantees
//! across a wide range of element sets.

use proptest::prelude::*;

use super::elements::OrbitalElements;
use super::kepler::compute_point;
use super::path::sample_orbit_path;
use crate::types::BodyType;

fn elements_strategy() -> impl Strategy<Value = OrbitalElements> {
    (
        0.0f64..5000.0,
        0.0f64..1.0,
        0.0f64..360.0,
        -180.0f64..180.0,
        0.1f64..30000.0,
        prop_oneof![-6000.0f64..-0.1, 0.1f64..6000.0],
        0.0f64..=180.0,
        prop_oneof![
            Just(BodyType::Planet),
            Just(BodyType::Satellite),
            Just(BodyType::Comet)
        ],
    )
        .prop_map(
            |(periapsis, stretch, arg, inclination, period, rotation, tilt, body_type)| {
                OrbitalElements {
                    apoapsis: periapsis * (1.0 + 10.0 * stretch),
                    periapsis,
                    argument_of_periapsis: arg,
                    inclination,
                    orbital_period: period,
                    rotation_period: rotation,
                    axial_tilt: tilt,
                    body_type,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Generated element sets are all valid configurations.
    #[test]
    fn prop_generated_elements_validate(elements in elements_strategy()) {
        prop_assert!(elements.validate().is_ok());
    }

    /// Distance from the focus stays within [periapsis, apoapsis].
    #[test]
    fn prop_distance_within_apsides(
        elements in elements_strategy(),
        progress in 0.0f64..1.0,
        rotation in 0.0f64..1.0,
    ) {
        let point = compute_point(&elements, progress, rotation);
        let distance = point.position.length();
        let tolerance = 1e-9 * elements.apoapsis.max(1.0);

        prop_assert!(
            distance <= elements.apoapsis + tolerance,
            "distance {} above apoapsis {}", distance, elements.apoapsis
        );
        prop_assert!(
            distance >= elements.periapsis - tolerance,
            "distance {} below periapsis {}", distance, elements.periapsis
        );
    }

    /// Identical inputs give bit-identical outputs.
    #[test]
    fn prop_propagation_is_deterministic(
        elements in elements_strategy(),
        progress in 0.0f64..1.0,
        rotation in 0.0f64..1.0,
    ) {
        let a = compute_point(&elements, progress, rotation);
        let b = compute_point(&elements, progress, rotation);
        prop_assert_eq!(a.position.to_array(), b.position.to_array());
        prop_assert_eq!(a.orientation.to_array(), b.orientation.to_array());
    }

    /// Orientation is always a unit quaternion.
    #[test]
    fn prop_orientation_is_normalized(
        elements in elements_strategy(),
        progress in 0.0f64..1.0,
        rotation in 0.0f64..1.0,
    ) {
        let point = compute_point(&elements, progress, rotation);
        prop_assert!((point.orientation.length() - 1.0).abs() < 1e-9);
    }

    /// Satellites ignore the sign of their rotation period.
    #[test]
    fn prop_satellite_spin_ignores_rotation_sign(
        elements in elements_strategy(),
        progress in 0.0f64..1.0,
        rotation in 0.0f64..1.0,
    ) {
        let prograde = OrbitalElements {
            rotation_period: elements.rotation_period.abs(),
            body_type: BodyType::Satellite,
            ..elements
        };
        let retrograde = OrbitalElements {
            rotation_period: -elements.rotation_period.abs(),
            ..prograde
        };
        // Rotation progress advanced by opposite spins ends up mirrored
        let a = compute_point(&prograde, progress, rotation);
        let b = compute_point(&retrograde, progress, 1.0 - rotation);
        prop_assert_eq!(a.orientation.to_array(), b.orientation.to_array());
    }

    /// The sampled loop closes: last and first points are one segment apart.
    #[test]
    fn prop_path_nearly_closes(elements in elements_strategy()) {
        let path = sample_orbit_path(&elements, 1000).unwrap();
        let gap = (path[999] - path[0]).length();
        let circumference = elements.circumference();
        prop_assert!(
            gap <= circumference / 500.0 + 1e-9,
            "gap {} vs circumference {}", gap, circumference
        );
    }
}
