//! Property-based tests for the Newtonian preview integrator using proptest.

use proptest::prelude::*;

use super::{NewtonianConfig, NewtonianSystem};
use crate::test_utils::fixtures;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// A near-circular equal-mass pair stays bound.
    #[test]
    fn prop_equal_mass_pair_stays_bounded(
        separation in 5.0f64..40.0,
        speed_factor in 0.9f64..1.1,
    ) {
        let speed = fixtures::circular_pair_speed(separation) * speed_factor;
        let mut system = NewtonianSystem::new(
            NewtonianConfig::default(),
            fixtures::pair_with_speed(separation, speed),
        ).unwrap();

        for _ in 0..3000 {
            let report = system.step();
            prop_assert!(report.skipped.is_empty());
            let distance = system.separation(0, 1).unwrap();
            prop_assert!(
                distance > separation * 0.3 && distance < separation * 3.0,
                "separation {} left bounds around {}", distance, separation
            );
        }
    }

    /// Opposite forces keep a mirrored pair mirrored.
    #[test]
    fn prop_mirrored_pair_keeps_centre_of_mass(
        separation in 5.0f64..40.0,
        speed_factor in 0.5f64..1.3,
    ) {
        let speed = fixtures::circular_pair_speed(separation) * speed_factor;
        let mut system = NewtonianSystem::new(
            NewtonianConfig::default(),
            fixtures::pair_with_speed(separation, speed),
        ).unwrap();

        system.run(500);
        let centre = system.body(0).unwrap().position + system.body(1).unwrap().position;
        prop_assert!(centre.length() < 1e-9, "centre drifted to {:?}", centre);
    }

    /// Every state stays finite while bodies stay apart.
    #[test]
    fn prop_state_stays_finite(
        separation in 1.0f64..100.0,
        speed_factor in 0.0f64..3.0,
    ) {
        let speed = fixtures::circular_pair_speed(separation) * speed_factor;
        let mut system = NewtonianSystem::new(
            NewtonianConfig::default(),
            fixtures::pair_with_speed(separation, speed),
        ).unwrap();

        system.run(200);
        for body in system.bodies() {
            prop_assert!(body.position.is_finite());
            prop_assert!(body.velocity.is_finite());
        }
    }
}
