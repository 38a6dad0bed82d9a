//! Per-body simulation state.

use bevy::math::{DQuat, DVec3};

use crate::orbit::{KeplerOrbit, OrbitPoint, OrbitalElements};
use crate::time::TimeTicks;
use crate::types::{BodyId, BodyType, DEGREES_PER_ROTATION, PROGRESS_PER_ORBIT, wrap};

/// Lifecycle of a body inside the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyPhase {
    /// Root star: never propagated.
    Fixed,
    /// Added but not yet propagated; the world pose is not valid yet.
    Uninitialized,
    /// Propagated at least once.
    Orbiting,
}

/// Mutable progress counters of one body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyState {
    /// Orbit phase in `[0, 365)`; 365 units is one orbit whatever the period.
    pub orbital_progress: f64,
    /// Spin phase in degrees, `[0, 360)`.
    pub rotation_progress: f64,
    /// Whole orbits completed. Never decreases.
    pub complete_orbits: u64,
    /// Fractional lifetime orbit count. Never wraps.
    pub raw_orbits: f64,
    /// Orbit phase accumulated from elapsed time only; scrubs leave it alone.
    lap_progress: f64,
}

impl BodyState {
    /// Orbit progress normalized to `[0, 1)`.
    pub fn normalized_orbit(&self) -> f64 {
        self.orbital_progress / PROGRESS_PER_ORBIT
    }

    /// Rotation progress normalized to `[0, 1)`.
    pub fn normalized_rotation(&self) -> f64 {
        self.rotation_progress / DEGREES_PER_ROTATION
    }

    /// Advance both counters by one frame of ticks.
    ///
    /// Spin uses the negated rotation period, so a positive period turns the
    /// progress counter backwards. That sign flip is the spin-direction
    /// convention the orientation math expects.
    pub(crate) fn advance(&mut self, elements: &OrbitalElements, ticks: &TimeTicks) {
        let orbit_step = (PROGRESS_PER_ORBIT / elements.orbital_period) * ticks.year;
        let rotation_step = (DEGREES_PER_ROTATION / -elements.rotation_period) * ticks.day;

        self.orbital_progress = wrap(self.orbital_progress + orbit_step, PROGRESS_PER_ORBIT);
        self.rotation_progress = wrap(
            self.rotation_progress + rotation_step,
            DEGREES_PER_ROTATION,
        );

        // Laps are counted from the same wrap the progress goes through, so
        // both counters flip on the same tick.
        let unwrapped = self.lap_progress + orbit_step;
        self.lap_progress = wrap(unwrapped, PROGRESS_PER_ORBIT);
        let laps = ((unwrapped - self.lap_progress) / PROGRESS_PER_ORBIT).round();
        self.complete_orbits += laps.max(0.0) as u64;
        self.raw_orbits = self.complete_orbits as f64 + self.lap_progress / PROGRESS_PER_ORBIT;
    }

    /// Jump straight to a normalized scrub position in `[0, 1]`.
    ///
    /// Lifetime counters are left alone.
    pub(crate) fn scrub(&mut self, elements: &OrbitalElements, scrub: f64) {
        self.orbital_progress = wrap(scrub * PROGRESS_PER_ORBIT, PROGRESS_PER_ORBIT);
        self.rotation_progress = wrap(
            scrub * elements.rotation_period * DEGREES_PER_ROTATION,
            DEGREES_PER_ROTATION,
        );
    }
}

/// A body in the simulated hierarchy.
#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) name: String,
    pub(crate) elements: OrbitalElements,
    pub(crate) orbit: KeplerOrbit,
    pub(crate) parent: Option<BodyId>,
    /// Display radius, in the same unit as the orbit distances
    pub(crate) radius: f64,
    pub(crate) state: BodyState,
    pub(crate) phase: BodyPhase,
    pub(crate) local: OrbitPoint,
    pub(crate) world_position: DVec3,
    pub(crate) world_orientation: DQuat,
}

impl Body {
    pub(crate) fn new(
        id: BodyId,
        name: String,
        elements: OrbitalElements,
        parent: Option<BodyId>,
        radius: f64,
        position: DVec3,
    ) -> Self {
        let phase = if elements.body_type.is_root() || parent.is_none() {
            BodyPhase::Fixed
        } else {
            BodyPhase::Uninitialized
        };

        Self {
            id,
            name,
            orbit: KeplerOrbit::from_elements(&elements),
            elements,
            parent,
            radius,
            state: BodyState::default(),
            phase,
            local: OrbitPoint::default(),
            world_position: position,
            world_orientation: DQuat::IDENTITY,
        }
    }

    /// Recompute the pose from the current progress and the parent's
    /// current world position.
    pub(crate) fn apply_pose(&mut self, parent_position: DVec3) {
        self.local = self.orbit.point(
            self.state.normalized_orbit(),
            self.state.normalized_rotation(),
        );
        self.world_position = parent_position + self.local.position;
        self.world_orientation = self.local.orientation;
        self.phase = BodyPhase::Orbiting;
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body_type(&self) -> BodyType {
        self.elements.body_type
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn phase(&self) -> BodyPhase {
        self.phase
    }

    /// Whether this body is exempt from propagation.
    pub fn is_fixed(&self) -> bool {
        self.phase == BodyPhase::Fixed
    }

    /// Pose relative to the parent, as of the last propagation.
    pub fn local_point(&self) -> &OrbitPoint {
        &self.local
    }

    pub fn world_position(&self) -> DVec3 {
        self.world_position
    }

    pub fn world_orientation(&self) -> DQuat {
        self.world_orientation
    }

    pub fn complete_orbits(&self) -> u64 {
        self.state.complete_orbits
    }

    pub fn raw_orbits(&self) -> f64 {
        self.state.raw_orbits
    }
}
