//! Newtonian preview mode.
//!
//! A small hierarchy of point masses integrated with semi-implicit Euler.
//! Each body only feels its declared parent. Runs in `FixedUpdate` with its
//! own fixed step, independent of the calendar clock.
//!
//! The integrator is first order; energy drifts and orbits slowly decay or
//! escape depending on the constants. That is acceptable for previews.

mod gravity;

#[cfg(test)]
mod proptest_newtonian;

use bevy::math::DVec3;
use bevy::prelude::*;

pub use gravity::{gravitational_acceleration, guarded_acceleration};

/// Plugin stepping the [`NewtonianSystem`] resource once per fixed update.
pub struct NewtonianPlugin;

impl Plugin for NewtonianPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, newtonian_step);
    }
}

fn newtonian_step(mut system: ResMut<NewtonianSystem>) {
    system.step();
}

/// Integration constants.
#[derive(Clone, Debug, PartialEq)]
pub struct NewtonianConfig {
    /// Default: 1e-4.
    pub gravitational_constant: f64,
    /// Fixed step. Default: 0.1.
    pub time_step: f64,
    /// Separations below this skip the body's update. Default: 1e-3.
    pub min_distance: f64,
}

impl Default for NewtonianConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1e-4,
            time_step: 0.1,
            min_distance: 1e-3,
        }
    }
}

impl NewtonianConfig {
    fn validate(&self) -> Result<(), NewtonianError> {
        if !self.gravitational_constant.is_finite() || self.gravitational_constant < 0.0 {
            return Err(NewtonianError::InvalidConfig {
                field: "gravitational_constant",
                value: self.gravitational_constant,
            });
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(NewtonianError::InvalidConfig {
                field: "time_step",
                value: self.time_step,
            });
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(NewtonianError::InvalidConfig {
                field: "min_distance",
                value: self.min_distance,
            });
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NewtonianError {
    #[error("invalid {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("body {index} has invalid mass {mass}")]
    InvalidMass { index: usize, mass: f64 },

    #[error("body {index} has non-finite initial state")]
    NonFiniteState { index: usize },

    #[error("body {index} references invalid parent {parent}")]
    InvalidParent { index: usize, parent: usize },

    #[error("no body at index {0}")]
    UnknownBody(usize),
}

/// A point mass in the preview system.
#[derive(Clone, Debug)]
pub struct NewtonianBody {
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    pub position: DVec3,
    pub velocity: DVec3,
    /// Only used to pick whose gravity applies.
    pub parent: Option<usize>,
    initial_position: DVec3,
    initial_velocity: DVec3,
}

impl NewtonianBody {
    pub fn new(name: impl Into<String>, mass: f64, position: DVec3, velocity: DVec3) -> Self {
        Self {
            name: name.into(),
            mass,
            radius: 1.0,
            position,
            velocity,
            parent: None,
            initial_position: position,
            initial_velocity: velocity,
        }
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn initial_velocity(&self) -> DVec3 {
        self.initial_velocity
    }
}

/// Outcome of one integration step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Bodies whose state was integrated.
    pub advanced: usize,
    /// Bodies skipped this step because of a degenerate separation.
    pub skipped: Vec<usize>,
}

/// Preview simulation of parent-attracted point masses.
#[derive(Resource, Clone, Debug)]
pub struct NewtonianSystem {
    bodies: Vec<NewtonianBody>,
    config: NewtonianConfig,
    elapsed: f64,
    steps: u64,
}

impl NewtonianSystem {
    pub fn new(config: NewtonianConfig, bodies: Vec<NewtonianBody>) -> Result<Self, NewtonianError> {
        config.validate()?;

        for (index, body) in bodies.iter().enumerate() {
            if !body.mass.is_finite() || body.mass <= 0.0 {
                return Err(NewtonianError::InvalidMass { index, mass: body.mass });
            }
            if !body.position.is_finite() || !body.velocity.is_finite() {
                return Err(NewtonianError::NonFiniteState { index });
            }
            match body.parent {
                Some(parent) if parent == index || parent >= bodies.len() => {
                    return Err(NewtonianError::InvalidParent { index, parent });
                }
                _ => {}
            }
        }

        Ok(Self {
            bodies,
            config,
            elapsed: 0.0,
            steps: 0,
        })
    }

    /// Advance every parented body by one fixed step.
    ///
    /// Parent positions are read from the start of the step, so the update
    /// order of bodies does not matter.
    pub fn step(&mut self) -> StepReport {
        let dt = self.config.time_step;
        let snapshot: Vec<(DVec3, f64)> = self.bodies.iter().map(|b| (b.position, b.mass)).collect();

        let mut report = StepReport::default();
        for (index, body) in self.bodies.iter_mut().enumerate() {
            let Some(parent) = body.parent else {
                continue;
            };
            let Some(&(parent_pos, parent_mass)) = snapshot.get(parent) else {
                warn!("Skipping {}: parent index {} out of range", body.name, parent);
                report.skipped.push(index);
                continue;
            };

            match guarded_acceleration(body.position, parent_pos, body.mass, parent_mass, &self.config) {
                Some(acc) => {
                    // Semi-implicit Euler: position uses the updated velocity
                    body.velocity += acc * dt;
                    body.position += body.velocity * dt;
                    report.advanced += 1;
                }
                None => {
                    warn!(
                        "Skipping {}: separation from parent below {}",
                        body.name, self.config.min_distance
                    );
                    report.skipped.push(index);
                }
            }
        }

        self.elapsed += dt;
        self.steps += 1;
        report
    }

    /// Run `count` steps and return how many body updates were skipped.
    pub fn run(&mut self, count: usize) -> usize {
        (0..count).map(|_| self.step().skipped.len()).sum()
    }

    /// Predicted path of one body around its parent's current position.
    ///
    /// Integrates a copy of the body's state for `iterations` steps with the
    /// parent held still. Returns an empty path for parentless bodies and
    /// stops early if the path runs into the parent.
    pub fn preview_trajectory(
        &self,
        index: usize,
        iterations: usize,
    ) -> Result<Vec<DVec3>, NewtonianError> {
        let body = self.bodies.get(index).ok_or(NewtonianError::UnknownBody(index))?;
        let Some(parent) = body.parent else {
            return Ok(Vec::new());
        };
        let parent = self
            .bodies
            .get(parent)
            .ok_or(NewtonianError::InvalidParent { index, parent })?;
        let dt = self.config.time_step;

        let mut position = body.position;
        let mut velocity = body.velocity;
        let mut points = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let Some(acc) =
                guarded_acceleration(position, parent.position, body.mass, parent.mass, &self.config)
            else {
                break;
            };
            velocity += acc * dt;
            position += velocity * dt;
            points.push(position);
        }

        Ok(points)
    }

    /// Restore every body to its initial position and velocity.
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            body.position = body.initial_position;
            body.velocity = body.initial_velocity;
        }
        self.elapsed = 0.0;
        self.steps = 0;
    }

    pub fn bodies(&self) -> &[NewtonianBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&NewtonianBody> {
        self.bodies.get(index)
    }

    /// Mutable access for placing bodies; the next step integrates from here.
    pub fn body_mut(&mut self, index: usize) -> Option<&mut NewtonianBody> {
        self.bodies.get_mut(index)
    }

    pub fn config(&self) -> &NewtonianConfig {
        &self.config
    }

    /// Simulated time elapsed since creation or reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Distance between two bodies.
    pub fn separation(&self, a: usize, b: usize) -> Option<f64> {
        Some(self.bodies.get(a)?.position.distance(self.bodies.get(b)?.position))
    }
}
