//! Hierarchical body simulator.
//!
//! Bodies live in an arena sorted parent-before-child at build time, so a
//! single forward pass always sees a parent's current world position before
//! propagating its children.

use std::collections::{HashMap, VecDeque};

use bevy::log::{debug, info};
use bevy::math::DVec3;
use bevy::prelude::Resource;

use super::body::{Body, BodyPhase};
use crate::orbit::{ElementsError, OrbitalElements, PathError, sample_orbit_path};
use crate::time::{TimeError, TimeSystem, TimeTicks};
use crate::types::BodyId;

/// Errors from building or controlling a simulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid orbital elements for {body}: {source}")]
    InvalidElements {
        body: String,
        #[source]
        source: ElementsError,
    },

    #[error("duplicate body name {0}")]
    DuplicateBody(String),

    #[error("body {0} has no parent and is not a star")]
    MissingParent(String),

    #[error("body {body} references unknown parent {parent}")]
    UnknownParent { body: String, parent: String },

    #[error("star {0} cannot have a parent")]
    StarWithParent(String),

    #[error("parent chain of {0} forms a cycle")]
    Cycle(String),

    #[error("system has no root star")]
    NoRoot,

    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    #[error("body {0} has no orbit")]
    NoOrbit(String),

    #[error("scrub value {0} outside [0, 1]")]
    InvalidScrub(f64),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Input description of one body, before parent names are resolved.
#[derive(Clone, Debug)]
pub struct BodySpec {
    pub name: String,
    pub parent: Option<String>,
    pub elements: OrbitalElements,
    pub radius: f64,
    /// World position for fixed bodies; ignored for orbiting ones.
    pub position: DVec3,
}

impl BodySpec {
    pub fn new(name: impl Into<String>, elements: OrbitalElements) -> Self {
        Self {
            name: name.into(),
            parent: None,
            elements,
            radius: 1.0,
            position: DVec3::ZERO,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }
}

/// Collects body descriptions and builds a validated, sorted simulator.
#[derive(Clone, Debug, Default)]
pub struct SystemBuilder {
    specs: Vec<BodySpec>,
    time: TimeSystem,
}

impl SystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root star at the origin.
    pub fn star(self, name: impl Into<String>) -> Self {
        self.add(BodySpec::new(name, OrbitalElements::star()))
    }

    /// Add a body orbiting `parent`.
    pub fn body(
        self,
        name: impl Into<String>,
        parent: impl Into<String>,
        elements: OrbitalElements,
    ) -> Self {
        self.add(BodySpec::new(name, elements).with_parent(parent))
    }

    pub fn add(mut self, spec: BodySpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn time(mut self, time: TimeSystem) -> Self {
        self.time = time;
        self
    }

    /// Validate every body, resolve parents and sort parent-before-child.
    pub fn build(self) -> Result<BodySimulator, SimulationError> {
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(self.specs.len());
        for (i, spec) in self.specs.iter().enumerate() {
            if index_of.insert(spec.name.as_str(), i).is_some() {
                return Err(SimulationError::DuplicateBody(spec.name.clone()));
            }
            spec.elements
                .validate()
                .map_err(|source| SimulationError::InvalidElements {
                    body: spec.name.clone(),
                    source,
                })?;
        }

        // Resolve parent names to input indices
        let mut parents: Vec<Option<usize>> = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let is_star = spec.elements.body_type.is_root();
            let parent = match (&spec.parent, is_star) {
                (Some(_), true) => return Err(SimulationError::StarWithParent(spec.name.clone())),
                (None, true) => None,
                (None, false) => return Err(SimulationError::MissingParent(spec.name.clone())),
                (Some(parent), false) => match index_of.get(parent.as_str()) {
                    Some(&p) => Some(p),
                    None => {
                        return Err(SimulationError::UnknownParent {
                            body: spec.name.clone(),
                            parent: parent.clone(),
                        });
                    }
                },
            };
            parents.push(parent);
        }

        if !parents.iter().any(Option::is_none) {
            return Err(SimulationError::NoRoot);
        }

        let order = topological_order(&parents)
            .map_err(|stuck| SimulationError::Cycle(self.specs[stuck].name.clone()))?;

        let mut new_id = vec![BodyId(0); self.specs.len()];
        for (position, &input) in order.iter().enumerate() {
            new_id[input] = BodyId(position);
        }

        let mut specs: Vec<Option<BodySpec>> = self.specs.into_iter().map(Some).collect();
        let mut bodies = Vec::with_capacity(order.len());
        let mut names = HashMap::with_capacity(order.len());
        for &input in &order {
            let Some(spec) = specs[input].take() else {
                continue;
            };
            let id = new_id[input];
            let parent = parents[input].map(|p| new_id[p]);
            names.insert(spec.name.clone(), id);
            bodies.push(Body::new(
                id,
                spec.name,
                spec.elements,
                parent,
                spec.radius,
                spec.position,
            ));
        }

        let stars = bodies.iter().filter(|b: &&Body| b.is_fixed()).count();
        info!(
            "Built system with {} bodies ({} fixed)",
            bodies.len(),
            stars
        );

        Ok(BodySimulator {
            bodies,
            names,
            time: self.time,
            simulated: true,
            system_scrub: 0.0,
        })
    }
}

/// Breadth-first order from the roots. Returns the input index of a body
/// that could not be reached when the parent links contain a cycle.
fn topological_order(parents: &[Option<usize>]) -> Result<Vec<usize>, usize> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    let mut queue = VecDeque::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => queue.push_back(i),
        }
    }

    let mut order = Vec::with_capacity(parents.len());
    while let Some(i) = queue.pop_front() {
        order.push(i);
        queue.extend(children[i].iter().copied());
    }

    if order.len() < parents.len() {
        let mut visited = vec![false; parents.len()];
        for &i in &order {
            visited[i] = true;
        }
        let stuck = visited.iter().position(|v| !v).unwrap_or(0);
        return Err(stuck);
    }

    Ok(order)
}

/// Owns every body and the clock that drives them.
///
/// Single owner of all [`BodyState`](super::BodyState); nothing else mutates
/// progress counters.
#[derive(Resource, Clone, Debug)]
pub struct BodySimulator {
    bodies: Vec<Body>,
    names: HashMap<String, BodyId>,
    time: TimeSystem,
    /// When false, ticks still advance the clock but bodies hold still.
    simulated: bool,
    /// Last system-wide scrub value applied.
    system_scrub: f64,
}

impl BodySimulator {
    pub fn builder() -> SystemBuilder {
        SystemBuilder::new()
    }

    /// Advance the clock by one frame and propagate every orbiting body.
    pub fn tick(&mut self, dt: f64) -> Result<TimeTicks, SimulationError> {
        let ticks = self.time.advance(dt)?;
        if !self.simulated {
            return Ok(ticks);
        }

        for index in 0..self.bodies.len() {
            let body = &mut self.bodies[index];
            if body.is_fixed() {
                continue;
            }
            body.state.advance(&body.elements, &ticks);
            self.propagate(index);
        }

        Ok(ticks)
    }

    /// Re-derive every pose from the current progress without advancing time.
    pub fn recompute(&mut self) {
        for index in 0..self.bodies.len() {
            self.propagate(index);
        }
    }

    /// Force one body to a normalized phase in `[0, 1]` and recompute it and
    /// its descendants. Fixed bodies ignore the call.
    pub fn scrub(&mut self, id: BodyId, scrub: f64) -> Result<(), SimulationError> {
        validate_scrub(scrub)?;
        let body = self
            .bodies
            .get_mut(id.index())
            .ok_or(SimulationError::UnknownBody(id))?;
        if body.is_fixed() {
            return Ok(());
        }

        debug!("Scrub {} to {}", body.name, scrub);
        body.state.scrub(&body.elements, scrub);

        let mut dirty = vec![false; self.bodies.len()];
        dirty[id.index()] = true;
        self.propagate(id.index());
        for index in id.index() + 1..self.bodies.len() {
            let parent_dirty = self.bodies[index]
                .parent
                .is_some_and(|parent| dirty[parent.index()]);
            if parent_dirty {
                dirty[index] = true;
                self.propagate(index);
            }
        }

        Ok(())
    }

    /// Apply one scrub value to every body and remember it as the system scrub.
    pub fn scrub_all(&mut self, scrub: f64) -> Result<(), SimulationError> {
        validate_scrub(scrub)?;
        debug!("Scrub system to {}", scrub);
        self.system_scrub = scrub;
        for body in self.bodies.iter_mut().filter(|b| !b.is_fixed()) {
            body.state.scrub(&body.elements, scrub);
        }
        self.recompute();
        Ok(())
    }

    /// Propagate the body at `index` against its parent's current position.
    ///
    /// Parents always precede children in the arena.
    fn propagate(&mut self, index: usize) {
        let body = &self.bodies[index];
        if body.is_fixed() {
            return;
        }
        let Some(parent) = body.parent else {
            return;
        };
        let parent_position = self.bodies[parent.index()].world_position;
        self.bodies[index].apply_pose(parent_position);
    }

    /// Orbit path of a body translated to its parent's current position.
    pub fn orbit_path(&self, id: BodyId, resolution: usize) -> Result<Vec<DVec3>, SimulationError> {
        let body = self.body(id).ok_or(SimulationError::UnknownBody(id))?;
        let parent = match (body.is_fixed(), body.parent) {
            (false, Some(parent)) => parent,
            _ => return Err(SimulationError::NoOrbit(body.name.clone())),
        };
        let origin = self.bodies[parent.index()].world_position;
        let path = sample_orbit_path(&body.elements, resolution)?;
        Ok(path.into_iter().map(|point| origin + point).collect())
    }

    pub fn set_simulated(&mut self, simulated: bool) {
        if self.simulated != simulated {
            info!("Simulation {}", if simulated { "running" } else { "paused" });
        }
        self.simulated = simulated;
    }

    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    pub fn system_scrub(&self) -> f64 {
        self.system_scrub
    }

    /// Change the clock rate. Applies from the next tick.
    pub fn set_tick_rate(&mut self, tick_rate: f64) -> Result<(), SimulationError> {
        self.time.set_tick_rate(tick_rate)?;
        Ok(())
    }

    pub fn time(&self) -> &TimeSystem {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeSystem {
        &mut self.time
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.id_of(name).and_then(|id| self.body(id))
    }

    /// Direct children of a body, in arena order.
    pub fn children(&self, id: BodyId) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.parent == Some(id))
    }

    /// Number of bodies that have been propagated at least once.
    pub fn orbiting_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|b| b.phase == BodyPhase::Orbiting)
            .count()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn validate_scrub(scrub: f64) -> Result<(), SimulationError> {
    if !(0.0..=1.0).contains(&scrub) {
        return Err(SimulationError::InvalidScrub(scrub));
    }
    Ok(())
}
