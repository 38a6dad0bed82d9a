//! Orrery - Solar System Orbital Mechanics
//!
//! A library crate providing the calendar clock, Keplerian orbit evaluation,
//! hierarchical body propagation and a Newtonian preview integrator.

pub mod newtonian;
pub mod orbit;
pub mod presets;
pub mod simulation;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;
