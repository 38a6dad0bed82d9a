//! Orbit geometry: element sets, the Kepler propagator and path sampling.
//!
//! Everything here is pure. State lives in [`crate::simulation`].

pub mod elements;
pub mod kepler;
pub mod path;

#[cfg(test)]
mod proptest_orbit;

pub use elements::{ElementsError, OrbitalElements};
pub use kepler::{KeplerOrbit, OrbitPoint, compute_point};
pub use path::{DEFAULT_PATH_RESOLUTION, MIN_PATH_RESOLUTION, PathError, sample_orbit_path};
