//! Orbit path sampling for line rendering.

use bevy::math::DVec3;

use super::elements::OrbitalElements;
use super::kepler::KeplerOrbit;

/// Default number of points in a sampled orbit path.
pub const DEFAULT_PATH_RESOLUTION: usize = 1000;

/// Smallest resolution that still describes a closed loop.
pub const MIN_PATH_RESOLUTION: usize = 3;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("path resolution {0} is below the minimum of 3")]
    ResolutionTooLow(usize),
}

/// Sample a full orbit as `resolution` parent-relative points.
///
/// Point `i` is at progress `i / resolution`, so the loop is closed
/// implicitly: the last point is adjacent to the first and the first is not
/// repeated. Rotation is ignored.
pub fn sample_orbit_path(
    elements: &OrbitalElements,
    resolution: usize,
) -> Result<Vec<DVec3>, PathError> {
    if resolution < MIN_PATH_RESOLUTION {
        return Err(PathError::ResolutionTooLow(resolution));
    }

    let orbit = KeplerOrbit::from_elements(elements);
    let step = 1.0 / resolution as f64;
    Ok((0..resolution)
        .map(|i| orbit.local_position(i as f64 * step))
        .collect())
}
