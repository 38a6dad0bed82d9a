//! Core types and constants shared by the orbit propagator, the simulator
//! and the Newtonian preview mode.

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Orbital progress units per full orbit.
///
/// Progress is kept in abstract "day" units regardless of the body's real
/// period, so one orbit is always 365 units.
pub const PROGRESS_PER_ORBIT: f64 = 365.0;

/// Rotation progress units (degrees) per full spin.
pub const DEGREES_PER_ROTATION: f64 = 360.0;

/// Model seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Model seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Model seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Calendar days per year
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Classification of a body, which decides how it is propagated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Orbit root. Never propagated; it is the fixed reference frame.
    Star,
    #[default]
    Planet,
    /// Tidally locked: spin is synchronized with the orbit.
    Satellite,
    Comet,
}

impl BodyType {
    /// Whether this body is exempt from propagation.
    pub fn is_root(&self) -> bool {
        matches!(self, BodyType::Star)
    }

    /// Whether the body's spin is locked to its orbit.
    pub fn is_tidally_locked(&self) -> bool {
        matches!(self, BodyType::Satellite)
    }
}

/// Index of a body inside a [`BodySimulator`](crate::simulation::BodySimulator).
///
/// Ids are assigned in parent-before-child order, so a parent's id is always
/// smaller than its children's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Wrap `value` into `[0, modulus)`.
///
/// Uses the Euclidean remainder so negative steps (retrograde spin) land in
/// range too. A result that rounds up to `modulus` is folded back to zero.
#[inline]
pub fn wrap(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    if wrapped >= modulus { 0.0 } else { wrapped }
}
