//! Parent-only gravitational acceleration.

use bevy::math::DVec3;

use super::NewtonianConfig;

/// Acceleration of a body toward its parent: `G·m·M / r²`.
///
/// The body's own mass multiplies in, so this is the force magnitude applied
/// as an acceleration. Unguarded: zero separation yields non-finite output.
///
/// # Arguments
/// * `pos` - Body position
/// * `parent_pos` - Parent position
/// * `mass` - Body mass
/// * `parent_mass` - Parent mass
/// * `g` - Gravitational constant
#[inline]
pub fn gravitational_acceleration(
    pos: DVec3,
    parent_pos: DVec3,
    mass: f64,
    parent_mass: f64,
    g: f64,
) -> DVec3 {
    let delta = parent_pos - pos;
    let r_squared = delta.length_squared();
    let direction = delta / r_squared.sqrt();
    direction * (g * mass * parent_mass / r_squared)
}

/// Guarded acceleration: `None` when the separation is under the configured
/// floor or the result is not finite.
#[inline]
pub fn guarded_acceleration(
    pos: DVec3,
    parent_pos: DVec3,
    mass: f64,
    parent_mass: f64,
    config: &NewtonianConfig,
) -> Option<DVec3> {
    let r_squared = (parent_pos - pos).length_squared();
    if r_squared == 0.0 || r_squared < config.min_distance * config.min_distance {
        return None;
    }

    let acc = gravitational_acceleration(
        pos,
        parent_pos,
        mass,
        parent_mass,
        config.gravitational_constant,
    );
    acc.is_finite().then_some(acc)
}
