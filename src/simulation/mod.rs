//! Hierarchical body simulation driven once per frame.
//!
//! The [`BodySimulator`] resource must be inserted before adding
//! [`SimulationPlugin`].

mod body;
mod simulator;

use bevy::prelude::*;

pub use body::{Body, BodyPhase, BodyState};
pub use simulator::{BodySimulator, BodySpec, SimulationError, SystemBuilder};

/// Plugin advancing the [`BodySimulator`] from bevy's frame clock.
///
/// Adds systems for:
/// - Clock advance and propagation
/// - Re-applying the system scrub when time settings change while paused
/// - Logging orbit completions
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                advance_simulation,
                rescrub_on_time_change,
                report_completed_orbits,
            )
                .chain(),
        );
    }
}

/// Advance the simulation by the real-world frame delta.
fn advance_simulation(mut simulator: ResMut<BodySimulator>, time: Res<Time>) {
    let dt = time.delta_secs_f64();
    if let Err(err) = simulator.tick(dt) {
        warn!("Skipped simulation tick: {}", err);
    }
}

/// While paused, re-pose every body from the system scrub whenever the time
/// configuration revision moves.
fn rescrub_on_time_change(mut simulator: ResMut<BodySimulator>, mut seen: Local<u64>) {
    let revision = simulator.time().revision();
    if revision == *seen {
        return;
    }
    *seen = revision;

    if simulator.is_simulated() {
        return;
    }
    let scrub = simulator.system_scrub();
    if let Err(err) = simulator.scrub_all(scrub) {
        warn!("Failed to re-apply system scrub: {}", err);
    }
}

/// Log each body's newly completed orbits.
fn report_completed_orbits(simulator: Res<BodySimulator>, mut seen: Local<Vec<u64>>) {
    seen.resize(simulator.len(), 0);
    for (body, last) in simulator.bodies().iter().zip(seen.iter_mut()) {
        let orbits = body.complete_orbits();
        if orbits > *last {
            info!("{} completed orbit {}", body.name(), orbits);
            *last = orbits;
        }
    }
}
