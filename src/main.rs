//! Orrery - Solar System Orbital Mechanics
//!
//! Headless runner advancing the built-in solar system and logging orbit
//! completions.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use orrery::presets::{build_system, inner_solar_system};
use orrery::simulation::{SimulationError, SimulationPlugin};
use orrery::time::TimeSystem;
use orrery::types::SECONDS_PER_DAY;

fn main() {
    // One real second per model day
    let simulator = match TimeSystem::new(SECONDS_PER_DAY)
        .map_err(SimulationError::from)
        .and_then(|time| build_system(&inner_solar_system(), time))
    {
        Ok(simulator) => simulator,
        Err(err) => {
            eprintln!("Failed to build solar system: {err}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        // Insert resources before plugins that depend on them
        .insert_resource(simulator)
        .add_plugins(SimulationPlugin)
        .run();
}
