//! Built-in body data.
//! Source: NASA planetary fact sheets, with argument of periapsis from
//! J2000 mean elements.

use crate::orbit::OrbitalElements;
use crate::simulation::{BodySimulator, BodySpec, SimulationError};
use crate::time::TimeSystem;
use crate::types::BodyType;

/// Scale applied to fact-sheet distances (10⁶ km) to reach model units.
pub const DISTANCE_SCALAR: f64 = 10.0;

/// Fact-sheet diameter (km) to display radius divisor.
const DIAMETER_TO_RADIUS: f64 = 400.0 * 2.0;

/// One row of a planetary fact sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct FactSheetRecord {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub body_type: BodyType,
    /// km
    pub diameter: f64,
    /// hours; negative for retrograde spin
    pub rotation_period: f64,
    /// 10⁶ km
    pub perihelion: f64,
    /// 10⁶ km
    pub aphelion: f64,
    /// days
    pub orbital_period: f64,
    /// degrees
    pub orbital_inclination: f64,
    /// degrees
    pub obliquity_to_orbit: f64,
    /// degrees
    pub argument_of_periapsis: f64,
}

impl FactSheetRecord {
    /// Convert to model-unit orbital elements.
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements {
            apoapsis: self.aphelion * DISTANCE_SCALAR,
            periapsis: self.perihelion * DISTANCE_SCALAR,
            argument_of_periapsis: self.argument_of_periapsis,
            inclination: self.orbital_inclination,
            orbital_period: self.orbital_period,
            rotation_period: self.rotation_period,
            axial_tilt: self.obliquity_to_orbit,
            body_type: self.body_type,
        }
    }

    /// Display radius in model units.
    pub fn radius(&self) -> f64 {
        self.diameter / DIAMETER_TO_RADIUS
    }

    pub fn to_spec(&self) -> BodySpec {
        let spec = BodySpec::new(self.name, self.elements()).with_radius(self.radius());
        match self.parent {
            Some(parent) => spec.with_parent(parent),
            None => spec,
        }
    }
}

/// Sun, the four inner planets, Jupiter, the Moon and Halley's comet.
pub fn inner_solar_system() -> Vec<FactSheetRecord> {
    vec![
        FactSheetRecord {
            name: "Sun",
            parent: None,
            body_type: BodyType::Star,
            diameter: 1_392_700.0,
            rotation_period: 609.12,
            perihelion: 0.0,
            aphelion: 0.0,
            orbital_period: 0.0,
            orbital_inclination: 0.0,
            obliquity_to_orbit: 7.25,
            argument_of_periapsis: 0.0,
        },
        FactSheetRecord {
            name: "Mercury",
            parent: Some("Sun"),
            body_type: BodyType::Planet,
            diameter: 4879.0,
            rotation_period: 1407.6,
            perihelion: 46.0,
            aphelion: 69.8,
            orbital_period: 88.0,
            orbital_inclination: 7.0,
            obliquity_to_orbit: 0.034,
            argument_of_periapsis: 29.12,
        },
        FactSheetRecord {
            name: "Venus",
            parent: Some("Sun"),
            body_type: BodyType::Planet,
            diameter: 12_104.0,
            rotation_period: -5832.5,
            perihelion: 107.5,
            aphelion: 108.9,
            orbital_period: 224.7,
            orbital_inclination: 3.4,
            obliquity_to_orbit: 177.4,
            argument_of_periapsis: 54.88,
        },
        FactSheetRecord {
            name: "Earth",
            parent: Some("Sun"),
            body_type: BodyType::Planet,
            diameter: 12_756.0,
            rotation_period: 23.9,
            perihelion: 147.1,
            aphelion: 152.1,
            orbital_period: 365.2,
            orbital_inclination: 0.0,
            obliquity_to_orbit: 23.4,
            argument_of_periapsis: 114.21,
        },
        FactSheetRecord {
            name: "Moon",
            parent: Some("Earth"),
            body_type: BodyType::Satellite,
            diameter: 3475.0,
            rotation_period: 655.7,
            perihelion: 0.363,
            aphelion: 0.406,
            orbital_period: 27.3,
            orbital_inclination: 5.1,
            obliquity_to_orbit: 6.7,
            argument_of_periapsis: 318.15,
        },
        FactSheetRecord {
            name: "Mars",
            parent: Some("Sun"),
            body_type: BodyType::Planet,
            diameter: 6792.0,
            rotation_period: 24.6,
            perihelion: 206.7,
            aphelion: 249.3,
            orbital_period: 687.0,
            orbital_inclination: 1.8,
            obliquity_to_orbit: 25.2,
            argument_of_periapsis: 286.5,
        },
        FactSheetRecord {
            name: "Jupiter",
            parent: Some("Sun"),
            body_type: BodyType::Planet,
            diameter: 142_984.0,
            rotation_period: 9.9,
            perihelion: 740.6,
            aphelion: 816.4,
            orbital_period: 4331.0,
            orbital_inclination: 1.3,
            obliquity_to_orbit: 3.1,
            argument_of_periapsis: 273.87,
        },
        FactSheetRecord {
            name: "Halley",
            parent: Some("Sun"),
            body_type: BodyType::Comet,
            diameter: 11.0,
            rotation_period: 52.8,
            perihelion: 87.7,
            aphelion: 5250.0,
            orbital_period: 27_510.0,
            orbital_inclination: 162.3,
            obliquity_to_orbit: 0.0,
            argument_of_periapsis: 111.33,
        },
    ]
}

/// Build a simulator from fact-sheet records.
pub fn build_system(
    records: &[FactSheetRecord],
    time: TimeSystem,
) -> Result<BodySimulator, SimulationError> {
    records
        .iter()
        .fold(BodySimulator::builder().time(time), |builder, record| {
            builder.add(record.to_spec())
        })
        .build()
}
