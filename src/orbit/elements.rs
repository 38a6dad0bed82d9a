//! Orbital element sets and their validation.

use crate::types::BodyType;

/// Configuration errors for a single element set.
///
/// These are raised when a system is built, never at propagation time.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ElementsError {
    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    NegativeDistance { field: &'static str, value: f64 },

    #[error("apoapsis {apoapsis} is below periapsis {periapsis}")]
    ApoapsisBelowPeriapsis { apoapsis: f64, periapsis: f64 },

    #[error("orbital period must be positive, got {0}")]
    NonPositiveOrbitalPeriod(f64),

    #[error("rotation period must be non-zero")]
    ZeroRotationPeriod,

    #[error("argument of periapsis {0} outside [0, 360)")]
    ArgumentOfPeriapsisOutOfRange(f64),

    #[error("axial tilt {0} outside [0, 180]")]
    AxialTiltOutOfRange(f64),
}

/// Static orbital parameters of one body.
///
/// Distances share one arbitrary model unit. Angles are in degrees.
/// `orbital_period` is in days and `rotation_period` in hours; the sign of
/// `rotation_period` encodes spin direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitalElements {
    /// Farthest distance from the parent focus
    pub apoapsis: f64,
    /// Closest distance from the parent focus
    pub periapsis: f64,
    /// In-plane angle from the ascending node to periapsis
    pub argument_of_periapsis: f64,
    pub inclination: f64,
    pub orbital_period: f64,
    pub rotation_period: f64,
    /// Obliquity
    pub axial_tilt: f64,
    pub body_type: BodyType,
}

impl OrbitalElements {
    /// Elements for a root star. Only rotation and tilt are meaningful.
    pub fn star() -> Self {
        Self {
            body_type: BodyType::Star,
            ..Default::default()
        }
    }

    /// A flat circular orbit of `radius` with the given periods.
    pub fn circular(radius: f64, orbital_period: f64, rotation_period: f64) -> Self {
        Self {
            apoapsis: radius,
            periapsis: radius,
            orbital_period,
            rotation_period,
            ..Default::default()
        }
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    pub fn with_argument_of_periapsis(mut self, degrees: f64) -> Self {
        self.argument_of_periapsis = degrees;
        self
    }

    pub fn with_inclination(mut self, degrees: f64) -> Self {
        self.inclination = degrees;
        self
    }

    pub fn with_axial_tilt(mut self, degrees: f64) -> Self {
        self.axial_tilt = degrees;
        self
    }

    /// Check the element set for configuration errors.
    ///
    /// Stars only need finite values and an in-range tilt; they have no orbit.
    pub fn validate(&self) -> Result<(), ElementsError> {
        for (field, value) in [
            ("apoapsis", self.apoapsis),
            ("periapsis", self.periapsis),
            ("argument_of_periapsis", self.argument_of_periapsis),
            ("inclination", self.inclination),
            ("orbital_period", self.orbital_period),
            ("rotation_period", self.rotation_period),
            ("axial_tilt", self.axial_tilt),
        ] {
            if !value.is_finite() {
                return Err(ElementsError::NonFinite { field, value });
            }
        }

        if !(0.0..=180.0).contains(&self.axial_tilt) {
            return Err(ElementsError::AxialTiltOutOfRange(self.axial_tilt));
        }

        if self.body_type.is_root() {
            return Ok(());
        }

        if self.periapsis < 0.0 {
            return Err(ElementsError::NegativeDistance {
                field: "periapsis",
                value: self.periapsis,
            });
        }
        if self.apoapsis < 0.0 {
            return Err(ElementsError::NegativeDistance {
                field: "apoapsis",
                value: self.apoapsis,
            });
        }
        if self.apoapsis < self.periapsis {
            return Err(ElementsError::ApoapsisBelowPeriapsis {
                apoapsis: self.apoapsis,
                periapsis: self.periapsis,
            });
        }
        if self.orbital_period <= 0.0 {
            return Err(ElementsError::NonPositiveOrbitalPeriod(self.orbital_period));
        }
        if self.rotation_period == 0.0 {
            return Err(ElementsError::ZeroRotationPeriod);
        }
        if !(0.0..360.0).contains(&self.argument_of_periapsis) {
            return Err(ElementsError::ArgumentOfPeriapsisOutOfRange(
                self.argument_of_periapsis,
            ));
        }

        Ok(())
    }

    /// Semi-major axis: `(apoapsis + periapsis) / 2`
    pub fn semi_major_axis(&self) -> f64 {
        (self.apoapsis + self.periapsis) / 2.0
    }

    /// Eccentricity, zero for circles and for the degenerate point orbit.
    pub fn eccentricity(&self) -> f64 {
        let sum = self.apoapsis + self.periapsis;
        if sum <= 0.0 {
            return 0.0;
        }
        (self.apoapsis - self.periapsis) / sum
    }

    /// Distance from the ellipse centre to the focus (`a·e`).
    pub fn linear_eccentricity(&self) -> f64 {
        (self.apoapsis - self.periapsis) / 2.0
    }

    /// Semi-minor axis: `√(apoapsis · periapsis)`
    pub fn semi_minor_axis(&self) -> f64 {
        (self.apoapsis * self.periapsis).sqrt()
    }

    /// Ramanujan's approximation of the ellipse perimeter.
    pub fn circumference(&self) -> f64 {
        let a = self.semi_major_axis();
        let b = self.semi_minor_axis();
        if a + b <= 0.0 {
            return 0.0;
        }
        let h = ((a - b) / (a + b)).powi(2);
        std::f64::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
    }
}
