//! Keplerian orbital elements and the perihelion start state derived from them

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::error::{SimError, SimResult};
use super::params::Parameters;
use super::states::{Body, NVec3};

/// Orbital elements of one body around the central mass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (meters)
    pub semi_major_axis: f64,
    /// Eccentricity (dimensionless, 0 = circular)
    pub eccentricity: f64,
    /// Mass of the body (kg)
    pub mass: f64,
}

impl OrbitalElements {
    pub fn new(semi_major_axis: f64, eccentricity: f64, mass: f64) -> Self {
        Self { semi_major_axis, eccentricity, mass }
    }

    /// Reject anything that does not describe a bound orbit of a massive body.
    pub fn validate(&self, name: &str) -> SimResult<()> {
        let reject = |reason: String| {
            Err(SimError::InvalidOrbitalElement {
                body: name.to_string(),
                reason,
            })
        };

        let a = self.semi_major_axis;
        let e = self.eccentricity;
        if !(a.is_finite() && a > 0.0) {
            return reject(format!("semi-major axis must be positive, got {a}"));
        }
        if !(e.is_finite() && (0.0..1.0).contains(&e)) {
            return reject(format!("eccentricity must lie in [0, 1), got {e}"));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return reject(format!("mass must be positive, got {}", self.mass));
        }
        Ok(())
    }

    /// Distance from the central mass at perihelion, r = a(1 - e)
    pub fn perihelion(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Vis-viva speed at perihelion, v = sqrt(GM (2/r - 1/a))
    pub fn perihelion_speed(&self, params: &Parameters) -> f64 {
        let r = self.perihelion();
        (params.mu() * (2.0 / r - 1.0 / self.semi_major_axis)).sqrt()
    }

    /// Orbital period (seconds), T = 2 pi sqrt(a^3 / GM)
    pub fn period(&self, params: &Parameters) -> f64 {
        2.0 * PI * (self.semi_major_axis.powi(3) / params.mu()).sqrt()
    }

    /// Perihelion start state: on +x, moving along +y
    pub fn to_body(&self, name: &str, params: &Parameters) -> SimResult<Body> {
        self.validate(name)?;
        let r = self.perihelion();
        let v = self.perihelion_speed(params);
        Body::new(name, self.mass, NVec3::new(r, 0.0, 0.0), NVec3::new(0.0, v, 0.0))
    }
}

/// One body per named entry, in name order. The first invalid entry aborts
/// the whole derivation.
pub fn derive_initial_state(
    elements: &BTreeMap<String, OrbitalElements>,
    params: &Parameters,
) -> SimResult<Vec<Body>> {
    elements
        .iter()
        .map(|(name, el)| el.to_body(name, params))
        .collect()
}

/// The central mass as a body at rest at the origin
pub fn central_body(name: &str, params: &Parameters) -> SimResult<Body> {
    Body::new(name, params.central_mass, NVec3::zeros(), NVec3::zeros())
}
