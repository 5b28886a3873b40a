//! Numerical and physical parameters for one simulation run
//!
//! `Parameters` is immutable for the duration of a run and is passed
//! explicitly to every component that needs a constant:
//! - gravitational constant and central mass (`G`, `central_mass`),
//! - fixed step size and number of steps (`dt`, `num_steps`)

use super::error::{SimError, SimResult};

/// CODATA 2018 gravitational constant (m^3 kg^-1 s^-2)
pub const G_SI: f64 = 6.67430e-11;

/// Mass of the Sun (kg)
pub const M_SUN: f64 = 1.989e30;

/// One day in seconds, the default step size
pub const DAY: f64 = 86_400.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64,            // gravitational constant
    pub central_mass: f64, // mass used to derive initial velocities (kg)
    pub dt: f64,           // fixed step size (s)
    pub num_steps: usize,  // number of steps in a run
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: G_SI,
            central_mass: M_SUN,
            dt: DAY,
            num_steps: 1000,
        }
    }
}

impl Parameters {
    /// Default constants with the requested step count and size.
    /// `num_steps` is signed so a negative request can be reported as-is.
    pub fn with_steps(num_steps: i64, dt: f64) -> SimResult<Self> {
        check_steps(num_steps, dt)?;
        Ok(Self {
            dt,
            num_steps: num_steps as usize,
            ..Self::default()
        })
    }

    /// Check every field; called by the driver before the first step.
    pub fn validate(&self) -> SimResult<()> {
        check_steps(i64::try_from(self.num_steps).unwrap_or(i64::MAX), self.dt)?;
        if !(self.G.is_finite() && self.G > 0.0) {
            return Err(SimError::InvalidConstant { name: "G", value: self.G });
        }
        if !(self.central_mass.is_finite() && self.central_mass > 0.0) {
            return Err(SimError::InvalidConstant {
                name: "central_mass",
                value: self.central_mass,
            });
        }
        Ok(())
    }

    /// Standard gravitational parameter of the central mass (m^3/s^2)
    pub fn mu(&self) -> f64 {
        self.G * self.central_mass
    }
}

fn check_steps(num_steps: i64, dt: f64) -> SimResult<()> {
    if num_steps <= 0 || !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::InvalidStepParameters { num_steps, dt });
    }
    Ok(())
}
