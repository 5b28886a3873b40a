//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario file is a thin, `serde`-deserializable description of a run:
//!
//! - [`EngineConfig`]     – integrator choice and force-evaluation strategy
//! - [`ParametersConfig`] – physical constants and step parameters
//! - `bodies`             – orbital elements per named body
//! - [`ScenarioConfig`]   – top-level wrapper loaded from the file
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "rk4"       # or "verlet"
//!   parallel: false         # rayon force evaluation
//!
//! parameters:
//!   G: 6.67430e-11          # gravitational constant
//!   central_mass: 1.989e30  # kg, used to derive start velocities
//!   num_steps: 365
//!   dt: 86400.0             # seconds
//!
//! central_body: "Sun"       # optional, simulate the central mass too
//!
//! bodies:
//!   Earth:
//!     semi_major_axis: 1.496e11
//!     eccentricity: 0.0167
//!     mass: 5.972e24
//! ```
//!
//! `engine`, `parameters` and every field inside them are optional. JSON is a
//! subset of YAML, so a plain `orbital_elements.json` with only the bodies map
//! at the top level loads through [`load_elements`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::elements::OrbitalElements;
use crate::simulation::params::{DAY, G_SI, M_SUN};

/// Errors raised while reading a scenario file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Which integrator the engine uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IntegratorConfig {
    #[serde(rename = "rk4")] // Classical 4th-order Runge–Kutta over the whole system, four force evaluations per step
    #[default]
    Rk4,

    #[serde(rename = "verlet")] // Velocity Verlet. Symplectic, two force evaluations per step
    Verlet,
}

/// Engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // time integrator
    #[serde(default)]
    pub parallel: bool, // `true` - evaluate per-body force sums on the rayon pool
    pub log_interval: Option<usize>, // steps between progress log lines
}

/// Physical constants and step parameters
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_central_mass")]
    pub central_mass: f64, // kg
    #[serde(default = "default_num_steps")]
    pub num_steps: i64, // signed so a negative request is reported, not wrapped
    #[serde(default = "default_dt")]
    pub dt: f64, // seconds
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: default_g(),
            central_mass: default_central_mass(),
            num_steps: default_num_steps(),
            dt: default_dt(),
        }
    }
}

fn default_g() -> f64 {
    G_SI
}

fn default_central_mass() -> f64 {
    M_SUN
}

fn default_num_steps() -> i64 {
    1000
}

fn default_dt() -> f64 {
    DAY
}

/// Top-level scenario configuration
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub central_body: Option<String>, // name of the central mass when it is simulated as a body
    pub bodies: BTreeMap<String, OrbitalElements>, // orbital elements per body
}

impl ScenarioConfig {
    /// Scenario with default engine and parameters around the given bodies
    pub fn from_elements(bodies: BTreeMap<String, OrbitalElements>) -> Self {
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            central_body: None,
            bodies,
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }
}

impl std::str::FromStr for ScenarioConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_yaml::from_str(s)?)
    }
}

/// Load a full scenario file
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, ConfigError> {
    let file = File::open(path)?;
    ScenarioConfig::from_reader(BufReader::new(file))
}

/// Load a bare `name -> elements` map (the `orbital_elements.json` layout)
pub fn load_elements(path: &Path) -> Result<BTreeMap<String, OrbitalElements>, ConfigError> {
    let file = File::open(path)?;
    Ok(serde_yaml::from_reader(BufReader::new(file))?)
}
