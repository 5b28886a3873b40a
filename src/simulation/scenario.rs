//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (file-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical and physical parameters (`Parameters`)
//! - system state (`System` with bodies at perihelion, t = 0)
//! - the orbital elements the bodies were derived from

use std::collections::BTreeMap;

use tracing::info;

use crate::configuration::config::ScenarioConfig;

use super::driver::Simulation;
use super::elements::{central_body, derive_initial_state, OrbitalElements};
use super::engine::Engine;
use super::error::{SimError, SimResult};
use super::params::Parameters;
use super::states::System;

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub elements: BTreeMap<String, OrbitalElements>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let num_steps = usize::try_from(p_cfg.num_steps).map_err(|_| SimError::InvalidStepParameters {
            num_steps: p_cfg.num_steps,
            dt: p_cfg.dt,
        })?;
        let parameters = Parameters {
            G: p_cfg.G,
            central_mass: p_cfg.central_mass,
            dt: p_cfg.dt,
            num_steps,
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let engine = Engine::from(&cfg.engine);

        // Bodies: orbital elements -> perihelion state
        let mut bodies = derive_initial_state(&cfg.bodies, &parameters)?;
        if let Some(name) = &cfg.central_body {
            bodies.push(central_body(name, &parameters)?);
        }
        let system = System::new(bodies)?;

        info!(
            bodies = system.len(),
            central_body = cfg.central_body.as_deref().unwrap_or("-"),
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            system,
            elements: cfg.bodies,
        })
    }

    pub fn into_simulation(self) -> SimResult<Simulation> {
        Simulation::with_engine(self.system, self.parameters, self.engine)
    }
}
