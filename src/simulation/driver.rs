//! Simulation driver: steps the integrator a fixed number of times and
//! records every body's position after each completed step.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::engine::Engine;
use super::error::{SimError, SimResult};
use super::forces::ForceModel;
use super::integrator::step_with;
use super::params::Parameters;
use super::states::{Body, NVec3, System};

/// Upper bound on per-body history reserved up front
const HISTORY_PREALLOC: usize = 4096;

/// Position history per body name, one entry per completed step
pub type Trajectories = BTreeMap<String, Vec<NVec3>>;

pub struct Simulation {
    system: System,
    params: Parameters,
    engine: Engine,
    forces: Box<dyn ForceModel>,
    history: Vec<Vec<NVec3>>, // index-aligned with `system.bodies()`
    steps_taken: usize,
}

impl Simulation {
    /// Simulation with the default engine (serial RK4)
    pub fn new(system: System, params: Parameters) -> SimResult<Self> {
        Self::with_engine(system, params, Engine::default())
    }

    pub fn with_engine(system: System, params: Parameters, engine: Engine) -> SimResult<Self> {
        params.validate()?;
        if system.is_empty() {
            return Err(SimError::EmptySystem);
        }

        let forces = engine.force_model(&params);
        let history = (0..system.len())
            .map(|_| Vec::with_capacity(params.num_steps.min(HISTORY_PREALLOC)))
            .collect();

        Ok(Self {
            system,
            params,
            engine,
            forces,
            history,
            steps_taken: 0,
        })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn remaining_steps(&self) -> usize {
        self.params.num_steps.saturating_sub(self.steps_taken)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_steps() == 0
    }

    /// Advance one step and append the new positions. Returns `Ok(false)`
    /// without touching anything once all `num_steps` steps are taken.
    /// On error nothing is recorded and the system keeps its pre-step state.
    pub fn step(&mut self) -> SimResult<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        step_with(self.engine.integrator, &mut self.system, self.forces.as_ref(), self.params.dt)?;

        for (track, b) in self.history.iter_mut().zip(self.system.bodies()) {
            track.push(b.x);
        }
        self.steps_taken += 1;

        let every = self.engine.log_interval;
        if every > 0 && self.steps_taken % every == 0 {
            debug!(step = self.steps_taken, t = self.system.t, "integration progress");
        }
        Ok(true)
    }

    /// Run every remaining step
    pub fn run(&mut self) -> SimResult<()> {
        info!(
            bodies = self.system.len(),
            steps = self.remaining_steps(),
            dt = self.params.dt,
            integrator = ?self.engine.integrator,
            parallel = self.engine.parallel,
            "starting run"
        );
        while self.step()? {}
        info!(t = self.system.t, "run complete");
        Ok(())
    }

    /// Hand the recorded positions to the caller, keyed by body name
    pub fn into_trajectories(self) -> Trajectories {
        self.system
            .bodies()
            .iter()
            .map(|b| b.name().to_string())
            .zip(self.history)
            .collect()
    }
}

/// Run `num_steps` RK4 steps of size `dt` from the given bodies using the
/// default constants. Returns the complete trajectories or an error, never a
/// partial result.
pub fn run_simulation(bodies: Vec<Body>, num_steps: i64, dt: f64) -> SimResult<Trajectories> {
    let params = Parameters::with_steps(num_steps, dt)?;
    let system = System::new(bodies)?;
    let mut sim = Simulation::new(system, params)?;
    sim.run()?;
    Ok(sim.into_trajectories())
}
