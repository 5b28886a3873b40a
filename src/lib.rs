pub mod simulation;
pub mod configuration;
pub mod archive;
pub mod benchmark;

pub use simulation::states::{Body, System, Phase, NVec3};
pub use simulation::error::{SimError, SimResult};
pub use simulation::params::{Parameters, G_SI, M_SUN, DAY};
pub use simulation::elements::{OrbitalElements, derive_initial_state, central_body};
pub use simulation::forces::{ForceModel, NewtonianGravity, ParallelNewtonianGravity, evaluate_forces};
pub use simulation::integrator::{rk4_step, verlet_step, integrate_step};
pub use simulation::engine::Engine;
pub use simulation::driver::{Simulation, Trajectories, run_simulation};
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, ScenarioConfig, ConfigError, load_scenario, load_elements};

pub use archive::trajectory::{ArchiveError, save_csv, load_csv};

pub use benchmark::benchmark::{bench_forces, bench_integrators, time_forces};
