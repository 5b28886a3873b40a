//! High-level runtime engine settings
//!
//! Selects the integrator and the force-evaluation strategy used when
//! building and running a `Simulation`

use crate::configuration::config::{EngineConfig, IntegratorConfig};

use super::forces::{ForceModel, NewtonianGravity, ParallelNewtonianGravity};
use super::params::Parameters;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub integrator: IntegratorConfig, // rk4 or verlet
    pub parallel: bool,               // false = serial pair loop, true = rayon per-body sums
    pub log_interval: usize,          // steps between progress lines, 0 = silent
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Rk4,
            parallel: false,
            log_interval: 100,
        }
    }
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            integrator: cfg.integrator,
            parallel: cfg.parallel,
            log_interval: cfg.log_interval.unwrap_or(Self::default().log_interval),
        }
    }
}

impl Engine {
    /// Gravity model bound to the run's gravitational constant
    pub fn force_model(&self, params: &Parameters) -> Box<dyn ForceModel> {
        if self.parallel {
            Box::new(ParallelNewtonianGravity::new(params.G))
        } else {
            Box::new(NewtonianGravity::new(params.G))
        }
    }
}
