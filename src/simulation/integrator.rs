//! Fixed-step time integrators for the N-body system
//!
//! Provides the classical 4th-order Runge–Kutta step over the whole system
//! state and a velocity-Verlet step, both driven by a [`ForceModel`].
//!
//! Every step reads one snapshot of all bodies, evaluates each stage against
//! freshly computed forces, and commits all bodies together at the end. A
//! failing stage leaves the system untouched.

use crate::configuration::config::IntegratorConfig;

use super::engine::Engine;
use super::error::{SimError, SimResult};
use super::forces::{accelerations, Coincident, ForceModel};
use super::params::Parameters;
use super::states::{NVec3, Phase, System};

/// Time derivative of a [`Phase`]: (velocities, accelerations)
#[derive(Debug, Clone)]
struct Derivative {
    dx: Vec<NVec3>,
    dv: Vec<NVec3>,
}

/// state + h * deriv
fn offset(state: &Phase, deriv: &Derivative, h: f64) -> Phase {
    Phase {
        x: state.x.iter().zip(&deriv.dx).map(|(x, dx)| *x + h * *dx).collect(),
        v: state.v.iter().zip(&deriv.dv).map(|(v, dv)| *v + h * *dv).collect(),
    }
}

/// Accelerations at the positions of `state`, from a fresh force evaluation
fn accel_at(sys: &System, forces: &dyn ForceModel, m: &[f64], x: &[NVec3]) -> SimResult<Vec<NVec3>> {
    let f = forces
        .forces(m, x)
        .map_err(|Coincident(i, j)| sys.degenerate(i, j))?;
    Ok(accelerations(&f, m))
}

/// f(state) = (v, a(x))
fn derivative(sys: &System, forces: &dyn ForceModel, m: &[f64], state: &Phase) -> SimResult<Derivative> {
    Ok(Derivative {
        dx: state.v.clone(),
        dv: accel_at(sys, forces, m, &state.x)?,
    })
}

/// Advance the system by one step using classical RK4.
///
/// k1 = f(s)
/// k2 = f(s + dt/2 k1)
/// k3 = f(s + dt/2 k2)
/// k4 = f(s + dt k3)
/// s' = s + dt/6 (k1 + 2 k2 + 2 k3 + k4)
pub fn rk4_step(sys: &mut System, forces: &dyn ForceModel, dt: f64) -> SimResult<()> {
    let m = sys.masses();
    let half_dt = 0.5 * dt;

    let s0 = sys.phase();
    let k1 = derivative(sys, forces, &m, &s0)?;
    let k2 = derivative(sys, forces, &m, &offset(&s0, &k1, half_dt))?;
    let k3 = derivative(sys, forces, &m, &offset(&s0, &k2, half_dt))?;
    let k4 = derivative(sys, forces, &m, &offset(&s0, &k3, dt))?;

    let sixth = dt / 6.0;
    let combine = |y: &[NVec3], a: &[NVec3], b: &[NVec3], c: &[NVec3], d: &[NVec3]| -> Vec<NVec3> {
        (0..y.len())
            .map(|i| y[i] + sixth * (a[i] + 2.0 * b[i] + 2.0 * c[i] + d[i]))
            .collect()
    };

    let next = Phase {
        x: combine(&s0.x, &k1.dx, &k2.dx, &k3.dx, &k4.dx),
        v: combine(&s0.v, &k1.dv, &k2.dv, &k3.dv, &k4.dv),
    };
    sys.commit(next, dt);
    Ok(())
}

/// Advance the system by one step using velocity–Verlet (kick, drift, kick).
/// Two force evaluations per step.
pub fn verlet_step(sys: &mut System, forces: &dyn ForceModel, dt: f64) -> SimResult<()> {
    let m = sys.masses();
    let half_dt = 0.5 * dt;
    let s0 = sys.phase();

    // a_n from x_n
    let a_old = accel_at(sys, forces, &m, &s0.x)?;

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    let v_half: Vec<NVec3> = s0.v.iter().zip(&a_old).map(|(v, a)| *v + half_dt * *a).collect();

    // Drift: x_n+1 = x_n + dt v_n+1/2
    let x_new: Vec<NVec3> = s0.x.iter().zip(&v_half).map(|(x, v)| *x + dt * *v).collect();

    // a_n+1 from x_n+1
    let a_new = accel_at(sys, forces, &m, &x_new)?;

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    let v_new = v_half.iter().zip(&a_new).map(|(v, a)| *v + half_dt * *a).collect();

    sys.commit(Phase { x: x_new, v: v_new }, dt);
    Ok(())
}

/// Advance `sys` by one `params.dt` with the engine's integrator and force model
pub fn integrate_step(sys: &mut System, params: &Parameters, engine: &Engine) -> SimResult<()> {
    if !(params.dt.is_finite() && params.dt > 0.0) {
        return Err(SimError::InvalidStepParameters {
            num_steps: i64::try_from(params.num_steps).unwrap_or(i64::MAX),
            dt: params.dt,
        });
    }
    if !(params.G.is_finite() && params.G > 0.0) {
        return Err(SimError::InvalidConstant { name: "G", value: params.G });
    }
    let forces = engine.force_model(params);
    step_with(engine.integrator, sys, forces.as_ref(), params.dt)
}

pub(crate) fn step_with(
    integrator: IntegratorConfig,
    sys: &mut System,
    forces: &dyn ForceModel,
    dt: f64,
) -> SimResult<()> {
    match integrator {
        IntegratorConfig::Rk4 => rk4_step(sys, forces, dt),
        IntegratorConfig::Verlet => verlet_step(sys, forces, dt),
    }
}
