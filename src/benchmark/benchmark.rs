use std::time::Instant;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::error::SimResult;
use crate::simulation::forces::{Coincident, ForceModel, NewtonianGravity, ParallelNewtonianGravity};
use crate::simulation::integrator::{rk4_step, verlet_step};
use crate::simulation::params::{G_SI, M_SUN};
use crate::simulation::states::{Body, NVec3, System};

/// Deterministic ring-ish system of `n` planets, no rand needed
fn make_system(n: usize) -> SimResult<System> {
    let mut bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let r = 1.0e11 * (1.0 + 0.1 * i_f);
            let x = NVec3::new(
                r * (i_f * 0.37).cos(),
                r * (i_f * 0.37).sin(),
                1.0e9 * (i_f * 0.07).sin(),
            );
            let v = NVec3::new(-(i_f * 0.37).sin(), (i_f * 0.37).cos(), 0.0) * 3.0e4;
            Body::new(format!("body{i:04}"), 6.0e24, x, v)
        })
        .collect::<SimResult<Vec<_>>>()?;
    bodies.push(Body::new("sun", M_SUN, NVec3::zeros(), NVec3::zeros())?);
    System::new(bodies)
}

/// Seconds for one serial and one parallel force evaluation of `sys`, after a warm-up
pub fn time_forces(sys: &System, g: f64) -> SimResult<(f64, f64)> {
    let m = sys.masses();
    let x = sys.positions();

    let direct = NewtonianGravity::new(g);
    let parallel = ParallelNewtonianGravity::new(g);
    let degenerate = |Coincident(i, j)| sys.degenerate(i, j);

    // Warm up
    direct.forces(&m, &x).map_err(degenerate)?;
    parallel.forces(&m, &x).map_err(degenerate)?;

    let t0 = Instant::now();
    direct.forces(&m, &x).map_err(degenerate)?;
    let dt_direct = t0.elapsed().as_secs_f64();

    let t1 = Instant::now();
    parallel.forces(&m, &x).map_err(degenerate)?;
    let dt_par = t1.elapsed().as_secs_f64();

    Ok((dt_direct, dt_par))
}

/// Time one force evaluation, serial pair loop against rayon per-body sums
pub fn bench_forces() -> SimResult<()> {
    for n in [8, 16, 32, 64, 128, 256] {
        let (dt_direct, dt_par) = time_forces(&make_system(n)?, G_SI)?;
        println!("N = {n:4}, serial = {:10.3} us, parallel = {:10.3} us", dt_direct * 1e6, dt_par * 1e6);
    }
    Ok(())
}

/// Per-step cost of each integrator with serial forces.
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrators() -> SimResult<()> {
    let steps = 50;
    let dt = 3600.0;
    let force = NewtonianGravity::new(G_SI);

    println!("N,rk4_us,verlet_us");
    for n in [4, 8, 16, 32, 64] {
        let mut per_step = [0.0; 2];
        for (slot, kind) in [IntegratorConfig::Rk4, IntegratorConfig::Verlet].into_iter().enumerate() {
            let mut sys = make_system(n)?;
            let t0 = Instant::now();
            for _ in 0..steps {
                match kind {
                    IntegratorConfig::Rk4 => rk4_step(&mut sys, &force, dt)?,
                    IntegratorConfig::Verlet => verlet_step(&mut sys, &force, dt)?,
                }
            }
            per_step[slot] = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;
        }
        println!("{},{:.3},{:.3}", n, per_step[0], per_step[1]);
    }
    Ok(())
}
