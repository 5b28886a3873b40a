use orbsim::{load_elements, load_scenario, save_csv, IntegratorConfig, Scenario, ScenarioConfig, DAY};
use orbsim::{bench_forces, bench_integrators};
use orbsim::simulation::diagnostics::{angular_momentum, energy, relative_drift};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orbsim", about = "Fixed-step N-body orbit simulator")]
struct Args {
    /// Scenario file (YAML or JSON)
    #[arg(default_value = "scenarios/solar_system.yaml")]
    file: PathBuf,

    /// The file is a bare `name -> orbital elements` map
    #[arg(long)]
    elements: bool,

    /// Number of steps, overrides the scenario
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    steps: Option<i64>,

    /// Step size in seconds, overrides the scenario
    #[arg(long, allow_negative_numbers = true)]
    dt: Option<f64>,

    #[arg(long, value_enum)]
    integrator: Option<IntegratorConfig>,

    /// Evaluate forces on the rayon pool
    #[arg(long)]
    parallel: bool,

    /// Simulate the central mass as a body with this name
    #[arg(long)]
    central_body: Option<String>,

    /// Trajectory archive
    #[arg(short, long, default_value = "simulation.csv")]
    output: PathBuf,

    /// Print force and integrator timings instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = if args.elements {
        let bodies = load_elements(&args.file)
            .with_context(|| format!("loading orbital elements from {}", args.file.display()))?;
        ScenarioConfig::from_elements(bodies)
    } else {
        load_scenario(&args.file).with_context(|| format!("loading scenario from {}", args.file.display()))?
    };

    if let Some(n) = args.steps {
        cfg.parameters.num_steps = n;
    }
    if let Some(dt) = args.dt {
        cfg.parameters.dt = dt;
    }
    if let Some(integrator) = args.integrator {
        cfg.engine.integrator = integrator;
    }
    if args.parallel {
        cfg.engine.parallel = true;
    }
    if args.central_body.is_some() {
        cfg.central_body = args.central_body.clone();
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_forces()?;
        bench_integrators()?;
        return Ok(());
    }

    let cfg = load_config(&args)?;
    let scenario = Scenario::build_scenario(cfg).context("invalid scenario")?;

    for (name, el) in &scenario.elements {
        info!(
            body = %name,
            perihelion_m = el.perihelion(),
            period_days = el.period(&scenario.parameters) / DAY,
            "orbit"
        );
    }

    let g = scenario.parameters.G;
    let e0 = energy(&scenario.system, g);
    let l0 = angular_momentum(&scenario.system);

    let mut sim = scenario.into_simulation()?;
    sim.run().context("simulation failed")?;

    let sys = sim.system();
    for b in sys.bodies() {
        info!(
            body = b.name(),
            x = b.x.x,
            y = b.x.y,
            z = b.x.z,
            r = b.x.norm(),
            "final position"
        );
    }
    info!(
        energy_drift = relative_drift(e0.total(), energy(sys, g).total()),
        angular_momentum_drift = relative_drift(l0.norm(), angular_momentum(sys).norm()),
        "conservation"
    );

    let trajectories = sim.into_trajectories();
    save_csv(&args.output, &trajectories)
        .with_context(|| format!("writing trajectories to {}", args.output.display()))?;

    Ok(())
}
