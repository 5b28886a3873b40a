use std::path::PathBuf;

use orbsim::archive::trajectory::{read_csv, write_csv};
use orbsim::{
    load_csv, load_elements, load_scenario, save_csv, ArchiveError, IntegratorConfig, NVec3, Scenario,
    ScenarioConfig, SimError, Trajectories, DAY, G_SI, M_SUN,
};

fn scenario_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
}

const TWO_PLANETS: &str = r#"
engine:
  integrator: "verlet"
  parallel: true
  log_interval: 10

parameters:
  G: 6.67430e-11
  central_mass: 1.989e30
  num_steps: 20
  dt: 3600.0

central_body: "Sun"

bodies:
  Earth: { semi_major_axis: 1.496e11, eccentricity: 0.0167, mass: 5.972e24 }
  Mars:  { semi_major_axis: 2.279e11, eccentricity: 0.0934, mass: 6.417e23 }
"#;

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn config_parses_full_scenario() {
    let cfg: ScenarioConfig = TWO_PLANETS.parse().unwrap();

    assert_eq!(cfg.engine.integrator, IntegratorConfig::Verlet);
    assert!(cfg.engine.parallel);
    assert_eq!(cfg.engine.log_interval, Some(10));
    assert_eq!(cfg.parameters.num_steps, 20);
    assert_eq!(cfg.parameters.dt, 3600.0);
    assert_eq!(cfg.central_body.as_deref(), Some("Sun"));
    assert_eq!(cfg.bodies.len(), 2);
    assert_eq!(cfg.bodies["Mars"].eccentricity, 0.0934);
}

#[test]
fn config_defaults_missing_sections() {
    let cfg: ScenarioConfig = r#"
bodies:
  Earth: { semi_major_axis: 1.496e11, eccentricity: 0.0167, mass: 5.972e24 }
"#
    .parse()
    .unwrap();

    assert_eq!(cfg.engine.integrator, IntegratorConfig::Rk4);
    assert!(!cfg.engine.parallel);
    assert_eq!(cfg.parameters.G, G_SI);
    assert_eq!(cfg.parameters.central_mass, M_SUN);
    assert_eq!(cfg.parameters.dt, DAY);
    assert_eq!(cfg.parameters.num_steps, 1000);
    assert!(cfg.central_body.is_none());
}

#[test]
fn config_rejects_unknown_integrator() {
    let err = r#"
engine:
  integrator: "euler"
bodies: {}
"#
    .parse::<ScenarioConfig>();
    assert!(err.is_err());
}

#[test]
fn config_loads_bundled_files() {
    let cfg = load_scenario(&scenario_path("solar_system.yaml")).unwrap();
    assert_eq!(cfg.bodies.len(), 8);
    assert_eq!(cfg.central_body.as_deref(), Some("Sun"));

    let elements = load_elements(&scenario_path("orbital_elements.json")).unwrap();
    assert_eq!(elements.len(), 4);
    assert_eq!(elements["Earth"].semi_major_axis, 1.496e11);
}

#[test]
fn config_missing_file_is_io_error() {
    let err = load_scenario(&scenario_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, orbsim::ConfigError::Io(_)));
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_builds_bodies_and_central_mass() {
    let scenario = Scenario::build_scenario(TWO_PLANETS.parse().unwrap()).unwrap();

    assert_eq!(scenario.system.len(), 3);
    assert_eq!(scenario.parameters.num_steps, 20);
    assert_eq!(scenario.engine.integrator, IntegratorConfig::Verlet);

    let sun = scenario.system.get("Sun").unwrap();
    assert_eq!(sun.mass(), M_SUN);
    assert_eq!(sun.x, NVec3::zeros());

    let earth = scenario.system.get("Earth").unwrap();
    assert_eq!(earth.x, NVec3::new(1.496e11 * (1.0 - 0.0167), 0.0, 0.0));
}

#[test]
fn scenario_runs_to_completion() {
    let scenario = Scenario::build_scenario(TWO_PLANETS.parse().unwrap()).unwrap();
    let mut sim = scenario.into_simulation().unwrap();
    sim.run().unwrap();

    let trajectories = sim.into_trajectories();
    assert_eq!(trajectories.len(), 3);
    assert!(trajectories.values().all(|t| t.len() == 20));
}

#[test]
fn scenario_rejects_invalid_inputs() {
    let mut cfg: ScenarioConfig = TWO_PLANETS.parse().unwrap();
    cfg.bodies.get_mut("Mars").unwrap().eccentricity = 1.0;
    assert!(matches!(
        Scenario::build_scenario(cfg).err().unwrap(),
        SimError::InvalidOrbitalElement { body, .. } if body == "Mars"
    ));

    let mut cfg: ScenarioConfig = TWO_PLANETS.parse().unwrap();
    cfg.parameters.num_steps = -3;
    assert!(matches!(
        Scenario::build_scenario(cfg).err().unwrap(),
        SimError::InvalidStepParameters { num_steps: -3, .. }
    ));

    let mut cfg: ScenarioConfig = TWO_PLANETS.parse().unwrap();
    cfg.central_body = Some("Earth".to_string());
    assert_eq!(
        Scenario::build_scenario(cfg).err().unwrap(),
        SimError::DuplicateBody("Earth".to_string())
    );
}

// ==================================================================================
// Archive tests
// ==================================================================================

fn sample_trajectories() -> Trajectories {
    let mut t = Trajectories::new();
    t.insert(
        "Earth".to_string(),
        vec![
            NVec3::new(1.4710e11, 2.5e9, -0.0),
            NVec3::new(1.4709876543210e11, 5.000000000001e9, 1.0e-300),
        ],
    );
    t.insert("Mars".to_string(), vec![NVec3::new(-2.0e11, 0.1, 3.0)]);
    t
}

#[test]
fn archive_round_trips_in_memory() {
    let original = sample_trajectories();
    let mut buf = Vec::new();
    write_csv(&mut buf, &original).unwrap();

    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.starts_with("body,step,x,y,z"));
    assert_eq!(text.lines().count(), 4);

    assert_eq!(read_csv(buf.as_slice()).unwrap(), original);
}

#[test]
fn archive_rejects_out_of_order_rows() {
    let csv = "body,step,x,y,z\nEarth,0,1.0,2.0,3.0\nEarth,2,1.0,2.0,3.0\n";
    let err = read_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::OutOfOrder { expected: 1, found: 2, .. }
    ));
}

#[test]
fn archive_round_trips_through_a_file() {
    let path = std::env::temp_dir().join(format!("orbsim-archive-{}.csv", std::process::id()));
    let original = sample_trajectories();

    save_csv(&path, &original).unwrap();
    let loaded = load_csv(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.unwrap(), original);
}
