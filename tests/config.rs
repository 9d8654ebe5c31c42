use std::io::Write;

use orbital_salvage_planner::config::{
    BodyConfig, ConfigError, SpacecraftConfig, WormholeConfig, load_engine_config,
};
use orbital_salvage_planner::entities::{CelestialBody, Motion, Spacecraft, WormHole};

const WORLD_YAML: &str = r#"
world:
  bodies:
    - type: stationary
      id: 0
      mass: 1.0e20
      radius: 2.0
      position: [5.0, 0.0]
    - type: trajectory
      id: 1
      mass: 5.0e20
      radius: 1.0
      a: 10.0
      b: 5.0
      omega: 0.5
      phi: 0.0
      angle: 0.0
      center: [0.0, 0.0]
  wormholes:
    - id: 0
      entry: [-3.0, 0.0]
      exit: [20.0, 0.0]
      t_open: 0.0
      t_close: 100.0
  artifacts:
    - id: 0
      position: [1.0, 0.0]
  max_radius: 100.0
time:
  tmax_u: 50.0
  dt_u: 1.0
quantization:
  pos_bin: 0.5
  vel_bin: 0.5
  time_bin: 0.5
  fuel_bin: 1.0
spacecraft:
  mass: 1.0
  max_fuel: 100.0
  thrust_levels: [0.0, 10.0]
  exhaust_speed: 50.0
  possible_directions: [0.0, 1.5707963267948966]
initial_state:
  position: [0.0, 0.0]
  velocity: [1.0, 0.0]
  fuel: 100.0
k: 1
"#;

const WORLD_TOML: &str = r#"
k = 1

[world]
max_radius = 100.0

[[world.bodies]]
type = "stationary"
id = 0
mass = 1.0e20
radius = 2.0
position = [5.0, 0.0]

[[world.bodies]]
type = "trajectory"
id = 1
mass = 5.0e20
radius = 1.0
a = 10.0
b = 5.0
omega = 0.5
phi = 0.0
angle = 0.0
center = [0.0, 0.0]

[[world.wormholes]]
id = 0
entry = [-3.0, 0.0]
exit = [20.0, 0.0]
t_open = 0.0
t_close = 100.0

[[world.artifacts]]
id = 0
position = [1.0, 0.0]

[time]
tmax_u = 50.0
dt_u = 1.0

[quantization]
pos_bin = 0.5
vel_bin = 0.5
time_bin = 0.5
fuel_bin = 1.0

[spacecraft]
mass = 1.0
max_fuel = 100.0
thrust_levels = [0.0, 10.0]
exhaust_speed = 50.0
possible_directions = [0.0, 1.5707963267948966]

[initial_state]
position = [0.0, 0.0]
velocity = [1.0, 0.0]
fuel = 100.0
"#;

fn write_temp(contents: &str, extension: &str) -> tempfile::TempPath {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write contents");
    file.into_temp_path()
}

#[test]
fn yaml_and_toml_world_files_load_identically() {
    let yaml_path = write_temp(WORLD_YAML, "yaml");
    let toml_path = write_temp(WORLD_TOML, "toml");

    let from_yaml = load_engine_config(&yaml_path).expect("yaml loads");
    let from_toml = load_engine_config(&toml_path).expect("toml loads");

    assert_eq!(from_yaml.k, from_toml.k);
    assert_eq!(from_yaml.world.bodies.len(), from_toml.world.bodies.len());
    assert_eq!(from_yaml.world.max_radius, from_toml.world.max_radius);
    assert_eq!(from_yaml.time.dt_u, from_toml.time.dt_u);
    assert_eq!(
        from_yaml.spacecraft.thrust_levels,
        from_toml.spacecraft.thrust_levels
    );

    // Defaults apply when the manifest is silent.
    assert_eq!(from_yaml.world.capture_radius, 1e-12);
    assert_eq!(from_yaml.world.trajectory_sample_delta, 1e-3);

    let world = from_yaml.world.build().expect("world builds");
    assert_eq!(world.bodies().len(), 2);
    assert_eq!(world.wormholes().len(), 1);
    assert_eq!(world.artifacts().len(), 1);
}

#[test]
fn unknown_extensions_are_rejected() {
    let path = write_temp(WORLD_YAML, "cfg");
    assert!(matches!(
        load_engine_config(&path),
        Err(ConfigError::UnknownFormat)
    ));
}

#[test]
fn body_validation_rejects_bad_scalars() {
    let no_mass = BodyConfig::Stationary {
        id: 3,
        mass: 0.0,
        radius: 1.0,
        position: [0.0, 0.0],
    };
    assert!(matches!(
        CelestialBody::try_from(&no_mass),
        Err(ConfigError::InvalidMass { id: 3, .. })
    ));

    let flat = BodyConfig::Stationary {
        id: 4,
        mass: 1.0,
        radius: -1.0,
        position: [0.0, 0.0],
    };
    assert!(matches!(
        CelestialBody::try_from(&flat),
        Err(ConfigError::InvalidBodyRadius { id: 4, .. })
    ));

    let degenerate = BodyConfig::Trajectory {
        id: 5,
        mass: 1.0,
        radius: 1.0,
        a: 10.0,
        b: 0.0,
        omega: 0.5,
        phi: 0.0,
        angle: 0.0,
        center: [0.0, 0.0],
    };
    assert!(matches!(
        CelestialBody::try_from(&degenerate),
        Err(ConfigError::InvalidOrbit { id: 5, .. })
    ));
}

#[test]
fn orbit_angles_normalize_into_one_turn() {
    let config = BodyConfig::Trajectory {
        id: 0,
        mass: 1.0,
        radius: 1.0,
        a: 10.0,
        b: 5.0,
        omega: 0.5,
        phi: 0.0,
        angle: 7.0,
        center: [0.0, 0.0],
    };
    let body = CelestialBody::try_from(&config).expect("valid body");
    match body.motion {
        Motion::Orbit(orbit) => {
            assert!(orbit.tilt >= 0.0);
            assert!(orbit.tilt < std::f64::consts::TAU);
        }
        Motion::Fixed(_) => panic!("expected an orbit"),
    }
}

#[test]
fn inverted_wormhole_windows_are_rejected() {
    let config = WormholeConfig {
        id: 8,
        entry: [0.0, 0.0],
        exit: [1.0, 1.0],
        t_open: 5.0,
        t_close: 2.0,
    };
    assert!(matches!(
        WormHole::try_from(&config),
        Err(ConfigError::InvertedWindow { id: 8, .. })
    ));
}

fn craft_config() -> SpacecraftConfig {
    SpacecraftConfig {
        mass: 1.0,
        max_fuel: 100.0,
        min_fuel_to_land: 0.0,
        thrust_levels: vec![0.0, 10.0],
        exhaust_speed: 50.0,
        possible_directions: vec![0.0],
        initial_position: None,
        initial_velocity: None,
    }
}

#[test]
fn spacecraft_validation_covers_the_thrust_table() {
    let mut empty = craft_config();
    empty.thrust_levels.clear();
    assert!(matches!(
        Spacecraft::try_from(&empty),
        Err(ConfigError::EmptyThrustTable)
    ));

    let mut reverse = craft_config();
    reverse.thrust_levels = vec![10.0, -1.0];
    assert!(matches!(
        Spacecraft::try_from(&reverse),
        Err(ConfigError::NegativeThrust(level)) if level == -1.0
    ));

    let mut weightless = craft_config();
    weightless.mass = 0.0;
    assert!(matches!(
        Spacecraft::try_from(&weightless),
        Err(ConfigError::InvalidSpacecraftMass(_))
    ));

    let mut no_exhaust = craft_config();
    no_exhaust.exhaust_speed = 0.0;
    assert!(matches!(
        Spacecraft::try_from(&no_exhaust),
        Err(ConfigError::InvalidExhaustVelocity(_))
    ));

    let mut greedy_margin = craft_config();
    greedy_margin.min_fuel_to_land = 200.0;
    assert!(matches!(
        Spacecraft::try_from(&greedy_margin),
        Err(ConfigError::InvalidLandingMargin { .. })
    ));
}

#[test]
fn duplicate_entity_ids_are_rejected() {
    let yaml_path = write_temp(WORLD_YAML, "yaml");
    let mut config = load_engine_config(&yaml_path).expect("yaml loads");
    let duplicate = config.world.artifacts[0].clone();
    config.world.artifacts.push(duplicate);
    assert!(matches!(
        config.world.build(),
        Err(ConfigError::DuplicateId {
            kind: "artifact",
            id: 0
        })
    ));
}

#[test]
fn non_positive_tuning_parameters_are_rejected() {
    let yaml_path = write_temp(WORLD_YAML, "yaml");
    let mut config = load_engine_config(&yaml_path).expect("yaml loads");
    config.quantization.pos_bin = 0.0;
    assert!(matches!(
        config.quantization.validate(),
        Err(ConfigError::NonPositiveParameter { .. })
    ));

    let mut config = load_engine_config(&yaml_path).expect("yaml loads");
    config.time.dt_u = -1.0;
    assert!(matches!(
        config.time.validate(),
        Err(ConfigError::NonPositiveParameter { .. })
    ));

    let mut config = load_engine_config(&yaml_path).expect("yaml loads");
    config.world.max_radius = 0.0;
    assert!(matches!(
        config.world.build(),
        Err(ConfigError::NonPositiveParameter { .. })
    ));
}
