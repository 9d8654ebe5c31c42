use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, PI};

use orbital_salvage_planner::config::{
    ArtifactConfig, EngineConfig, InitialStateConfig, QuantizationConfig, SpacecraftConfig,
    TimeConfig, WorldConfig,
};
use orbital_salvage_planner::engine::{Engine, EngineError, WorldFrame};

fn base_config() -> EngineConfig {
    EngineConfig {
        world: WorldConfig {
            bodies: Vec::new(),
            wormholes: Vec::new(),
            artifacts: Vec::new(),
            max_radius: 50.0,
            capture_radius: 1e-12,
            trajectory_sample_delta: 1e-3,
        },
        time: TimeConfig {
            tmax_u: 10.0,
            dt_u: 1.0,
        },
        quantization: QuantizationConfig {
            pos_bin: 0.5,
            vel_bin: 0.5,
            time_bin: 0.5,
            fuel_bin: 1.0,
        },
        spacecraft: SpacecraftConfig {
            mass: 1.0,
            max_fuel: 0.0,
            min_fuel_to_land: 0.0,
            thrust_levels: vec![0.0],
            exhaust_speed: 1.0e6,
            possible_directions: vec![0.0],
            initial_position: None,
            initial_velocity: None,
        },
        initial_state: InitialStateConfig {
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            fuel: 0.0,
        },
        k: 0,
    }
}

fn drain(engine: &mut Engine) -> Vec<WorldFrame> {
    let mut frames = Vec::new();
    loop {
        match engine.step() {
            Ok(frame) => frames.push(frame),
            Err(EngineError::SimulationCompleted) => return frames,
            Err(err) => panic!("unexpected step error: {err}"),
        }
    }
}

#[test]
fn a_zero_target_plan_is_just_the_start() {
    let mut engine = Engine::initialize(base_config()).expect("valid config");
    engine.compute().expect("goal holds at the start");

    let result = engine.result().expect("plan stored");
    assert_eq!(result.path.len(), 1);
    assert_eq!(result.total_cost, 0.0);

    let frames = drain(&mut engine);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].global_time, 0.0);
    assert_eq!(frames[0].ship.position, [0.0, 0.0]);
    assert_eq!(frames[0].ship.proper_time, 0.0);
    assert!(frames[0].artifacts.is_empty());
}

#[test]
fn stepping_before_compute_is_an_error() {
    let mut engine = Engine::initialize(base_config()).expect("valid config");
    assert!(matches!(engine.step(), Err(EngineError::NotComputed)));
}

#[test]
fn stepping_past_the_last_frame_reports_completion() {
    let mut engine = Engine::initialize(base_config()).expect("valid config");
    engine.compute().expect("plan computed");
    engine.step().expect("one frame available");
    assert!(matches!(
        engine.step(),
        Err(EngineError::SimulationCompleted)
    ));
}

#[test]
fn shutdown_releases_the_computed_plan() {
    let mut engine = Engine::initialize(base_config()).expect("valid config");
    engine.compute().expect("plan computed");
    engine.shutdown();
    assert!(engine.result().is_none());
    assert!(matches!(engine.step(), Err(EngineError::NotComputed)));
}

fn single_artifact_config() -> EngineConfig {
    let mut config = base_config();
    config.world.artifacts = vec![ArtifactConfig {
        id: 7,
        position: [1.0, 0.0],
    }];
    config.initial_state.position = [1.0, 0.0];
    config.k = 1;
    config
}

#[test]
fn an_artifact_under_the_ship_is_collected_on_the_first_step() {
    let mut engine = Engine::initialize(single_artifact_config()).expect("valid config");
    engine.compute().expect("artifact reachable by coasting");

    let result = engine.result().expect("plan stored");
    assert_eq!(result.path.len(), 2);
    let collected = &result.path.last().unwrap().state.collected;
    assert_eq!(*collected, BTreeSet::from([7]));

    let frames = drain(&mut engine);
    assert_eq!(frames.len(), 2);
    assert!(!frames[0].artifacts[0].collected);
    assert!(frames[1].artifacts[0].collected);
    assert_eq!(frames[0].ship.proper_time, 0.0);
    assert!((frames[1].ship.proper_time - 1.0).abs() < 1e-6);
}

#[test]
fn an_unreachable_target_fails_the_simulation() {
    let mut config = base_config();
    config.k = 1;
    config.time.tmax_u = 2.0;
    let mut engine = Engine::initialize(config).expect("valid config");
    assert!(matches!(
        engine.compute(),
        Err(EngineError::SimulationFailed)
    ));
}

#[test]
fn identical_configurations_produce_identical_plans() {
    let mut first = Engine::initialize(single_artifact_config()).expect("valid config");
    let mut second = Engine::initialize(single_artifact_config()).expect("valid config");
    first.compute().expect("plan computed");
    second.compute().expect("plan computed");
    assert_eq!(first.result(), second.result());
}

fn two_artifact_config() -> EngineConfig {
    let mut config = base_config();
    config.world.artifacts = vec![
        ArtifactConfig {
            id: 1,
            position: [1.0, 0.0],
        },
        ArtifactConfig {
            id: 2,
            position: [0.0, 1.0],
        },
    ];
    config.world.capture_radius = 0.5;
    config.time.tmax_u = 12.0;
    config.quantization.vel_bin = 1.0;
    config.quantization.time_bin = 1.0;
    config.quantization.fuel_bin = 100.0;
    config.spacecraft.max_fuel = 1000.0;
    config.spacecraft.thrust_levels = vec![2002.0];
    config.spacecraft.possible_directions = vec![0.0, FRAC_PI_2, -FRAC_PI_2, PI];
    config.initial_state.fuel = 1000.0;
    config.k = 2;
    config
}

#[test]
fn a_maneuvering_plan_collects_two_artifacts_within_the_horizon() {
    let mut engine = Engine::initialize(two_artifact_config()).expect("valid config");
    engine.compute().expect("both artifacts reachable");

    let result = engine.result().expect("plan stored").clone();
    let last = result.path.last().unwrap();
    assert_eq!(last.state.collected, BTreeSet::from([1, 2]));
    assert!(result.total_cost <= 12.0);

    // Edge costs sum to the reported total; every edge consumes one dt_u.
    let edge_sum: f64 = result
        .path
        .iter()
        .filter_map(|node| node.action.as_ref())
        .map(|action| action.cost())
        .sum();
    assert_eq!(edge_sum, result.total_cost);
    assert!((result.total_cost - (result.path.len() - 1) as f64).abs() < 1e-9);
}

#[test]
fn every_state_of_a_returned_path_is_feasible() {
    let mut engine = Engine::initialize(two_artifact_config()).expect("valid config");
    engine.compute().expect("both artifacts reachable");
    let result = engine.result().expect("plan stored");

    assert!(result.path[0].action.is_none());
    let mut previous_collected = BTreeSet::new();
    for node in &result.path {
        let state = &node.state;
        assert!(state.fuel >= 0.0);
        assert!(state.global_time <= 12.0);
        assert!(state.position.norm() <= 50.0);
        assert!(state.collected.is_superset(&previous_collected));
        previous_collected = state.collected.clone();
    }
}
