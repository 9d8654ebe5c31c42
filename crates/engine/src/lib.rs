//! The orchestrator facade. `initialize` builds every component from an
//! [`EngineConfig`], `compute` runs the search once, and `step` dispenses one
//! [`WorldFrame`] per path element until the plan is exhausted.

pub mod frames;

pub use frames::{ArtifactFrame, BodyFrame, ShipFrame, WorldFrame, WormholeFrame};

use log::{debug, info};
use thiserror::Error;

use salvage_clock::{RelativisticClock, TimePolicy};
use salvage_config::{ConfigError, EngineConfig};
use salvage_core::matrix::Matrix;
use salvage_entities::Spacecraft;
use salvage_environment::Relativistic;
use salvage_planner::{
    FifoFrontier, Quantizer, Solver, SolverResult, StateVertex, ThrustModel,
};
use salvage_world::{LinearScan, WorldData};

/// Failures surfaced by the engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("search exhausted without reaching the artifact target")]
    SimulationFailed,
    #[error("all frames of the computed plan have been dispensed")]
    SimulationCompleted,
    #[error("compute() must succeed before step()")]
    NotComputed,
}

/// Owns the world, the spacecraft, and the computed plan for the lifetime of
/// a run. The engine is stateless between runs; rebuilding from the same
/// configuration reproduces the same plan bit for bit.
pub struct Engine {
    world: WorldData,
    spacecraft: Spacecraft,
    quantizer: Quantizer,
    initial: StateVertex,
    dt_global: f64,
    horizon: f64,
    target_artifacts: usize,
    result: Option<SolverResult>,
    cursor: usize,
    proper_elapsed: f64,
}

impl Engine {
    /// Build all owned components, validating the configuration eagerly.
    pub fn initialize(config: EngineConfig) -> Result<Self, EngineError> {
        config.time.validate()?;
        config.quantization.validate()?;
        config.initial_state.validate()?;
        let world = config.world.build()?;
        let spacecraft = Spacecraft::try_from(&config.spacecraft)?;
        let quantizer = Quantizer {
            position_bin: config.quantization.pos_bin,
            velocity_bin: config.quantization.vel_bin,
            time_bin: config.quantization.time_bin,
            fuel_bin: config.quantization.fuel_bin,
        };
        let initial = StateVertex::new(
            Matrix::vector2(
                config.initial_state.position[0],
                config.initial_state.position[1],
            ),
            Matrix::vector2(
                config.initial_state.velocity[0],
                config.initial_state.velocity[1],
            ),
            0.0,
            config.initial_state.fuel,
        );
        info!(
            "engine initialized: {} bodies, {} wormholes, {} artifacts, k={}",
            world.bodies().len(),
            world.wormholes().len(),
            world.artifacts().len(),
            config.k
        );
        Ok(Self {
            world,
            spacecraft,
            quantizer,
            initial,
            dt_global: config.time.dt_u,
            horizon: config.time.tmax_u,
            target_artifacts: config.k,
            result: None,
            cursor: 0,
            proper_elapsed: 0.0,
        })
    }

    /// Run the search from the configured initial state. The goal predicate
    /// is satisfied once the collected set holds at least `k` artifacts.
    pub fn compute(&mut self) -> Result<(), EngineError> {
        let environment = Relativistic::new(&self.world);
        let index = LinearScan::new(&self.world);
        let clock = RelativisticClock::new(environment, self.dt_global, self.horizon);
        let model = ThrustModel::new(&self.world, environment, index, clock, &self.spacecraft);
        let mut solver = Solver::new(model, self.quantizer.clone(), FifoFrontier::default());

        let target = self.target_artifacts;
        let result = solver
            .solve(self.initial.clone(), |state| state.collected.len() >= target)
            .ok_or(EngineError::SimulationFailed)?;
        debug!(
            "plan found: {} steps, total cost {:.3}",
            result.path.len(),
            result.total_cost
        );
        self.result = Some(result);
        self.cursor = 0;
        self.proper_elapsed = 0.0;
        Ok(())
    }

    /// The computed plan, if `compute` has succeeded.
    pub fn result(&self) -> Option<&SolverResult> {
        self.result.as_ref()
    }

    /// Dispense the next frame of the computed plan.
    pub fn step(&mut self) -> Result<WorldFrame, EngineError> {
        let result = self.result.as_ref().ok_or(EngineError::NotComputed)?;
        let Some(node) = result.path.get(self.cursor) else {
            return Err(EngineError::SimulationCompleted);
        };

        // Proper-time span of the edge that led here, evaluated along the
        // predecessor's state.
        let proper_delta = match (&node.action, self.cursor.checked_sub(1)) {
            (Some(action), Some(previous_index)) => {
                let previous = &result.path[previous_index].state;
                let environment = Relativistic::new(&self.world);
                let clock = RelativisticClock::new(environment, self.dt_global, self.horizon);
                clock.to_proper(
                    action.cost(),
                    &previous.position,
                    &previous.velocity,
                    previous.global_time,
                )
            }
            _ => 0.0,
        };
        let state = node.state.clone();

        self.proper_elapsed += proper_delta;
        let frame = self.snapshot(&state);
        self.cursor += 1;
        Ok(frame)
    }

    /// Release the computed plan. The world and spacecraft stay alive until
    /// the engine is dropped.
    pub fn shutdown(&mut self) {
        self.result = None;
        self.cursor = 0;
        self.proper_elapsed = 0.0;
    }

    fn snapshot(&self, state: &StateVertex) -> WorldFrame {
        let t = state.global_time;
        let delta = self.world.trajectory_delta();
        let bodies = self
            .world
            .bodies()
            .iter()
            .map(|body| {
                let position = body.position_at(t);
                let velocity = body.velocity_at(t, delta);
                BodyFrame {
                    id: body.id,
                    position: [position.x(), position.y()],
                    velocity: [velocity.x(), velocity.y()],
                    radius: body.radius,
                    mass: body.mass,
                }
            })
            .collect();
        let wormholes = self
            .world
            .wormholes()
            .iter()
            .map(|hole| WormholeFrame {
                id: hole.id,
                entry: [hole.entry.x(), hole.entry.y()],
                exit: [hole.exit.x(), hole.exit.y()],
                open: hole.is_open(t),
            })
            .collect();
        let artifacts = self
            .world
            .artifacts()
            .iter()
            .map(|artifact| ArtifactFrame {
                id: artifact.id,
                position: [artifact.position.x(), artifact.position.y()],
                collected: state.collected.contains(&artifact.id),
            })
            .collect();
        WorldFrame {
            global_time: t,
            ship: ShipFrame {
                position: [state.position.x(), state.position.y()],
                velocity: [state.velocity.x(), state.velocity.y()],
                fuel: state.fuel,
                proper_time: self.proper_elapsed,
                collected: state.collected.iter().copied().collect(),
            },
            bodies,
            wormholes,
            artifacts,
        }
    }
}
