//! The thrust action model: enumeration of candidate burns and their
//! physical application through the RK4 integrator.

use log::trace;

use salvage_clock::TimePolicy;
use salvage_core::matrix::{Matrix, rotate2};
use salvage_core::numeric::safe_div;
use salvage_core::rk4::{VectorSpace, rk4_step};
use salvage_entities::Spacecraft;
use salvage_environment::EnvironmentModel;
use salvage_world::{WorldData, WorldIndex};

use crate::state::StateVertex;

/// A burn at a fixed thrust level along a unit direction, held for one global
/// time step. A zero thrust level is a coast.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrustAction {
    pub thrust_level: f64,
    /// Unit 2x1 direction in the universe frame.
    pub direction: Matrix,
    pub dt_global: f64,
}

/// The action sum. Thrust is the only member today; the enum keeps the wire
/// open for other maneuver kinds without widening every signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Thrust(ThrustAction),
}

impl Action {
    /// Edge cost: the global time the action consumes.
    pub fn cost(&self) -> f64 {
        match self {
            Action::Thrust(burn) => burn.dt_global,
        }
    }
}

/// Expansion of a planning state into a finite fan-out of successors.
///
/// `apply` is partial: physically infeasible edges (collision, horizon,
/// escape, broken invariants) return `None` and prune the search tree.
pub trait ActionModel {
    fn enumerate(&self, state: &StateVertex) -> Vec<Action>;
    fn apply(&self, state: &StateVertex, action: &Action) -> Option<StateVertex>;
}

/// The thrust model over a shared world, environment, index, and clock.
pub struct ThrustModel<'w, E, I, T> {
    world: &'w WorldData,
    environment: E,
    index: I,
    clock: T,
    spacecraft: &'w Spacecraft,
}

impl<'w, E, I, T> ThrustModel<'w, E, I, T>
where
    E: EnvironmentModel,
    I: WorldIndex,
    T: TimePolicy,
{
    pub fn new(
        world: &'w WorldData,
        environment: E,
        index: I,
        clock: T,
        spacecraft: &'w Spacecraft,
    ) -> Self {
        Self {
            world,
            environment,
            index,
            clock,
            spacecraft,
        }
    }

    /// Derivatives of the flight tuple with respect to proper time. Gamma is
    /// evaluated at the current integrator stage, which couples the global
    /// clock into every term.
    fn derivative(&self, flight: &FlightTuple, burn: &ThrustAction) -> FlightTuple {
        let gamma = self
            .environment
            .gamma(&flight.position, &flight.velocity, flight.global_time);
        let gravity = self.environment.gravity(&flight.position, flight.global_time);
        let acceleration = if flight.fuel > 0.0 {
            let thrust =
                &burn.direction * (burn.thrust_level / self.spacecraft.wet_mass(flight.fuel));
            &gravity + &thrust
        } else {
            gravity
        };
        FlightTuple {
            position: &flight.velocity * gamma,
            velocity: &acceleration * gamma,
            fuel: -safe_div(burn.thrust_level, self.spacecraft.exhaust_velocity, 0.0),
            global_time: gamma,
        }
    }

    /// Relocate through the lowest-id open wormhole whose entry is within the
    /// capture radius, if any.
    fn transit(&self, position: Matrix, t: f64) -> Matrix {
        let mut chosen: Option<usize> = None;
        for handle in self
            .index
            .query_wormholes(&position, self.world.capture_radius(), t)
        {
            let hole = self.world.wormhole(handle);
            if !hole.is_open(t) {
                continue;
            }
            match chosen {
                Some(current) if self.world.wormhole(current).id <= hole.id => {}
                _ => chosen = Some(handle),
            }
        }
        match chosen {
            Some(handle) => {
                let hole = self.world.wormhole(handle);
                trace!("wormhole {} transit at t={t:.3}", hole.id);
                hole.exit.clone()
            }
            None => position,
        }
    }

    /// Feasibility of a freshly integrated successor.
    fn admissible(&self, state: &StateVertex) -> bool {
        if !state.is_well_formed() {
            return false;
        }
        if state.global_time > self.clock.horizon() {
            return false;
        }
        if state.position.norm() > self.world.max_radius() {
            return false;
        }
        // Probe one length unit beyond the largest body radius so that every
        // body whose volume could contain the position is inspected.
        let probe = self.world.max_body_radius() + 1.0;
        for handle in self
            .index
            .query_bodies(&state.position, probe, state.global_time)
        {
            let body = self.world.body(handle);
            let distance = (&state.position - &body.position_at(state.global_time)).norm();
            if distance <= body.radius {
                return false;
            }
        }
        true
    }
}

impl<E, I, T> ActionModel for ThrustModel<'_, E, I, T>
where
    E: EnvironmentModel,
    I: WorldIndex,
    T: TimePolicy,
{
    /// Candidate burns in a fixed order: thrust levels outer, directions
    /// inner, coast last. The order is what breaks ties when two actions
    /// reach the same quantized successor, so it must stay stable.
    fn enumerate(&self, state: &StateVertex) -> Vec<Action> {
        let forward = heading(&state.velocity);
        let dt_global = self.clock.dt_global();
        let capacity =
            self.spacecraft.thrust_levels.len() * self.spacecraft.possible_directions.len() + 1;
        let mut actions: Vec<Action> = Vec::with_capacity(capacity);
        let mut fingerprints: Vec<(u64, u64, u64)> = Vec::with_capacity(capacity);
        for &level in &self.spacecraft.thrust_levels {
            for &theta in &self.spacecraft.possible_directions {
                push_unique(
                    &mut actions,
                    &mut fingerprints,
                    ThrustAction {
                        thrust_level: level,
                        direction: rotate2(&forward, theta),
                        dt_global,
                    },
                );
            }
        }
        // Coasting is always available, even with an empty direction table.
        push_unique(
            &mut actions,
            &mut fingerprints,
            ThrustAction {
                thrust_level: 0.0,
                direction: forward,
                dt_global,
            },
        );
        actions
    }

    fn apply(&self, state: &StateVertex, action: &Action) -> Option<StateVertex> {
        let Action::Thrust(burn) = action;
        if !state.is_well_formed() {
            return None;
        }

        let dt_proper = self.clock.to_proper(
            burn.dt_global,
            &state.position,
            &state.velocity,
            state.global_time,
        );
        let start = FlightTuple {
            position: state.position.clone(),
            velocity: state.velocity.clone(),
            fuel: state.fuel,
            global_time: state.global_time,
        };
        let flown = rk4_step(&start, 0.0, dt_proper, |flight, _tau| {
            self.derivative(flight, burn)
        });

        let fuel = flown.fuel.max(0.0);
        let position = self.transit(flown.position, flown.global_time);

        let mut collected = state.collected.clone();
        for handle in self.index.query_artifacts(
            &position,
            self.world.capture_radius(),
            flown.global_time,
        ) {
            collected.insert(self.world.artifact(handle).id);
        }

        let successor = StateVertex {
            position,
            velocity: flown.velocity,
            global_time: flown.global_time,
            fuel,
            collected,
        };
        if !self.admissible(&successor) {
            return None;
        }
        Some(successor)
    }
}

/// Unit vector along the current velocity, or the x axis when at rest.
fn heading(velocity: &Matrix) -> Matrix {
    velocity
        .normalized()
        .unwrap_or_else(|_| Matrix::vector2(1.0, 0.0))
}

/// Append the action unless an identical `(level, direction)` fingerprint was
/// already emitted; a zero entry in the thrust table would otherwise produce
/// the coast edge twice.
fn push_unique(
    actions: &mut Vec<Action>,
    fingerprints: &mut Vec<(u64, u64, u64)>,
    burn: ThrustAction,
) {
    let fingerprint = (
        burn.thrust_level.to_bits(),
        burn.direction.x().to_bits(),
        burn.direction.y().to_bits(),
    );
    if fingerprints.contains(&fingerprint) {
        return;
    }
    fingerprints.push(fingerprint);
    actions.push(Action::Thrust(burn));
}

/// The 4-tuple integrated over proper time: position, velocity, fuel, and
/// the global clock.
#[derive(Clone)]
struct FlightTuple {
    position: Matrix,
    velocity: Matrix,
    fuel: f64,
    global_time: f64,
}

impl VectorSpace for FlightTuple {
    fn add(&self, other: &Self) -> Self {
        Self {
            position: &self.position + &other.position,
            velocity: &self.velocity + &other.velocity,
            fuel: self.fuel + other.fuel,
            global_time: self.global_time + other.global_time,
        }
    }

    fn scale(&self, factor: f64) -> Self {
        Self {
            position: &self.position * factor,
            velocity: &self.velocity * factor,
            fuel: self.fuel * factor,
            global_time: self.global_time * factor,
        }
    }
}
