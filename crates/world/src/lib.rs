//! World data: arena-owned entities plus radius queries at arbitrary global
//! times. Entities are immutable once built; queries hand out integer handles
//! into the arenas rather than references.

pub mod index;

pub use index::{LinearScan, WorldIndex};

use salvage_entities::{Artifact, CelestialBody, WormHole};

/// Owns every entity of a run, along with the universe bounds and the
/// sampling knobs shared by all consumers.
#[derive(Debug)]
pub struct WorldData {
    bodies: Vec<CelestialBody>,
    wormholes: Vec<WormHole>,
    artifacts: Vec<Artifact>,
    max_radius: f64,
    capture_radius: f64,
    trajectory_delta: f64,
}

impl WorldData {
    pub fn new(
        bodies: Vec<CelestialBody>,
        wormholes: Vec<WormHole>,
        artifacts: Vec<Artifact>,
        max_radius: f64,
        capture_radius: f64,
        trajectory_delta: f64,
    ) -> Self {
        Self {
            bodies,
            wormholes,
            artifacts,
            max_radius,
            capture_radius,
            trajectory_delta,
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn wormholes(&self) -> &[WormHole] {
        &self.wormholes
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn body(&self, handle: usize) -> &CelestialBody {
        &self.bodies[handle]
    }

    pub fn wormhole(&self, handle: usize) -> &WormHole {
        &self.wormholes[handle]
    }

    pub fn artifact(&self, handle: usize) -> &Artifact {
        &self.artifacts[handle]
    }

    /// Soft escape boundary: states beyond this distance from the origin are
    /// infeasible.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Radius within which artifacts are collected and wormhole entries are
    /// engaged.
    pub fn capture_radius(&self) -> f64 {
        self.capture_radius
    }

    /// Finite-difference step for trajectory velocity sampling.
    pub fn trajectory_delta(&self) -> f64 {
        self.trajectory_delta
    }

    /// Largest collision radius over all bodies; zero for an empty universe.
    pub fn max_body_radius(&self) -> f64 {
        self.bodies.iter().fold(0.0, |acc, b| acc.max(b.radius))
    }
}
