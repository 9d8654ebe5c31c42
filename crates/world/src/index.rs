//! Radius queries against the world at a given global time.

use salvage_core::matrix::Matrix;

use crate::WorldData;

/// Spatial queries parameterized by global time. Implementations must return
/// every entity whose position at `t` lies within `radius` of `center`
/// (Euclidean, boundary inclusive), as handles into the world arenas, in
/// arena order.
pub trait WorldIndex {
    fn query_bodies(&self, center: &Matrix, radius: f64, t: f64) -> Vec<usize>;
    fn query_wormholes(&self, center: &Matrix, radius: f64, t: f64) -> Vec<usize>;
    fn query_artifacts(&self, center: &Matrix, radius: f64, t: f64) -> Vec<usize>;
}

/// The reference index: a linear scan over the arenas. Bodies are sampled at
/// the query time; wormhole entries and artifacts are static.
#[derive(Clone, Copy)]
pub struct LinearScan<'w> {
    world: &'w WorldData,
}

impl<'w> LinearScan<'w> {
    pub fn new(world: &'w WorldData) -> Self {
        Self { world }
    }
}

fn within(position: &Matrix, center: &Matrix, radius: f64) -> bool {
    (position - center).norm() <= radius
}

impl WorldIndex for LinearScan<'_> {
    fn query_bodies(&self, center: &Matrix, radius: f64, t: f64) -> Vec<usize> {
        self.world
            .bodies()
            .iter()
            .enumerate()
            .filter(|(_, body)| within(&body.position_at(t), center, radius))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn query_wormholes(&self, center: &Matrix, radius: f64, _t: f64) -> Vec<usize> {
        self.world
            .wormholes()
            .iter()
            .enumerate()
            .filter(|(_, hole)| within(&hole.entry, center, radius))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn query_artifacts(&self, center: &Matrix, radius: f64, _t: f64) -> Vec<usize> {
        self.world
            .artifacts()
            .iter()
            .enumerate()
            .filter(|(_, artifact)| within(&artifact.position, center, radius))
            .map(|(handle, _)| handle)
            .collect()
    }
}
