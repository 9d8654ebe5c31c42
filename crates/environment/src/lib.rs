//! The physical environment: Newtonian gravity from every body plus the
//! weak-field relativistic time-rate factor.

use salvage_core::constants::{EPSILON, GRAVITATIONAL_CONSTANT, SPEED_OF_LIGHT};
use salvage_core::matrix::Matrix;
use salvage_world::WorldData;

/// Field quantities sampled at a position, velocity, and global time.
pub trait EnvironmentModel {
    /// Gravitational acceleration at `position` and time `t` (km/s²).
    fn gravity(&self, position: &Matrix, t: f64) -> Matrix;
    /// Gravitational potential at `position` and time `t` (km²/s²).
    fn potential(&self, position: &Matrix, t: f64) -> f64;
    /// Time-rate factor `dt_global / d_proper`.
    fn gamma(&self, position: &Matrix, velocity: &Matrix, t: f64) -> f64;
    /// Reciprocal rate `d_proper / dt_global`.
    fn inv_gamma(&self, position: &Matrix, velocity: &Matrix, t: f64) -> f64;
}

/// Weak-field Schwarzschild-like model over the world's bodies.
///
/// Denominators are softened by the shared epsilon so that field samples on a
/// body center stay finite. The softening is a numerical guard, not a
/// physical cutoff: within epsilon of a center the returned values are
/// meaningless, but by then the collision check has already rejected the
/// state.
#[derive(Clone, Copy)]
pub struct Relativistic<'w> {
    world: &'w WorldData,
}

impl<'w> Relativistic<'w> {
    pub fn new(world: &'w WorldData) -> Self {
        Self { world }
    }
}

impl EnvironmentModel for Relativistic<'_> {
    fn gravity(&self, position: &Matrix, t: f64) -> Matrix {
        let mut total = Matrix::zeros(2, 1);
        for body in self.world.bodies() {
            let offset = &body.position_at(t) - position;
            let distance = offset.norm();
            let scale = GRAVITATIONAL_CONSTANT * body.mass / (distance.powi(3) + EPSILON);
            total = &total + &(&offset * scale);
        }
        total
    }

    fn potential(&self, position: &Matrix, t: f64) -> f64 {
        let mut total = 0.0;
        for body in self.world.bodies() {
            let distance = (&body.position_at(t) - position).norm();
            total -= GRAVITATIONAL_CONSTANT * body.mass / (distance + EPSILON);
        }
        total
    }

    fn gamma(&self, position: &Matrix, velocity: &Matrix, t: f64) -> f64 {
        1.0 / self.inv_gamma(position, velocity, t)
    }

    fn inv_gamma(&self, position: &Matrix, velocity: &Matrix, t: f64) -> f64 {
        let c_squared = SPEED_OF_LIGHT * SPEED_OF_LIGHT;
        let speed_squared = velocity.norm().powi(2);
        1.0 + self.potential(position, t) / c_squared - speed_squared / (2.0 * c_squared)
    }
}
