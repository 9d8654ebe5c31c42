//! Core math primitives shared across the salvage planner workspace.

pub mod matrix;
pub mod rk4;

pub use matrix::{MathError, Matrix, rotate2};
pub use rk4::{VectorSpace, rk4_step};

/// Physical and numerical constants. Spatial units are kilometres, time is
/// seconds, mass is kilograms.
pub mod constants {
    /// Gravitational constant (km³ kg⁻¹ s⁻²).
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_3e-11 * 1e-9;
    /// Speed of light (km/s).
    pub const SPEED_OF_LIGHT: f64 = 299_792.458;
    /// Tolerance for float equality checks and division guards.
    pub const EPSILON: f64 = 1e-12;
    /// Default finite-difference step for sampling trajectory velocities.
    pub const DEFAULT_TRAJECTORY_DELTA: f64 = 1e-3;
    /// Fixed step for the rectangle-sum proper-time integration.
    pub const PROPER_TIME_STEP: f64 = 0.01;
}

/// Guarded numeric helpers.
pub mod numeric {
    use super::constants::EPSILON;

    /// Divide `numerator` by `denominator`, returning `fallback` when the
    /// denominator is too small to divide by safely.
    #[inline]
    pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
        if denominator.abs() < EPSILON {
            fallback
        } else {
            numerator / denominator
        }
    }

    /// Approximate scalar equality under the shared tolerance.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }
}
