//! Classic fourth-order Runge-Kutta integration over any vector-space state.

use crate::matrix::Matrix;

/// States integrable by [`rk4_step`]. Implementors must behave as a vector
/// space over f64: element-wise addition and scalar multiplication.
pub trait VectorSpace: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, factor: f64) -> Self;
}

impl VectorSpace for Matrix {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }
}

impl VectorSpace for f64 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }
}

/// Advance `state` by one RK4 step of size `dt` under the derivative field
/// `f(state, t)`. Returns `state + (k1 + 2 k2 + 2 k3 + k4) * dt / 6` with the
/// stages evaluated at `(state, t)`, the two midpoints, and `(state + k3 dt,
/// t + dt)`.
pub fn rk4_step<S, F>(state: &S, t: f64, dt: f64, f: F) -> S
where
    S: VectorSpace,
    F: Fn(&S, f64) -> S,
{
    let half = dt / 2.0;
    let k1 = f(state, t);
    let k2 = f(&state.add(&k1.scale(half)), t + half);
    let k3 = f(&state.add(&k2.scale(half)), t + half);
    let k4 = f(&state.add(&k3.scale(dt)), t + dt);
    let increment = k1
        .add(&k2.scale(2.0))
        .add(&k3.scale(2.0))
        .add(&k4);
    state.add(&increment.scale(dt / 6.0))
}
