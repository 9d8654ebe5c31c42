//! Folding the continuous state manifold into finite hashable keys.

use crate::state::{DiscreteState, StateVertex};

/// Component-wise binning of a [`StateVertex`]. Collapsing continuous states
/// into equivalence classes keeps the otherwise-infinite search graph finite,
/// which is what guarantees termination under a finite horizon.
#[derive(Debug, Clone)]
pub struct Quantizer {
    pub position_bin: f64,
    pub velocity_bin: f64,
    pub time_bin: f64,
    pub fuel_bin: f64,
}

impl Quantizer {
    /// Quantize a state. NaN components must not occur in valid states and
    /// are rejected by a debug assertion.
    pub fn quantize(&self, state: &StateVertex) -> DiscreteState {
        DiscreteState {
            position: (
                bin(state.position.x(), self.position_bin),
                bin(state.position.y(), self.position_bin),
            ),
            velocity: (
                bin(state.velocity.x(), self.velocity_bin),
                bin(state.velocity.y(), self.velocity_bin),
            ),
            time: bin(state.global_time, self.time_bin),
            fuel: bin(state.fuel, self.fuel_bin),
            collected: state.collected.clone(),
        }
    }
}

fn bin(value: f64, size: f64) -> i64 {
    debug_assert!(value.is_finite(), "quantizer input must be finite");
    (value / size).round() as i64
}
