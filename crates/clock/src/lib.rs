//! Conversion between the spacecraft's onboard proper time and universal
//! coordinate time, along a locally-constant state.

use salvage_core::constants::PROPER_TIME_STEP;
use salvage_core::matrix::Matrix;
use salvage_environment::EnvironmentModel;

/// Time bookkeeping for the planner: interval conversion plus the fixed
/// global step and horizon used by action enumeration.
pub trait TimePolicy {
    /// Proper-time span of the global interval `[t, t + dt_global]`, with the
    /// position and velocity held constant over the interval.
    fn to_proper(&self, dt_global: f64, position: &Matrix, velocity: &Matrix, t: f64) -> f64;
    /// Global-time span covering `dt_proper` of onboard time.
    fn to_global(&self, dt_proper: f64, position: &Matrix, velocity: &Matrix, t: f64) -> f64;
    /// Fixed global step consumed by one action.
    fn dt_global(&self) -> f64;
    /// Global-time horizon; states beyond it are infeasible.
    fn horizon(&self) -> f64;
}

/// Rectangle-sum integration of the dilation factor at a fixed step.
pub struct RelativisticClock<E> {
    environment: E,
    dt_global: f64,
    horizon: f64,
}

impl<E: EnvironmentModel> RelativisticClock<E> {
    pub fn new(environment: E, dt_global: f64, horizon: f64) -> Self {
        Self {
            environment,
            dt_global,
            horizon,
        }
    }
}

impl<E: EnvironmentModel> TimePolicy for RelativisticClock<E> {
    fn to_proper(&self, dt_global: f64, position: &Matrix, velocity: &Matrix, t: f64) -> f64 {
        let mut elapsed = 0.0;
        let mut proper = 0.0;
        while elapsed < dt_global {
            let step = PROPER_TIME_STEP.min(dt_global - elapsed);
            proper += self.environment.inv_gamma(position, velocity, t + elapsed) * step;
            elapsed += step;
        }
        proper
    }

    fn to_global(&self, dt_proper: f64, position: &Matrix, velocity: &Matrix, t: f64) -> f64 {
        let mut remaining = dt_proper;
        let mut global = 0.0;
        while remaining > 0.0 {
            let step = PROPER_TIME_STEP.min(remaining);
            global += self.environment.gamma(position, velocity, t + global) * step;
            remaining -= step;
        }
        global
    }

    fn dt_global(&self) -> f64 {
        self.dt_global
    }

    fn horizon(&self) -> f64 {
        self.horizon
    }
}
