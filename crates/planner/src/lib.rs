//! The discretized graph-search planner: continuous planning states, the
//! quantizer that folds them into finite keys, the thrust action model, and
//! the best-first solver.

pub mod action;
pub mod quantizer;
pub mod solver;
pub mod state;

pub use action::{Action, ActionModel, ThrustAction, ThrustModel};
pub use quantizer::Quantizer;
pub use solver::{FifoFrontier, Frontier, PathNode, Solver, SolverResult};
pub use state::{DiscreteState, StateVertex};
