//! Deterministic physics-aware motion planner for a single spacecraft in a
//! 2D universe of gravitating bodies, timed wormholes, and collectible
//! artifacts.
//!
//! The heavy lifting lives in the member crates; this facade re-exports them
//! under stable module names so front-ends (CLI, graphics, web) depend on one
//! crate.

pub use salvage_clock as clock;
pub use salvage_config as config;
pub use salvage_core as math;
pub use salvage_engine as engine;
pub use salvage_entities as entities;
pub use salvage_environment as environment;
pub use salvage_export as export;
pub use salvage_planner as planner;
pub use salvage_world as world;

/// Returns the version of the library for smoke tests while scaffolding.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
