//! Entity models for the 2D universe: gravitating bodies on fixed positions
//! or parametric trajectories, timed wormholes, collectible artifacts, and
//! the spacecraft itself.

pub mod artifact;
pub mod body;
pub mod spacecraft;
pub mod wormhole;

pub use artifact::Artifact;
pub use body::{CelestialBody, EllipticalOrbit, Motion};
pub use spacecraft::Spacecraft;
pub use wormhole::WormHole;
