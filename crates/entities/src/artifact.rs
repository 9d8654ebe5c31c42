//! Collectible artifacts.

use salvage_core::matrix::Matrix;

/// A stationary collectible. The planner's goal counts distinct collected ids.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub id: u32,
    pub position: Matrix,
}
