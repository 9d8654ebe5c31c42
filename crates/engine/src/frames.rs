//! Per-step observable snapshots handed to consumers. Frames are plain data;
//! the graphics or export layer treats them as read-only.

use serde::Serialize;

/// Snapshot of the whole universe at one step of the executed plan.
#[derive(Debug, Clone, Serialize)]
pub struct WorldFrame {
    /// Universal coordinate time of this step.
    pub global_time: f64,
    pub ship: ShipFrame,
    pub bodies: Vec<BodyFrame>,
    pub wormholes: Vec<WormholeFrame>,
    pub artifacts: Vec<ArtifactFrame>,
}

/// The spacecraft's observable state.
#[derive(Debug, Clone, Serialize)]
pub struct ShipFrame {
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub fuel: f64,
    /// Onboard proper time accumulated since the start of the run.
    pub proper_time: f64,
    pub collected: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyFrame {
    pub id: u32,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub radius: f64,
    pub mass: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WormholeFrame {
    pub id: u32,
    pub entry: [f64; 2],
    pub exit: [f64; 2],
    /// Whether the hole is traversable at this frame's time.
    pub open: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactFrame {
    pub id: u32,
    pub position: [f64; 2],
    /// Whether the ship has collected this artifact by this frame.
    pub collected: bool,
}
