//! Engine configuration: serde models for on-disk world descriptions, file
//! loaders, and the eagerly-validated conversion into runtime entities.

use std::f64::consts::TAU;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use salvage_core::constants::{DEFAULT_TRAJECTORY_DELTA, EPSILON};
use salvage_core::matrix::Matrix;
use salvage_entities::{Artifact, CelestialBody, EllipticalOrbit, Motion, Spacecraft, WormHole};
use salvage_world::WorldData;

/// Errors raised while loading or validating a configuration. Construction
/// errors are fatal and surface to the caller before any search runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read world file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("world file has no recognized extension (expected .yaml, .yml, or .toml)")]
    UnknownFormat,
    #[error("body {id} must have positive mass, got {mass}")]
    InvalidMass { id: u32, mass: f64 },
    #[error("body {id} must have positive radius, got {radius}")]
    InvalidBodyRadius { id: u32, radius: f64 },
    #[error("body {id} orbit axes and rate must be positive (a={a}, b={b}, omega={omega})")]
    InvalidOrbit { id: u32, a: f64, b: f64, omega: f64 },
    #[error("wormhole {id} opens at {t_open} but closes at {t_close}")]
    InvertedWindow { id: u32, t_open: f64, t_close: f64 },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("spacecraft mass must be positive, got {0}")]
    InvalidSpacecraftMass(f64),
    #[error("fuel quantities must be non-negative, got {0}")]
    InvalidFuel(f64),
    #[error("thrust level table must not be empty")]
    EmptyThrustTable,
    #[error("thrust levels must be non-negative, got {0}")]
    NegativeThrust(f64),
    #[error("exhaust velocity must be positive, got {0}")]
    InvalidExhaustVelocity(f64),
    #[error("landing fuel margin {margin} exceeds fuel capacity {capacity}")]
    InvalidLandingMargin { margin: f64, capacity: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositiveParameter { field: &'static str, value: f64 },
}

/// Top-level engine configuration, the only ingress to the core.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub time: TimeConfig,
    pub quantization: QuantizationConfig,
    pub spacecraft: SpacecraftConfig,
    pub initial_state: InitialStateConfig,
    /// Number of distinct artifacts the plan must collect.
    pub k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub wormholes: Vec<WormholeConfig>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,
    pub max_radius: f64,
    /// Radius for artifact capture and wormhole transit. Defaults to the
    /// numerical-noise tolerance: capture means positional coincidence.
    #[serde(default = "default_capture_radius")]
    pub capture_radius: f64,
    /// Finite-difference step for trajectory velocity sampling.
    #[serde(default = "default_trajectory_delta")]
    pub trajectory_sample_delta: f64,
}

/// Body descriptions are a tagged sum over the motion kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BodyConfig {
    #[serde(rename = "stationary")]
    Stationary {
        id: u32,
        mass: f64,
        radius: f64,
        position: [f64; 2],
    },
    #[serde(rename = "trajectory")]
    Trajectory {
        id: u32,
        mass: f64,
        radius: f64,
        a: f64,
        b: f64,
        omega: f64,
        phi: f64,
        angle: f64,
        center: [f64; 2],
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct WormholeConfig {
    pub id: u32,
    pub entry: [f64; 2],
    pub exit: [f64; 2],
    pub t_open: f64,
    pub t_close: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    pub id: u32,
    pub position: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeConfig {
    /// Global-time horizon.
    pub tmax_u: f64,
    /// Fixed global step consumed by one action.
    pub dt_u: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantizationConfig {
    pub pos_bin: f64,
    pub vel_bin: f64,
    pub time_bin: f64,
    pub fuel_bin: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpacecraftConfig {
    pub mass: f64,
    pub max_fuel: f64,
    #[serde(default)]
    pub min_fuel_to_land: f64,
    pub thrust_levels: Vec<f64>,
    pub exhaust_speed: f64,
    pub possible_directions: Vec<f64>,
    /// Accepted for older manifests; `initial_state` supersedes these.
    #[serde(default)]
    pub initial_position: Option<[f64; 2]>,
    #[serde(default)]
    pub initial_velocity: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitialStateConfig {
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub fuel: f64,
}

fn default_capture_radius() -> f64 {
    EPSILON
}

fn default_trajectory_delta() -> f64 {
    DEFAULT_TRAJECTORY_DELTA
}

/// Load an engine configuration from a YAML or TOML world file, dispatching
/// on the extension.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&contents)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        _ => Err(ConfigError::UnknownFormat),
    }
}

impl TryFrom<&BodyConfig> for CelestialBody {
    type Error = ConfigError;

    fn try_from(config: &BodyConfig) -> Result<Self, ConfigError> {
        match *config {
            BodyConfig::Stationary {
                id,
                mass,
                radius,
                position,
            } => {
                validate_body_scalars(id, mass, radius)?;
                Ok(CelestialBody {
                    id,
                    mass,
                    radius,
                    motion: Motion::Fixed(Matrix::vector2(position[0], position[1])),
                })
            }
            BodyConfig::Trajectory {
                id,
                mass,
                radius,
                a,
                b,
                omega,
                phi,
                angle,
                center,
            } => {
                validate_body_scalars(id, mass, radius)?;
                if a <= 0.0 || b <= 0.0 || omega <= 0.0 {
                    return Err(ConfigError::InvalidOrbit { id, a, b, omega });
                }
                Ok(CelestialBody {
                    id,
                    mass,
                    radius,
                    motion: Motion::Orbit(EllipticalOrbit {
                        semi_major: a,
                        semi_minor: b,
                        angular_rate: omega,
                        phase: phi,
                        center: Matrix::vector2(center[0], center[1]),
                        tilt: angle.rem_euclid(TAU),
                    }),
                })
            }
        }
    }
}

impl TryFrom<&WormholeConfig> for WormHole {
    type Error = ConfigError;

    fn try_from(config: &WormholeConfig) -> Result<Self, ConfigError> {
        if config.t_open >= config.t_close {
            return Err(ConfigError::InvertedWindow {
                id: config.id,
                t_open: config.t_open,
                t_close: config.t_close,
            });
        }
        Ok(WormHole {
            id: config.id,
            entry: Matrix::vector2(config.entry[0], config.entry[1]),
            exit: Matrix::vector2(config.exit[0], config.exit[1]),
            t_open: config.t_open,
            t_close: config.t_close,
        })
    }
}

impl From<&ArtifactConfig> for Artifact {
    fn from(config: &ArtifactConfig) -> Self {
        Artifact {
            id: config.id,
            position: Matrix::vector2(config.position[0], config.position[1]),
        }
    }
}

impl TryFrom<&SpacecraftConfig> for Spacecraft {
    type Error = ConfigError;

    fn try_from(config: &SpacecraftConfig) -> Result<Self, ConfigError> {
        if config.mass <= 0.0 {
            return Err(ConfigError::InvalidSpacecraftMass(config.mass));
        }
        if config.max_fuel < 0.0 {
            return Err(ConfigError::InvalidFuel(config.max_fuel));
        }
        if config.thrust_levels.is_empty() {
            return Err(ConfigError::EmptyThrustTable);
        }
        if let Some(&level) = config.thrust_levels.iter().find(|&&level| level < 0.0) {
            return Err(ConfigError::NegativeThrust(level));
        }
        if config.exhaust_speed <= 0.0 {
            return Err(ConfigError::InvalidExhaustVelocity(config.exhaust_speed));
        }
        if config.min_fuel_to_land < 0.0 {
            return Err(ConfigError::InvalidFuel(config.min_fuel_to_land));
        }
        if config.min_fuel_to_land > config.max_fuel {
            return Err(ConfigError::InvalidLandingMargin {
                margin: config.min_fuel_to_land,
                capacity: config.max_fuel,
            });
        }
        Ok(Spacecraft {
            mass: config.mass,
            fuel: config.max_fuel,
            min_fuel_to_land: config.min_fuel_to_land,
            thrust_levels: config.thrust_levels.clone(),
            exhaust_velocity: config.exhaust_speed,
            possible_directions: config.possible_directions.clone(),
        })
    }
}

impl WorldConfig {
    /// Build the entity arenas, validating every entity and rejecting
    /// duplicate ids within a kind.
    pub fn build(&self) -> Result<WorldData, ConfigError> {
        if self.max_radius <= 0.0 {
            return Err(ConfigError::NonPositiveParameter {
                field: "world.max_radius",
                value: self.max_radius,
            });
        }
        if self.trajectory_sample_delta <= 0.0 {
            return Err(ConfigError::NonPositiveParameter {
                field: "world.trajectory_sample_delta",
                value: self.trajectory_sample_delta,
            });
        }

        let bodies = self
            .bodies
            .iter()
            .map(CelestialBody::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let wormholes = self
            .wormholes
            .iter()
            .map(WormHole::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let artifacts: Vec<Artifact> = self.artifacts.iter().map(Artifact::from).collect();

        check_unique("body", bodies.iter().map(|b| b.id))?;
        check_unique("wormhole", wormholes.iter().map(|w| w.id))?;
        check_unique("artifact", artifacts.iter().map(|a| a.id))?;

        Ok(WorldData::new(
            bodies,
            wormholes,
            artifacts,
            self.max_radius,
            self.capture_radius,
            self.trajectory_sample_delta,
        ))
    }
}

impl TimeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("time.tmax_u", self.tmax_u), ("time.dt_u", self.dt_u)] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveParameter { field, value });
            }
        }
        Ok(())
    }
}

impl QuantizationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("quantization.pos_bin", self.pos_bin),
            ("quantization.vel_bin", self.vel_bin),
            ("quantization.time_bin", self.time_bin),
            ("quantization.fuel_bin", self.fuel_bin),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveParameter { field, value });
            }
        }
        Ok(())
    }
}

impl InitialStateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fuel < 0.0 {
            return Err(ConfigError::InvalidFuel(self.fuel));
        }
        Ok(())
    }
}

fn validate_body_scalars(id: u32, mass: f64, radius: f64) -> Result<(), ConfigError> {
    if mass <= 0.0 {
        return Err(ConfigError::InvalidMass { id, mass });
    }
    if radius <= 0.0 {
        return Err(ConfigError::InvalidBodyRadius { id, radius });
    }
    Ok(())
}

fn check_unique(
    kind: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<(), ConfigError> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
