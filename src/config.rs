//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ACTORSIM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

use actorsim_physics::{PhysicsConfig, Vec3};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Physics world configuration
    #[serde(default)]
    pub physics: PhysicsSettings,
    /// How actors are displayed when created
    #[serde(default)]
    pub display: DisplayConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ACTORSIM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ACTORSIM_SIMULATION__TIMESTEP=0.02 -> simulation.timestep = 0.02
        figment = figment.merge(Env::prefixed("ACTORSIM_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let timestep = self.simulation.timestep;
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(ConfigError::Invalid {
                key: "simulation.timestep",
                reason: format!("must be a positive number, got {}", timestep),
            });
        }
        if self.physics.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::Invalid {
                key: "physics.gravity",
                reason: "components must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Simulation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed step length in seconds
    pub timestep: f32,
    /// Number of steps the demo binary runs
    pub ticks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 0.01,
            ticks: 200,
        }
    }
}

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Gravity acceleration [x, y, z] (Z is up)
    pub gravity: [f32; 3],
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -9.81],
        }
    }
}

impl PhysicsSettings {
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig::new(Vec3::from_array(self.gravity))
    }
}

/// Initial display state of new actors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Display visibility in [0, 1]
    pub default_visibility: f32,
    /// Show collision-debug bodies instead of visual bodies
    pub render_collision: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_visibility: 1.0,
            render_collision: false,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
    #[error("Configuration error: {key} {reason}")]
    Invalid { key: &'static str, reason: String },
}
