//! Configuration system
//!
//! File-backed configuration for agent kinematics, steering defaults, and
//! picking defaults. Invalid setups surface here — at load or validation
//! time, fatally — rather than as runtime checks inside the simulation.

pub use serde::{Deserialize, Serialize};

use crate::physics::collision::{CollisionType, RaycastPrecision};
use crate::steering::behaviors::Deceleration;
use crate::steering::smoother::DEFAULT_SAMPLE_COUNT;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value outside its valid range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Agent kinematic parameters
    pub agent: AgentConfig,

    /// Steering defaults
    pub steering: SteeringConfig,

    /// Picking and collision defaults
    pub picking: PickingConfig,
}

impl Config for SimulationConfig {}

impl SimulationConfig {
    /// Check that every value is inside its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.mass <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "agent.mass must be positive, got {}",
                self.agent.mass
            )));
        }
        if self.agent.max_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "agent.max_speed must be non-negative, got {}",
                self.agent.max_speed
            )));
        }
        if self.agent.max_force < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "agent.max_force must be non-negative, got {}",
                self.agent.max_force
            )));
        }
        if self.picking.ray_near < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "picking.ray_near must be non-negative, got {}",
                self.picking.ray_near
            )));
        }
        if self.picking.ray_far < self.picking.ray_near {
            return Err(ConfigError::Invalid(format!(
                "picking.ray_far ({}) must not be less than ray_near ({})",
                self.picking.ray_far, self.picking.ray_near
            )));
        }
        Ok(())
    }
}

/// Agent kinematic parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Mass in arbitrary units (must be positive)
    pub mass: f32,

    /// Maximum speed in units per second
    pub max_speed: f32,

    /// Maximum steering force
    pub max_force: f32,

    /// Maximum turn rate in radians per second
    pub max_turn_rate: f32,

    /// Whether heading smoothing is enabled
    pub smoothing: bool,

    /// Number of velocity samples the smoother buffers
    pub smoothing_samples: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_speed: 5.0,
            max_force: 10.0,
            max_turn_rate: std::f32::consts::PI,
            smoothing: false,
            smoothing_samples: DEFAULT_SAMPLE_COUNT,
        }
    }
}

/// Steering defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Deceleration tier used by the default arrive behavior
    pub arrive_deceleration: Deceleration,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            arrive_deceleration: Deceleration::Middle,
        }
    }
}

/// Picking and collision defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Bounding volume used for box-overlap tests
    pub collision_type: CollisionType,

    /// Bounding representation answering ray queries
    pub raycast_precision: RaycastPrecision,

    /// Closest accepted hit distance
    pub ray_near: f32,

    /// Farthest accepted hit distance
    pub ray_far: f32,

    /// Minimum hit distance epsilon
    pub ray_precision: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            collision_type: CollisionType::Aabb,
            raycast_precision: RaycastPrecision::Face,
            ray_near: 0.0,
            ray_far: f32::INFINITY,
            ray_precision: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_mass_is_rejected() {
        let mut config = SimulationConfig::default();
        config.agent.mass = 0.0;

        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_ray_range_is_rejected() {
        let mut config = SimulationConfig::default();
        config.picking.ray_near = 10.0;
        config.picking.ray_far = 1.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SimulationConfig::default();
        config.agent.max_speed = 7.5;
        config.agent.smoothing = true;
        config.steering.arrive_deceleration = Deceleration::Slow;
        config.picking.raycast_precision = RaycastPrecision::Obb;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SimulationConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.agent.max_speed, 7.5);
        assert!(parsed.agent.smoothing);
        assert_eq!(parsed.steering.arrive_deceleration, Deceleration::Slow);
        assert_eq!(parsed.picking.raycast_precision, RaycastPrecision::Obb);
    }

    #[test]
    fn test_unknown_precision_string_fails_to_parse() {
        let text = r#"
            [picking]
            raycast_precision = "voxel"
        "#;

        let result: Result<SimulationConfig, _> = toml::from_str(text);
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let text = r#"
            [agent]
            max_speed = 12.0
        "#;

        let config: SimulationConfig = toml::from_str(text).unwrap();
        assert_eq!(config.agent.max_speed, 12.0);
        assert_eq!(config.agent.mass, 1.0);
        assert_eq!(config.picking.collision_type, CollisionType::Aabb);
    }
}
