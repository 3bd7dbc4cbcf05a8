//! Vehicle: per-tick integration of steering forces into motion

use crate::config::SimulationConfig;
use crate::foundation::math::{rotation_from_direction, Vec3};
use crate::steering::behaviors::{Behavior, SteeringBehaviors, WeightedBehavior};
use crate::steering::entity::{MovingEntity, TargetState};
use crate::steering::smoother::Smoother;

/// Squared speed below which the agent is treated as stationary and its
/// orientation left untouched
const STATIONARY_SPEED_SQ: f32 = 1e-8;

/// An autonomous agent: kinematic state plus the steering that drives it
///
/// Each [`Vehicle::update`] computes the steering force, integrates it
/// through mass into velocity (clamped to the maximum speed), advances the
/// position, and re-derives the orientation from the direction of motion.
/// With smoothing enabled the orientation follows the running average of
/// recent velocities instead of the raw signal.
#[derive(Debug, Clone)]
pub struct Vehicle {
    entity: MovingEntity,
    steering: SteeringBehaviors,
    smoother: Smoother,
    smoothing_enabled: bool,
    smoothed_velocity: Vec3,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl Vehicle {
    /// Create a vehicle with default kinematics and the default arrive
    /// steering
    pub fn new() -> Self {
        Self {
            entity: MovingEntity::new(),
            steering: SteeringBehaviors::new(),
            smoother: Smoother::default(),
            smoothing_enabled: false,
            smoothed_velocity: Vec3::zeros(),
        }
    }

    /// Create a vehicle from configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        let agent = &config.agent;
        let entity = MovingEntity::new()
            .with_mass(agent.mass)
            .with_max_speed(agent.max_speed)
            .with_max_force(agent.max_force)
            .with_max_turn_rate(agent.max_turn_rate);

        let steering = SteeringBehaviors::from_behaviors(vec![WeightedBehavior::new(
            Behavior::Arrive(config.steering.arrive_deceleration),
            1.0,
        )]);

        Self {
            entity,
            steering,
            smoother: Smoother::new(agent.smoothing_samples),
            smoothing_enabled: agent.smoothing,
            smoothed_velocity: Vec3::zeros(),
        }
    }

    /// Replace the kinematic state, returning self for chaining
    pub fn with_entity(mut self, entity: MovingEntity) -> Self {
        self.entity = entity;
        self
    }

    /// Replace the steering configuration, returning self for chaining
    pub fn with_steering(mut self, steering: SteeringBehaviors) -> Self {
        self.steering = steering;
        self
    }

    /// Enable or disable heading smoothing, returning self for chaining
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }

    /// The kinematic state
    pub fn entity(&self) -> &MovingEntity {
        &self.entity
    }

    /// Mutable access to the kinematic state
    pub fn entity_mut(&mut self) -> &mut MovingEntity {
        &mut self.entity
    }

    /// The steering configuration
    pub fn steering(&self) -> &SteeringBehaviors {
        &self.steering
    }

    /// Mutable access to the steering configuration
    pub fn steering_mut(&mut self) -> &mut SteeringBehaviors {
        &mut self.steering
    }

    /// Whether heading smoothing is enabled
    pub fn smoothing_enabled(&self) -> bool {
        self.smoothing_enabled
    }

    /// Enable or disable heading smoothing
    pub fn set_smoothing(&mut self, enabled: bool) {
        self.smoothing_enabled = enabled;
    }

    /// The most recent smoothed velocity (meaningful with smoothing on)
    pub fn smoothed_velocity(&self) -> Vec3 {
        self.smoothed_velocity
    }

    /// Take a [`TargetState`] snapshot for other agents to steer against
    pub fn target_state(&self) -> TargetState {
        self.entity.target_state()
    }

    /// Advance the agent by `delta` seconds
    ///
    /// After this call the velocity magnitude never exceeds the entity's
    /// maximum speed. Orientation only changes while the agent is actually
    /// moving, so numerical noise near standstill cannot churn the heading.
    pub fn update(&mut self, delta: f32) {
        let steering_force = self.steering.calculate(&self.entity, delta);

        let acceleration = steering_force / self.entity.mass();
        self.entity.velocity += acceleration * delta;
        self.entity.limit_speed();

        self.entity.position += self.entity.velocity * delta;

        if self.entity.speed_squared() > STATIONARY_SPEED_SQ {
            let direction = if self.smoothing_enabled {
                self.smoothed_velocity = self.smoother.update(self.entity.velocity);
                self.smoothed_velocity
            } else {
                self.entity.velocity
            };
            self.entity.rotation = rotation_from_direction(direction);
        }
    }
}
