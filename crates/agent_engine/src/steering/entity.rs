//! Kinematic state for entities that move in 3D space

use crate::foundation::math::{Quat, Vec3};

/// Smallest mass an entity can be assigned
const MIN_MASS: f32 = 1e-4;

/// Snapshot of another agent's state taken at the start of a tick
///
/// Behaviors that reason about other agents (pursuit, evade) read this copy
/// rather than the live entity, so cross-agent reads may be up to one tick
/// stale regardless of driver update order.
#[derive(Debug, Clone, Copy)]
pub struct TargetState {
    /// World-space position
    pub position: Vec3,

    /// Velocity in units per second
    pub velocity: Vec3,

    /// Unit forward direction
    pub forward: Vec3,

    /// Scalar speed in units per second
    pub speed: f32,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            forward: Vec3::z(),
            speed: 0.0,
        }
    }
}

impl TargetState {
    /// Create a snapshot for a stationary point target
    pub fn at_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Kinematic state for a moving agent
///
/// Velocity magnitude never exceeds `max_speed` after an integration step;
/// the limit parameters are clamped into their valid ranges by the setters.
#[derive(Debug, Clone)]
pub struct MovingEntity {
    /// Position in world space
    pub position: Vec3,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Orientation derived from the direction of motion
    pub rotation: Quat,

    mass: f32,
    max_speed: f32,
    max_force: f32,
    max_turn_rate: f32,
}

impl Default for MovingEntity {
    fn default() -> Self {
        Self::new()
    }
}

impl MovingEntity {
    /// Create an entity at the origin with unit mass and moderate limits
    pub fn new() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            rotation: Quat::identity(),
            mass: 1.0,
            max_speed: 5.0,
            max_force: 10.0,
            max_turn_rate: std::f32::consts::PI,
        }
    }

    /// Set the starting position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the starting velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    /// Set the maximum speed
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.set_max_speed(max_speed);
        self
    }

    /// Set the maximum steering force
    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.set_max_force(max_force);
        self
    }

    /// Set the maximum turn rate
    pub fn with_max_turn_rate(mut self, max_turn_rate: f32) -> Self {
        self.set_max_turn_rate(max_turn_rate);
        self
    }

    /// Get the mass (always positive)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass, clamped to a small positive minimum
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(MIN_MASS);
    }

    /// Get the maximum speed
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Set the maximum speed (negative values clamp to zero)
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.0);
    }

    /// Get the maximum steering force
    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Set the maximum steering force (negative values clamp to zero)
    pub fn set_max_force(&mut self, max_force: f32) {
        self.max_force = max_force.max(0.0);
    }

    /// Get the maximum turn rate in radians per second
    pub fn max_turn_rate(&self) -> f32 {
        self.max_turn_rate
    }

    /// Set the maximum turn rate (negative values clamp to zero)
    pub fn set_max_turn_rate(&mut self, max_turn_rate: f32) {
        self.max_turn_rate = max_turn_rate.max(0.0);
    }

    /// Current speed in units per second
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Current squared speed (cheaper than [`Self::speed`])
    pub fn speed_squared(&self) -> f32 {
        self.velocity.magnitude_squared()
    }

    /// Unit forward direction derived from the current orientation
    pub fn heading(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Clamp the velocity magnitude to `max_speed`, preserving direction
    pub fn limit_speed(&mut self) {
        let speed_sq = self.velocity.magnitude_squared();
        if speed_sq > self.max_speed * self.max_speed {
            self.velocity = self.velocity * (self.max_speed / speed_sq.sqrt());
        }
    }

    /// Take a [`TargetState`] snapshot of this entity
    pub fn target_state(&self) -> TargetState {
        TargetState {
            position: self.position,
            velocity: self.velocity,
            forward: self.heading(),
            speed: self.speed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_entity_defaults() {
        let entity = MovingEntity::new();

        assert_eq!(entity.position, Vec3::zeros());
        assert_eq!(entity.velocity, Vec3::zeros());
        assert!(entity.mass() > 0.0);
        assert_relative_eq!(entity.heading().z, 1.0);
    }

    #[test]
    fn test_setters_clamp_into_range() {
        let mut entity = MovingEntity::new();

        entity.set_mass(-3.0);
        assert!(entity.mass() > 0.0);

        entity.set_max_speed(-1.0);
        assert_eq!(entity.max_speed(), 0.0);

        entity.set_max_force(-1.0);
        assert_eq!(entity.max_force(), 0.0);
    }

    #[test]
    fn test_limit_speed_preserves_direction() {
        let mut entity = MovingEntity::new()
            .with_velocity(Vec3::new(30.0, 40.0, 0.0))
            .with_max_speed(5.0);

        entity.limit_speed();

        assert_relative_eq!(entity.speed(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(entity.velocity.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(entity.velocity.y, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_limit_speed_leaves_slow_velocity_untouched() {
        let mut entity = MovingEntity::new()
            .with_velocity(Vec3::new(1.0, 0.0, 0.0))
            .with_max_speed(5.0);

        entity.limit_speed();

        assert_eq!(entity.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_target_state_snapshot_is_detached() {
        let mut entity = MovingEntity::new().with_velocity(Vec3::new(2.0, 0.0, 0.0));
        let snapshot = entity.target_state();

        entity.velocity = Vec3::zeros();
        entity.position = Vec3::new(9.0, 9.0, 9.0);

        assert_eq!(snapshot.velocity, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(snapshot.position, Vec3::zeros());
        assert_relative_eq!(snapshot.speed, 2.0);
    }
}
