//! Goal-directed steering force computation
//!
//! Each behavior produces a force in the Reynolds form (desired velocity
//! minus current velocity). Active behaviors are evaluated in order,
//! scaled by weight, summed, and the sum is clamped to the agent's maximum
//! force with direction preserved.

use crate::foundation::math::Vec3;
use crate::steering::entity::{MovingEntity, TargetState};
use serde::{Deserialize, Serialize};

/// Distance inside which flee and evade react to a threat
pub const PANIC_DISTANCE: f32 = 50.0;

const PANIC_DISTANCE_SQ: f32 = PANIC_DISTANCE * PANIC_DISTANCE;

/// Squared distance below which an agent is considered on top of its target
const ZERO_DISTANCE_SQ: f32 = 1e-12;

/// How aggressively an agent slows down while arriving at a target
///
/// The tier is a divisor applied to the remaining distance; a larger divisor
/// yields a gentler approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deceleration {
    /// Divisor 3 - brakes late
    Fast,
    /// Divisor 4
    Middle,
    /// Divisor 5 - brakes early
    Slow,
}

impl Deceleration {
    /// Distance divisor for this tier
    pub fn divisor(self) -> f32 {
        match self {
            Self::Fast => 3.0,
            Self::Middle => 4.0,
            Self::Slow => 5.0,
        }
    }
}

/// A goal-directed steering behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Head straight for the target position
    Seek,
    /// Run from the target while inside the panic distance
    Flee,
    /// Approach the target and slow to a stop on it
    Arrive(Deceleration),
    /// Intercept the target's predicted position
    Pursuit,
    /// Flee the target's predicted position while it is close
    Evade,
}

/// A behavior paired with its contribution weight
#[derive(Debug, Clone, Copy)]
pub struct WeightedBehavior {
    /// The behavior to evaluate
    pub behavior: Behavior,
    /// Scale applied to the behavior's force before summation
    pub weight: f32,
}

impl WeightedBehavior {
    /// Create a weighted behavior
    pub fn new(behavior: Behavior, weight: f32) -> Self {
        Self { behavior, weight }
    }
}

/// Computes a bounded steering force for one agent per tick
///
/// Holds the latest target snapshot and an ordered list of weighted
/// behaviors. The default configuration arrives at the target with the
/// middle deceleration tier.
#[derive(Debug, Clone)]
pub struct SteeringBehaviors {
    behaviors: Vec<WeightedBehavior>,
    target: TargetState,
}

impl Default for SteeringBehaviors {
    fn default() -> Self {
        Self::new()
    }
}

impl SteeringBehaviors {
    /// Create steering with the default arrive behavior
    pub fn new() -> Self {
        Self {
            behaviors: vec![WeightedBehavior::new(
                Behavior::Arrive(Deceleration::Middle),
                1.0,
            )],
            target: TargetState::default(),
        }
    }

    /// Create steering from an explicit behavior list
    pub fn from_behaviors(behaviors: Vec<WeightedBehavior>) -> Self {
        Self {
            behaviors,
            target: TargetState::default(),
        }
    }

    /// Replace the active behavior list
    pub fn set_behaviors(&mut self, behaviors: Vec<WeightedBehavior>) {
        self.behaviors = behaviors;
    }

    /// Append a behavior with the given weight
    pub fn add_behavior(&mut self, behavior: Behavior, weight: f32) {
        self.behaviors.push(WeightedBehavior::new(behavior, weight));
    }

    /// The active behavior list in evaluation order
    pub fn behaviors(&self) -> &[WeightedBehavior] {
        &self.behaviors
    }

    /// Store the target snapshot behaviors will read this tick
    pub fn set_target(&mut self, target: TargetState) {
        self.target = target;
    }

    /// The current target snapshot
    pub fn target(&self) -> &TargetState {
        &self.target
    }

    /// Sum the active behaviors and clamp the result to the agent's
    /// maximum force, preserving direction
    ///
    /// `delta` is the tick duration in seconds, available to behaviors that
    /// integrate over time.
    pub fn calculate(&self, agent: &MovingEntity, _delta: f32) -> Vec3 {
        let mut total = Vec3::zeros();

        for entry in &self.behaviors {
            let force = match entry.behavior {
                Behavior::Seek => self.seek(agent, self.target.position),
                Behavior::Flee => self.flee(agent, self.target.position),
                Behavior::Arrive(deceleration) => {
                    self.arrive(agent, self.target.position, deceleration)
                }
                Behavior::Pursuit => self.pursuit(agent, &self.target),
                Behavior::Evade => self.evade(agent, &self.target),
            };
            total += force * entry.weight;
        }

        truncate(total, agent.max_force())
    }

    /// Force that heads straight for `target_pos` at maximum speed
    pub fn seek(&self, agent: &MovingEntity, target_pos: Vec3) -> Vec3 {
        let to_target = target_pos - agent.position;
        if to_target.magnitude_squared() < ZERO_DISTANCE_SQ {
            return Vec3::zeros();
        }

        let desired = to_target.normalize() * agent.max_speed();
        desired - agent.velocity
    }

    /// Force that runs from `target_pos`, zero outside the panic distance
    pub fn flee(&self, agent: &MovingEntity, target_pos: Vec3) -> Vec3 {
        let away = agent.position - target_pos;
        let distance_sq = away.magnitude_squared();
        if distance_sq >= PANIC_DISTANCE_SQ || distance_sq < ZERO_DISTANCE_SQ {
            return Vec3::zeros();
        }

        let desired = away.normalize() * agent.max_speed();
        desired - agent.velocity
    }

    /// Force that approaches `target_pos`, slowing with the given tier
    pub fn arrive(&self, agent: &MovingEntity, target_pos: Vec3, deceleration: Deceleration) -> Vec3 {
        let to_target = target_pos - agent.position;
        let distance = to_target.magnitude();
        if distance * distance < ZERO_DISTANCE_SQ {
            return Vec3::zeros();
        }

        let speed = (distance / deceleration.divisor()).min(agent.max_speed());
        let desired = to_target * (speed / distance);
        desired - agent.velocity
    }

    /// Force that intercepts a moving evader
    ///
    /// When the evader is roughly ahead and its heading satisfies the
    /// head-on test, seek its current position; otherwise seek the position
    /// predicted from its velocity over the closing time.
    pub fn pursuit(&self, agent: &MovingEntity, evader: &TargetState) -> Vec3 {
        let to_evader = evader.position - agent.position;
        let heading = agent.heading();

        if to_evader.dot(&heading) > 0.0 && heading.dot(&evader.forward) < 0.95 {
            return self.seek(agent, evader.position);
        }

        let look_ahead = look_ahead_time(to_evader, agent.max_speed(), evader.speed);
        self.seek(agent, evader.position + evader.velocity * look_ahead)
    }

    /// Force that flees a pursuer's predicted position, zero when the
    /// pursuer is outside the panic distance
    pub fn evade(&self, agent: &MovingEntity, pursuer: &TargetState) -> Vec3 {
        let to_pursuer = pursuer.position - agent.position;
        if to_pursuer.magnitude_squared() > PANIC_DISTANCE_SQ {
            return Vec3::zeros();
        }

        let look_ahead = look_ahead_time(to_pursuer, agent.max_speed(), pursuer.speed);
        self.flee(agent, pursuer.position + pursuer.velocity * look_ahead)
    }
}

/// Closing time used to extrapolate a moving target's position
fn look_ahead_time(offset: Vec3, own_max_speed: f32, other_speed: f32) -> f32 {
    let combined = own_max_speed + other_speed;
    if combined > f32::EPSILON {
        offset.magnitude() / combined
    } else {
        0.0
    }
}

/// Clamp `force` to `max_force`, preserving direction
fn truncate(force: Vec3, max_force: f32) -> Vec3 {
    let magnitude_sq = force.magnitude_squared();
    if magnitude_sq > max_force * max_force {
        force * (max_force / magnitude_sq.sqrt())
    } else {
        force
    }
}
