//! Agent steering and kinematic integration
//!
//! One agent's force computation per tick: behaviors produce goal-directed
//! forces, the vehicle integrates them into velocity and position, and the
//! heading is re-derived from (optionally smoothed) velocity.
//!
//! # Module Organization
//!
//! - [`entity`] - Kinematic state and the target snapshot abstraction
//! - [`behaviors`] - Seek/flee/arrive/pursuit/evade force computation
//! - [`smoother`] - Running average of recent velocity samples
//! - [`vehicle`] - Per-tick integration driver owning the pieces above

pub mod behaviors;
pub mod entity;
pub mod smoother;
pub mod vehicle;

pub use behaviors::{Behavior, Deceleration, SteeringBehaviors, WeightedBehavior};
pub use entity::{MovingEntity, TargetState};
pub use smoother::Smoother;
pub use vehicle::Vehicle;
