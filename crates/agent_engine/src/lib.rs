//! # Agent Engine
//!
//! Autonomous-agent steering and bounding-volume collision for 3D
//! simulations.
//!
//! ## Features
//!
//! - **Steering Behaviors**: seek, flee, arrive, pursuit, and evade forces
//!   composed through an ordered weighted list
//! - **Kinematic Integration**: mass-scaled force integration with speed
//!   clamping and heading derived from motion
//! - **Heading Smoothing**: running average over recent velocity samples
//! - **Bounding Volumes**: axis-aligned and oriented boxes with
//!   separating-axis overlap tests
//! - **Ray Casting**: box-slab and per-triangle precision with hits tagged
//!   by logical object
//! - **Configuration**: TOML/RON simulation settings with validation
//!
//! ## Quick Start
//!
//! ```rust
//! use agent_engine::prelude::*;
//!
//! // Steer an agent toward a target for one tick
//! let mut vehicle = Vehicle::new();
//! vehicle
//!     .steering_mut()
//!     .set_target(TargetState::at_position(Vec3::new(10.0, 0.0, 0.0)));
//! vehicle.update(1.0 / 60.0);
//! assert!(vehicle.entity().speed() <= vehicle.entity().max_speed());
//!
//! // Pick an interactive object with a ray
//! let mut set = CollidableSet::new();
//! let mesh = std::sync::Arc::new(TriangleMesh::cuboid(Vec3::new(1.0, 1.0, 1.0)));
//! let id = set.insert(mesh, CollisionType::Aabb, RaycastPrecision::Face);
//! set.get_mut(id).unwrap().set_world_transform(
//!     Transform::from_position(Vec3::new(0.0, 0.0, 5.0)).to_matrix(),
//! );
//! set.update_all();
//!
//! let mut hits = Vec::new();
//! set.raycast(&Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::z()), &mut hits);
//! assert_eq!(hits[0].object, id);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod steering;

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::{Config, ConfigError, SimulationConfig};
    pub use crate::foundation::{
        math::{rotation_from_direction, Mat4, Quat, Transform, Vec3},
        time::Timer,
    };
    pub use crate::physics::collision::{
        CollidableObject, CollidableSet, CollisionType, Intersection, ObjectId, Ray,
        RaycastPrecision, TriangleMesh, AABB, OBB,
    };
    pub use crate::steering::{
        Behavior, Deceleration, MovingEntity, Smoother, SteeringBehaviors, TargetState, Vehicle,
        WeightedBehavior,
    };
}
