//! Bounding-volume collision detection and ray casting
//!
//! Interactive objects are tested against rays and query boxes through
//! cached bounding volumes derived from their mesh and world transform.
//!
//! # Architecture
//!
//! - **Model Space Storage**: mesh geometry and its bounds stay in local
//!   coordinates, shared behind `Arc`
//! - **On-Demand Transformation**: world-space volumes are recomputed from
//!   the current world matrix only when a query needs them
//! - **Logical Identity**: every hit is stamped with the wrapping object's
//!   handle, never the raw mesh
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays, bounding spheres, triangles
//! - [`aabb`] - Axis-aligned boxes
//! - [`obb`] - Oriented boxes and the separating-axis test
//! - [`mesh`] - Triangle mesh geometry with per-triangle ray casting
//! - [`collidable`] - Interactive object wrapper and registry

pub mod aabb;
pub mod collidable;
pub mod mesh;
pub mod obb;
pub mod primitives;

pub use aabb::AABB;
pub use collidable::{
    CollidableObject, CollidableSet, CollisionType, Intersection, ObjectId, RaycastPrecision,
};
pub use mesh::{Face, MeshHit, TriangleMesh};
pub use obb::OBB;
pub use primitives::{BoundingSphere, Ray, Triangle};
