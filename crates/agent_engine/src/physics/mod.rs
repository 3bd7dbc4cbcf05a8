//! Physics module for bounding-volume collision and ray queries
//!
//! Narrow-phase tests for interactive objects: box overlap against cached
//! bounding volumes and raycasts at a selectable precision.

pub mod collision;

pub use collision::{
    BoundingSphere, CollidableObject, CollidableSet, CollisionType, Face, Intersection, Ray,
    RaycastPrecision, Triangle, TriangleMesh, AABB, OBB,
};
