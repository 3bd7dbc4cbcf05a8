//! Axis-aligned bounding boxes

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::physics::collision::primitives::Ray;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create the tightest AABB around a set of points
    ///
    /// An empty set yields a degenerate box at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut min = Vec3::repeat(f32::INFINITY);
        let mut max = Vec3::repeat(f32::NEG_INFINITY);

        for point in points {
            min = min.inf(point);
            max = max.sup(point);
        }

        if points.is_empty() {
            return Self::new(Vec3::zeros(), Vec3::zeros());
        }
        Self { min, max }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Apply an affine world matrix
    ///
    /// Transforms the center and accumulates the absolute rotation/scale
    /// rows against the extents, yielding the tightest axis-aligned box
    /// around the transformed original.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let center = self.center();
        let extents = self.extents();

        let world_center = matrix.transform_point(&Point3::new(center.x, center.y, center.z));
        let world_extents = Vec3::new(
            matrix.m11.abs() * extents.x
                + matrix.m12.abs() * extents.y
                + matrix.m13.abs() * extents.z,
            matrix.m21.abs() * extents.x
                + matrix.m22.abs() * extents.y
                + matrix.m23.abs() * extents.z,
            matrix.m31.abs() * extents.x
                + matrix.m32.abs() * extents.y
                + matrix.m33.abs() * extents.z,
        );

        AABB::from_center_extents(
            Vec3::new(world_center.x, world_center.y, world_center.z),
            world_extents,
        )
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point, or 0 when the ray starts
    /// inside the box. Based on "An Efficient and Robust Ray-Box
    /// Intersection Algorithm".
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 {
                1.0 / ray.direction.x
            } else {
                f32::INFINITY
            },
            if ray.direction.y != 0.0 {
                1.0 / ray.direction.y
            } else {
                f32::INFINITY
            },
            if ray.direction.z != 0.0 {
                1.0 / ray.direction.z
            } else {
                f32::INFINITY
            },
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}
